use std::collections::BTreeMap;

use tracing::warn;

use crate::{board::Board, rules::destinations_into, types::*};

/// Origin square to its legal destinations. Ordered, so iteration is stable.
pub type MoveMap = BTreeMap<Square, Vec<Square>>;

/// Legal moves for `color` without touching the caller's board.
/// Clones the board once and delegates to `Board::get_possible_moves`.
pub fn legal_moves(board: &Board, color: Color) -> MoveMap {
    let mut tmp = board.clone();
    tmp.get_possible_moves(color)
}

/// Flattens a move map into moves, in map order.
pub fn flatten(moves: &MoveMap) -> Vec<Move> {
    moves
        .iter()
        .flat_map(|(&from, targets)| targets.iter().map(move |&to| Move::new(from, to)))
        .collect()
}

impl Board {
    /// All legal moves for `color`. Origins without a surviving destination
    /// are left out, and nothing is generated once the game is over.
    pub fn get_possible_moves(&mut self, color: Color) -> MoveMap {
        let mut out = MoveMap::new();
        if self.outcome().is_over() {
            return out;
        }

        let movers: Vec<Piece> = self.pieces(color).cloned().collect();
        let mut targets = Vec::with_capacity(27);
        for pc in movers {
            targets.clear();
            destinations_into(&pc, self, &mut targets);
            // Filter illegal destinations in place by simulating each one.
            targets.retain(|&to| self.is_safe_after(color, Move::new(pc.position, to)));
            if !targets.is_empty() {
                out.insert(pc.position, targets.clone());
            }
        }
        out
    }

    /// Plays `mv` on the cells only, asks whether `color`'s king is attacked,
    /// and puts everything back, king cache included.
    fn is_safe_after(&mut self, color: Color, mv: Move) -> bool {
        let saved_king = self.king_square(color);

        let mut moved = self.cell_mut(mv.from).piece.take();
        if let Some(pc) = moved.as_mut() {
            pc.position = mv.to;
            if pc.kind == PieceKind::King {
                self.set_king_square(color, Some(mv.to));
            }
        }
        let captured = std::mem::replace(&mut self.cell_mut(mv.to).piece, moved);

        let safe = !self.in_check(color);

        let mut moved = std::mem::replace(&mut self.cell_mut(mv.to).piece, captured);
        if let Some(pc) = moved.as_mut() {
            pc.position = mv.from;
        }
        self.cell_mut(mv.from).piece = moved;
        self.set_king_square(color, saved_king);

        safe
    }

    /// Plays a move for the side to move after checking it against the legal
    /// set, then passes the turn and settles the outcome. Returns false with
    /// the board untouched if the move is not allowed.
    pub fn player_move(&mut self, mv: Move) -> bool {
        if self.outcome().is_over() {
            warn!(%mv, "move rejected: game is over");
            return false;
        }

        let mover = self.active_color();
        if !self.piece_at(mv.from).is_some_and(|pc| pc.color == mover) {
            warn!(%mv, "move rejected: no {mover} piece on origin");
            return false;
        }

        let legal = self.get_possible_moves(mover);
        if !legal.get(&mv.from).is_some_and(|targets| targets.contains(&mv.to)) {
            warn!(%mv, "move rejected: not legal");
            return false;
        }

        self.make_move(mv);
        self.next_turn();
        self.checkmate_or_stalemate(self.active_color());
        true
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
