use tracing::info;

use crate::{layout::Layout, rules::destinations_into, types::*};

/// Bonus for stepping onto one of the four central squares.
pub const CENTER_BONUS: i32 = 2;
/// Bonus for a rook or queen settling on a pawnless file or rank.
pub const OPEN_LINE_BONUS: i32 = 3;
/// Bonus for a rook reaching the opponent's second row.
pub const DEEP_ROOK_BONUS: i32 = 4;
/// Extra loss for a queen captured while the game is still young.
pub const EARLY_QUEEN_LOSS_PENALTY: i32 = 20;
/// Number of recorded moves that count as "young".
pub const EARLY_GAME_MOVES: usize = 10;
/// Penalty for undoing your own previous move.
pub const RETREAT_PENALTY: i32 = 3;

/// Rendering hint only; never consulted by game logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shade {
    Light,
    Dark,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub position: Square,
    pub shade: Shade,
    pub piece: Option<Piece>,
}

impl Cell {
    fn empty(position: Square) -> Self {
        let shade = if (position.col + position.row) % 2 == 0 {
            Shade::Light
        } else {
            Shade::Dark
        };
        Self {
            position,
            shade,
            piece: None,
        }
    }
}

/// Everything `unmake_move` needs to invert one `make_move`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UndoRecord {
    mv: Move,
    mover: Color,
    from_piece: Option<Piece>,
    to_piece: Option<Piece>,
    scores: [i32; 2],
    outcome: GameOutcome,
    kings: [Option<Square>; 2],
    active_color: Color,
    mover_last_move: Option<Move>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Indexed `[row][col]`.
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    active_color: Color,
    scores: [i32; 2],
    kings: [Option<Square>; 2],
    outcome: GameOutcome,
    last_moves: [Option<Move>; 2],
    history: Vec<UndoRecord>,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// An empty board with White to move and zero scores.
    pub fn empty() -> Self {
        Board {
            cells: std::array::from_fn(|row| {
                std::array::from_fn(|col| Cell::empty(Square::new(col as u8, row as u8)))
            }),
            active_color: Color::White,
            scores: [0, 0],
            kings: [None, None],
            outcome: GameOutcome::InProgress,
            last_moves: [None, None],
            history: Vec::new(),
        }
    }

    /// Populates a board from a layout. Each side's score is seeded with its
    /// material sum, so the standard layout starts at 1290 apiece.
    pub fn from_layout(layout: &Layout) -> Self {
        let mut board = Board::empty();
        for (square, color, kind) in layout.iter() {
            board.place(Piece::new(kind, color, square));
        }
        board
    }

    pub fn standard() -> Self {
        Self::from_layout(&Layout::standard())
    }

    fn place(&mut self, piece: Piece) {
        let idx = piece.color.idx();
        self.scores[idx] += piece.kind.value();
        if piece.kind == PieceKind::King {
            self.kings[idx] = Some(piece.position);
        }
        let sq = piece.position;
        if let Some(old) = self.cell_mut(sq).piece.replace(piece) {
            self.scores[old.color.idx()] -= old.kind.value();
        }
    }

    pub fn with_active_color(mut self, color: Color) -> Self {
        self.active_color = color;
        self
    }

    pub fn cell(&self, sq: Square) -> &Cell {
        &self.cells[sq.row as usize][sq.col as usize]
    }

    pub(crate) fn cell_mut(&mut self, sq: Square) -> &mut Cell {
        &mut self.cells[sq.row as usize][sq.col as usize]
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flat_map(|row| row.iter())
    }

    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.cell(sq).piece.as_ref()
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.cells()
            .filter_map(|cell| cell.piece.as_ref())
            .filter(move |pc| pc.color == color)
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn score(&self, color: Color) -> i32 {
        self.scores[color.idx()]
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.idx()]
    }

    pub(crate) fn set_king_square(&mut self, color: Color, sq: Option<Square>) {
        self.kings[color.idx()] = sq;
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Number of moves that can still be unmade.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn last_move(&self, color: Color) -> Option<Move> {
        self.last_moves[color.idx()]
    }

    pub fn next_turn(&mut self) {
        self.active_color = self.active_color.other();
    }

    /// True if no pawn of either color stands on this square's file or rank.
    fn on_open_line(&self, sq: Square) -> bool {
        let is_pawn = |s: Square| {
            self.piece_at(s)
                .is_some_and(|pc| pc.kind == PieceKind::Pawn)
        };
        let file_open = (0..BOARD_SIZE as u8).all(|row| !is_pawn(Square::new(sq.col, row)));
        let rank_open = (0..BOARD_SIZE as u8).all(|col| !is_pawn(Square::new(col, sq.row)));
        file_open || rank_open
    }

    /// Applies a move without checking legality. Returns false, leaving the
    /// board untouched, when `from` is empty. Does not change the side to move.
    pub fn make_move(&mut self, mv: Move) -> bool {
        let Some(kind) = self.piece_at(mv.from).map(|pc| pc.kind) else {
            return false;
        };
        let was_open = matches!(kind, PieceKind::Rook | PieceKind::Queen) && self.on_open_line(mv.from);

        let Some(mut piece) = self.cell_mut(mv.from).piece.take() else {
            return false;
        };
        let captured = self.cell_mut(mv.to).piece.take();
        let mover = piece.color;
        let opponent = mover.other();

        self.history.push(UndoRecord {
            mv,
            mover,
            from_piece: Some(piece.clone()),
            to_piece: captured.clone(),
            scores: self.scores,
            outcome: self.outcome,
            kings: self.kings,
            active_color: self.active_color,
            mover_last_move: self.last_moves[mover.idx()],
        });

        if let Some(victim) = &captured
            && victim.color == opponent
        {
            self.scores[opponent.idx()] -= victim.kind.value();
            if victim.kind == PieceKind::Queen && self.history.len() <= EARLY_GAME_MOVES {
                self.scores[opponent.idx()] -= EARLY_QUEEN_LOSS_PENALTY;
            }
        }

        piece.position = mv.to;
        if kind == PieceKind::Pawn && mv.to.row == mover.promotion_row() {
            piece.kind = PieceKind::Queen;
            self.scores[mover.idx()] += PieceKind::Queen.value();
        }
        self.cell_mut(mv.to).piece = Some(piece);

        if kind == PieceKind::King {
            self.kings[mover.idx()] = Some(mv.to);
        }

        let mut bonus = 0;
        if mv.to.is_central() && !mv.from.is_central() {
            bonus += CENTER_BONUS;
        }
        if matches!(kind, PieceKind::Rook | PieceKind::Queen) && !was_open && self.on_open_line(mv.to) {
            bonus += OPEN_LINE_BONUS;
        }
        if kind == PieceKind::Rook && mv.to.row == mover.deep_row() && mv.from.row != mover.deep_row() {
            bonus += DEEP_ROOK_BONUS;
        }
        if self.last_moves[mover.idx()] == Some(Move::new(mv.to, mv.from)) {
            bonus -= RETREAT_PENALTY;
        }
        self.scores[mover.idx()] += bonus;
        self.last_moves[mover.idx()] = Some(mv);

        true
    }

    /// Reverts the most recent `make_move`, including the side to move.
    ///
    /// # Panics
    /// If there is nothing to undo.
    pub fn unmake_move(&mut self) {
        let Some(record) = self.history.pop() else {
            panic!("unmake_move called with an empty undo history");
        };
        self.cell_mut(record.mv.from).piece = record.from_piece;
        self.cell_mut(record.mv.to).piece = record.to_piece;
        self.scores = record.scores;
        self.outcome = record.outcome;
        self.kings = record.kings;
        self.active_color = record.active_color;
        self.last_moves[record.mover.idx()] = record.mover_last_move;
    }

    /// True if any opposing piece can reach `color`'s king square.
    ///
    /// Uses pseudo-legal generation for the attackers; a board without a king
    /// of that color is never in check.
    pub fn in_check(&self, color: Color) -> bool {
        let Some(king) = self.king_square(color) else {
            return false;
        };
        let mut buf = Vec::with_capacity(27);
        self.pieces(color.other()).any(|pc| {
            buf.clear();
            destinations_into(pc, self, &mut buf);
            buf.contains(&king)
        })
    }

    /// Settles the outcome once `color` has no legal reply. Terminal outcomes
    /// are sticky.
    pub fn checkmate_or_stalemate(&mut self, color: Color) -> GameOutcome {
        if self.outcome.is_over() || !self.get_possible_moves(color).is_empty() {
            return self.outcome;
        }
        self.outcome = if self.in_check(color) {
            GameOutcome::Checkmate {
                winner: color.other(),
            }
        } else {
            GameOutcome::Stalemate
        };
        info!(outcome = ?self.outcome, "game over");
        self.outcome
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
