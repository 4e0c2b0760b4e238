use crate::{board::Board, movegen::flatten};

/// Counts the leaf positions reachable from `board` in exactly `depth` plies,
/// starting with the side to move. The board is restored before returning.
pub fn perft(board: &mut Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = flatten(&board.get_possible_moves(board.active_color()));
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        board.make_move(mv);
        board.next_turn();
        nodes += perft(board, depth - 1);
        board.unmake_move();
    }
    nodes
}

/// Per-root-move counts, handy for locating a generator bug.
pub fn divide(board: &mut Board, depth: u8) -> Vec<(crate::types::Move, u64)> {
    let moves = flatten(&board.get_possible_moves(board.active_color()));
    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        board.make_move(mv);
        board.next_turn();
        let nodes = perft(board, depth.saturating_sub(1));
        board.unmake_move();
        out.push((mv, nodes));
    }
    out
}
