//! Per-piece movement patterns.
//!
//! Everything here is pseudo-legal: destinations respect occupancy but ignore
//! whether the mover's own king ends up attacked. Check safety is layered on
//! top in `movegen`.

use crate::{board::Board, types::*};

const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

/// Pseudo-legal destinations of `piece` on `board`.
pub fn legal_destinations(piece: &Piece, board: &Board) -> Vec<Square> {
    let mut out = Vec::with_capacity(27);
    destinations_into(piece, board, &mut out);
    out
}

/// Appends the pseudo-legal destinations of `piece` to `out`.
pub fn destinations_into(piece: &Piece, board: &Board, out: &mut Vec<Square>) {
    match piece.kind {
        PieceKind::Pawn => gen_pawn(board, piece.position, piece.color, out),
        PieceKind::Knight => gen_steps(board, piece.position, piece.color, out, &KNIGHT_JUMPS),
        PieceKind::Bishop => gen_slider(board, piece.position, piece.color, out, &DIAGONALS),
        PieceKind::Rook => gen_slider(board, piece.position, piece.color, out, &ORTHOGONALS),
        PieceKind::Queen => gen_slider(board, piece.position, piece.color, out, &ALL_DIRECTIONS),
        PieceKind::King => gen_steps(board, piece.position, piece.color, out, &ALL_DIRECTIONS),
    }
}

fn gen_pawn(board: &Board, from: Square, c: Color, out: &mut Vec<Square>) {
    let dir = c.forward();

    // Straight ahead only onto empty squares.
    if let Some(one) = from.offset(0, dir)
        && board.piece_at(one).is_none()
    {
        out.push(one);
        if from.row == c.pawn_start_row()
            && let Some(two) = one.offset(0, dir)
            && board.piece_at(two).is_none()
        {
            out.push(two);
        }
    }

    // Diagonals need an enemy to land on.
    for dc in [-1, 1] {
        if let Some(to) = from.offset(dc, dir)
            && let Some(target) = board.piece_at(to)
            && target.color != c
        {
            out.push(to);
        }
    }
}

/// Single-step movers: knight jumps and king steps.
fn gen_steps(board: &Board, from: Square, c: Color, out: &mut Vec<Square>, deltas: &[(i8, i8)]) {
    for &(dc, dr) in deltas {
        if let Some(to) = from.offset(dc, dr) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) if pc.color != c => out.push(to),
                _ => {}
            }
        }
    }
}

fn gen_slider(board: &Board, from: Square, c: Color, out: &mut Vec<Square>, dirs: &[(i8, i8)]) {
    for &(dc, dr) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(dc, dr) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) if pc.color != c => {
                    out.push(to);
                    break;
                }
                _ => break,
            }
            cur = to;
        }
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
