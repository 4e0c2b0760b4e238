//! Minimax search with alpha-beta pruning

use tilechess_core::{Board, Color, Move, flatten};

use crate::eval::evaluate;

/// Searches `board` to `depth` plies and returns the best move for the side
/// to move along with its score.
///
/// # Arguments
/// * `board` - Position to search; mutated during the search and restored
/// * `depth` - Remaining plies
/// * `alpha` / `beta` - Search window
/// * `maximizing` - Whether the side to move is the one scores are measured for
/// * `perspective` - Color whose evaluation is being maximized
///
/// Returns `(None, evaluate(board, perspective))` at a leaf: depth zero, a
/// finished game, or no legal moves.
pub fn search(
    board: &mut Board,
    depth: u8,
    alpha: i32,
    beta: i32,
    maximizing: bool,
    perspective: Color,
) -> (Option<Move>, i32) {
    let mut nodes = 0;
    minimax(board, depth, alpha, beta, maximizing, perspective, &mut nodes)
}

/// Picks a move for the side to move on a private copy of `board`.
pub fn pick_best_move(board: &Board, depth: u8, nodes: &mut u64) -> (Option<Move>, i32) {
    let mut tmp = board.clone();
    let side = tmp.active_color();
    minimax(&mut tmp, depth, i32::MIN, i32::MAX, true, side, nodes)
}

/// `search` with a visited-node counter.
pub fn minimax(
    board: &mut Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    perspective: Color,
    nodes: &mut u64,
) -> (Option<Move>, i32) {
    *nodes += 1;

    if depth == 0 || board.outcome().is_over() {
        return (None, evaluate(board, perspective));
    }

    let moves = flatten(&board.get_possible_moves(board.active_color()));
    let Some(&first) = moves.first() else {
        return (None, evaluate(board, perspective));
    };

    let mut best_move = first;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for mv in moves {
        board.make_move(mv);
        board.next_turn();
        let (_, score) = minimax(board, depth - 1, alpha, beta, !maximizing, perspective, nodes);
        board.unmake_move();

        if maximizing {
            if score > best {
                best = score;
                best_move = mv;
            }
            alpha = alpha.max(best);
        } else {
            if score < best {
                best = score;
                best_move = mv;
            }
            beta = beta.min(best);
        }

        if beta <= alpha {
            break;
        }
    }

    (Some(best_move), best)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
