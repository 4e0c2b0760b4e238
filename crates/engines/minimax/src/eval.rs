//! Position evaluation.
//!
//! The board keeps a running score per side (material plus positional
//! bonuses, maintained by `make_move`), so evaluation is a single subtraction.

use tilechess_core::{Board, Color};

/// Score difference from `color`'s point of view. Positive favours `color`.
pub fn evaluate(board: &Board, color: Color) -> i32 {
    board.score(color) - board.score(color.other())
}
