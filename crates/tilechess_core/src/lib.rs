pub mod board;
pub mod error;
pub mod layout;
pub mod movegen;
pub mod perft;
pub mod rules;
pub mod types;

// Re-export game logic (not engine-specific)
pub use board::*;
pub use error::LayoutError;
pub use layout::{Layout, STARTING_LOCATIONS};
pub use movegen::*;
pub use perft::{divide, perft};
pub use rules::{destinations_into, legal_destinations};
pub use types::*;

// =============================================================================
// Engine trait: anything that can pick a move for the side to move
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found (None if the side to move has no legal moves)
    pub best_move: Option<Move>,
    /// Score of the line found, from the searching side's perspective
    pub score: i32,
    /// Depth the search was run to
    pub depth: u8,
    /// Number of positions visited
    pub nodes: u64,
}

/// Trait that all move pickers implement.
///
/// Engines run on a worker thread, so they must be `Send`. The board passed
/// to `search` belongs to the caller and is left untouched.
pub trait Engine: Send {
    /// Pick a move for `board.active_color()`.
    fn search(&mut self, board: &Board) -> SearchResult;

    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}
