//! Minimax Engine
//!
//! Depth-limited minimax with alpha-beta pruning over the running-score
//! evaluation, plus a worker that runs any `Engine` off the caller's thread.

mod eval;
mod search;
pub mod worker;

use tilechess_core::{Board, Engine, SearchResult};
use tracing::debug;

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u8 = 3;

/// Fixed-depth minimax engine.
#[derive(Debug, Clone)]
pub struct MinimaxEngine {
    depth: u8,
    /// Node counter for statistics
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new(depth: u8) -> Self {
        Self { depth, nodes: 0 }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, board: &Board) -> SearchResult {
        self.nodes = 0;
        let (best_move, score) = search::pick_best_move(board, self.depth, &mut self.nodes);
        debug!(
            best_move = ?best_move.map(|m| m.to_string()),
            score,
            nodes = self.nodes,
            depth = self.depth,
            "search finished"
        );

        SearchResult {
            best_move,
            score,
            depth: self.depth,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

// Re-export for direct use if needed
pub use eval::evaluate;
pub use search::{minimax, pick_best_move, search};
pub use worker::{SearchState, SearchWorker};
