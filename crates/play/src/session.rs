//! One game between a human and the engine.

use minimax_engine::{MinimaxEngine, SearchWorker};
use tilechess_core::{Board, Color, Engine, GameOutcome, LayoutError, Move, Square, flatten, legal_moves};
use tracing::{info, warn};

use crate::config::PlayConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Human,
    Engine,
    Over(GameOutcome),
}

/// Owns the live board. The engine only ever sees copies of it.
pub struct Session {
    board: Board,
    worker: SearchWorker,
    engine: MinimaxEngine,
    human: Color,
}

impl Session {
    pub fn new(mut board: Board, human: Color, depth: u8) -> Self {
        // A loaded position may already be finished.
        board.checkmate_or_stalemate(board.active_color());
        let mut engine = MinimaxEngine::new(depth);
        engine.new_game();
        Self {
            board,
            worker: SearchWorker::new(),
            engine,
            human,
        }
    }

    pub fn from_config(config: &PlayConfig) -> Result<Self, LayoutError> {
        let layout = config.load_layout()?;
        Ok(Self::new(Board::from_layout(&layout), config.human, config.depth))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn human(&self) -> Color {
        self.human
    }

    /// Engine search depth in plies.
    pub fn depth(&self) -> u8 {
        self.engine.depth()
    }

    pub fn turn(&self) -> Turn {
        let outcome = self.board.outcome();
        if outcome.is_over() {
            Turn::Over(outcome)
        } else if self.board.active_color() == self.human {
            Turn::Human
        } else {
            Turn::Engine
        }
    }

    /// Plays a move typed by the human. False if it is not their turn or the
    /// move is not legal.
    pub fn play_human(&mut self, mv: Move) -> bool {
        if self.turn() != Turn::Human {
            return false;
        }
        self.board.player_move(mv)
    }

    /// Lets the engine search a copy of the board, then plays its move on the
    /// live board. Returns the move played.
    pub async fn play_engine(&mut self) -> Option<Move> {
        if self.turn() != Turn::Engine {
            return None;
        }
        if !self.worker.start(&self.board, self.engine.clone()) {
            warn!("engine search could not be started");
            return None;
        }

        let result = self.worker.wait().await?;
        let mv = result.best_move?;
        if !self.board.player_move(mv) {
            warn!(%mv, "engine proposed a move that is not legal here");
            return None;
        }
        info!(%mv, score = result.score, nodes = result.nodes, "engine moved");
        Some(mv)
    }

    /// Legal moves for the side to move, in coordinate notation.
    pub fn legal_move_list(&self) -> Vec<String> {
        flatten(&legal_moves(&self.board, self.board.active_color()))
            .iter()
            .map(Move::to_string)
            .collect()
    }

    /// ASCII diagram, White at the bottom. Uppercase is White, `.` is empty.
    pub fn render(&self) -> String {
        let files = "  a b c d e f g h";
        let mut out = String::from(files);
        out.push('\n');
        for row in 0..8u8 {
            let rank = 8 - row;
            let cells: Vec<String> = (0..8u8)
                .map(|col| {
                    self.board
                        .piece_at(Square::new(col, row))
                        .map_or('.', |pc| pc.symbol())
                        .to_string()
                })
                .collect();
            out.push_str(&format!("{rank} {} {rank}\n", cells.join(" ")));
        }
        out.push_str(files);
        out.push_str(&format!(
            "\nWhite {}  Black {}\n",
            self.board.score(Color::White),
            self.board.score(Color::Black)
        ));
        out
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
