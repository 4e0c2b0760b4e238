//! Human-versus-engine play on top of `tilechess_core` and `minimax_engine`.

pub mod config;
pub mod session;

pub use config::{ConfigError, PlayConfig};
pub use session::{Session, Turn};
