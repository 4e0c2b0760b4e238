use std::path::PathBuf;

use thiserror::Error;

use crate::types::Color;

/// Problems turning an external description of a position into a board.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid layout JSON")]
    Json(#[from] serde_json::Error),
    #[error("invalid square key {0:?}, expected \"col,row\"")]
    BadKey(String),
    #[error("square ({col}, {row}) is listed more than once")]
    DuplicateSquare { col: u8, row: u8 },
    #[error("square ({col}, {row}) is off the 8x8 board")]
    OutOfBounds { col: i64, row: i64 },
    #[error("unknown color {0:?}, expected \"w\" or \"b\"")]
    BadColor(String),
    #[error("unknown piece {0:?}, expected one of p, n, b, r, q, k")]
    BadPiece(String),
    #[error("invalid FEN: {0}")]
    BadFen(String),
    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },
}
