//! Initial piece layouts.
//!
//! The on-disk format is a JSON object mapping `"col, row"` keys to a
//! `[color, piece]` pair, e.g. `{"4, 7": ["w", "k"]}`. Squares without a key
//! start empty. FEN piece placement is accepted as well for tests and custom
//! positions.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::info;

use crate::{board::Board, error::LayoutError, types::*};

/// The bundled starting layout, in the on-disk JSON format.
pub const STARTING_LOCATIONS: &str = include_str!("../assets/starting_locations.json");

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    placements: BTreeMap<Square, (Color, PieceKind)>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style placement, replacing whatever was on `sq`.
    pub fn with(mut self, sq: Square, color: Color, kind: PieceKind) -> Self {
        self.insert(sq, color, kind);
        self
    }

    pub fn insert(&mut self, sq: Square, color: Color, kind: PieceKind) {
        self.placements.insert(sq, (color, kind));
    }

    pub fn get(&self, sq: Square) -> Option<(Color, PieceKind)> {
        self.placements.get(&sq).copied()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, Color, PieceKind)> + '_ {
        self.placements
            .iter()
            .map(|(&sq, &(color, kind))| (sq, color, kind))
    }

    /// The usual chess starting position, White on rows 6 and 7.
    pub fn standard() -> Self {
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut layout = Layout::new();
        for (col, &kind) in back.iter().enumerate() {
            let col = col as u8;
            layout.insert(Square::new(col, 0), Color::Black, kind);
            layout.insert(Square::new(col, 1), Color::Black, PieceKind::Pawn);
            layout.insert(Square::new(col, 6), Color::White, PieceKind::Pawn);
            layout.insert(Square::new(col, 7), Color::White, kind);
        }
        layout
    }

    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        let raw: BTreeMap<String, (String, String)> = serde_json::from_str(text)?;
        let mut layout = Layout::new();
        for (key, (color, piece)) in raw {
            let sq = parse_key(&key)?;
            if layout.get(sq).is_some() {
                return Err(LayoutError::DuplicateSquare {
                    col: sq.col,
                    row: sq.row,
                });
            }
            let color = Color::from_symbol(color.trim()).ok_or(LayoutError::BadColor(color))?;
            let kind = single_char(&piece)
                .and_then(PieceKind::from_char)
                .ok_or(LayoutError::BadPiece(piece))?;
            layout.insert(sq, color, kind);
        }
        Ok(layout)
    }

    pub fn from_path(path: &Path) -> Result<Self, LayoutError> {
        let text = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let layout = Self::from_json(&text)?;
        info!(path = %path.display(), pieces = layout.len(), "loaded layout");
        Ok(layout)
    }

    /// Parses the piece-placement field of a FEN string. The first rank
    /// listed lands on row 0.
    pub fn from_fen(placement: &str) -> Result<Self, LayoutError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != BOARD_SIZE {
            return Err(LayoutError::BadFen(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        let mut layout = Layout::new();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for ch in rank.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d as usize;
                } else {
                    let kind = PieceKind::from_char(ch.to_ascii_lowercase())
                        .ok_or_else(|| LayoutError::BadFen(format!("unknown piece {ch:?}")))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if col >= BOARD_SIZE {
                        return Err(LayoutError::BadFen(format!("rank {rank:?} is too long")));
                    }
                    layout.insert(Square::new(col as u8, row as u8), color, kind);
                    col += 1;
                }
            }
            if col != BOARD_SIZE {
                return Err(LayoutError::BadFen(format!(
                    "rank {rank:?} covers {col} squares"
                )));
            }
        }
        Ok(layout)
    }

    /// A playable game needs exactly one king per side.
    pub fn validate_kings(&self) -> Result<(), LayoutError> {
        for color in [Color::White, Color::Black] {
            let count = self
                .iter()
                .filter(|&(_, c, k)| c == color && k == PieceKind::King)
                .count();
            if count != 1 {
                return Err(LayoutError::KingCount { color, count });
            }
        }
        Ok(())
    }
}

fn parse_key(key: &str) -> Result<Square, LayoutError> {
    let bad = || LayoutError::BadKey(key.to_string());
    let (col, row) = key.split_once(',').ok_or_else(bad)?;
    let col: i64 = col.trim().parse().map_err(|_| bad())?;
    let row: i64 = row.trim().parse().map_err(|_| bad())?;
    let size = BOARD_SIZE as i64;
    if !(0..size).contains(&col) || !(0..size).contains(&row) {
        return Err(LayoutError::OutOfBounds { col, row });
    }
    Ok(Square::new(col as u8, row as u8))
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.trim().chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

impl Board {
    /// Builds a board from a FEN string. Only the placement and the optional
    /// side-to-move fields are read; the rest is ignored.
    pub fn from_fen(fen: &str) -> Result<Self, LayoutError> {
        let mut parts = fen.split_whitespace();
        let placement = parts
            .next()
            .ok_or_else(|| LayoutError::BadFen("empty string".to_string()))?;
        let layout = Layout::from_fen(placement)?;
        let active = match parts.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => {
                return Err(LayoutError::BadFen(format!("bad side to move {other:?}")));
            }
        };
        Ok(Board::from_layout(&layout).with_active_color(active))
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod layout_tests;
