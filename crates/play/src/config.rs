use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tilechess_core::{Color, Layout, LayoutError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config")]
    Parse(#[from] toml::de::Error),
    #[error("search depth must be at least 1")]
    ZeroDepth,
}

/// Settings for a terminal game.
///
/// ```toml
/// depth = 3
/// human = "white"
/// layout = "assets/starting_locations.json"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayConfig {
    /// Engine search depth in plies.
    pub depth: u8,
    /// Color played from the keyboard.
    pub human: Color,
    /// JSON layout file; the standard layout when absent.
    pub layout: Option<PathBuf>,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            depth: minimax_engine::DEFAULT_DEPTH,
            human: Color::White,
            layout: None,
        }
    }
}

impl PlayConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: PlayConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }

    pub fn engine_color(&self) -> Color {
        self.human.other()
    }

    /// Reads the configured layout and checks that each side has one king.
    pub fn load_layout(&self) -> Result<Layout, LayoutError> {
        let layout = match &self.layout {
            Some(path) => Layout::from_path(path)?,
            None => Layout::standard(),
        };
        layout.validate_kings()?;
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
