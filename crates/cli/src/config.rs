//! Front-end settings read from a TOML file.
//!
//! ```toml
//! show_board_after_move = true
//! save_path = "game.json"
//! log_filter = "chess_rules=debug"
//!
//! [rules]
//! enforce_turn_order = true
//! checkmate_precedence = false
//! ```

use anyhow::Context;
use chess_rules::RulesConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_SAVE_PATH: &str = "chessgame.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub rules: RulesConfig,
    pub show_board_after_move: bool,
    /// Where `save`/`load` go when no path is given.
    pub save_path: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            show_board_after_move: true,
            save_path: None,
            log_filter: "warn".to_string(),
        }
    }
}

impl CliConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid config file")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn save_path(&self) -> PathBuf {
        self.save_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH))
    }
}
