use anyhow::Context;
use chess_rules::{Game, PieceKind, Square};
use std::path::Path;
use tracing::info;

use crate::commands::{Command, HELP};
use crate::config::CliConfig;
use crate::render::*;

/// What the input loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

/// A running game plus the front-end settings it was started with.
pub struct Session {
    game: Game,
    config: CliConfig,
}

impl Session {
    pub fn new(config: CliConfig) -> Self {
        Self {
            game: Game::with_config(config.rules),
            config,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run one command. Rejected moves are reported in the output text; only
    /// file errors come back as `Err`.
    pub fn execute(&mut self, cmd: Command) -> anyhow::Result<Outcome> {
        let text = match cmd {
            Command::Move {
                from,
                to,
                promotion,
            } => self.play(from, to, promotion),
            Command::Promote(kind) => match self.game.choose_promotion(kind) {
                Ok(report) => self.after_move(render_report(&report)),
                Err(e) => format!("Cannot promote: {e}"),
            },
            Command::Undo => match self.game.undo() {
                Ok(()) => self.after_move("Move undone".to_string()),
                Err(e) => format!("Cannot undo: {e}"),
            },
            Command::Reset => {
                self.game.reset();
                format!("New game\n{}", render_board(&self.game))
            }
            Command::Board => render_board(&self.game),
            Command::History => render_history(&self.game),
            Command::Log => render_log(&self.game),
            Command::Captured => render_captured(&self.game),
            Command::Status => render_status(&self.game),
            Command::Moves => render_moves(&self.game),
            Command::Save(path) => {
                let path = path.unwrap_or_else(|| self.config.save_path());
                self.save(&path)?;
                format!("Saved to {}", path.display())
            }
            Command::Load(path) => {
                let path = path.unwrap_or_else(|| self.config.save_path());
                self.load(&path)?;
                format!("Loaded {}\n{}", path.display(), render_board(&self.game))
            }
            Command::Turns(on) => {
                self.game.set_enforce_turn_order(on);
                format!("Turn order {}", if on { "enforced" } else { "off" })
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Continue(text))
    }

    fn play(&mut self, from: Square, to: Square, promotion: Option<PieceKind>) -> String {
        let report = match self.game.propose_move(from, to) {
            Ok(report) => report,
            Err(e) => return format!("Illegal move: {e}"),
        };
        match (report.promotion_pending, promotion) {
            (true, Some(kind)) => match self.game.choose_promotion(kind) {
                Ok(report) => self.after_move(render_report(&report)),
                Err(e) => format!("Cannot promote: {e}"),
            },
            _ => self.after_move(render_report(&report)),
        }
    }

    fn after_move(&self, summary: String) -> String {
        if self.config.show_board_after_move {
            format!("{summary}\n{}", render_board(&self.game))
        } else {
            summary
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.game).context("failed to serialize game")?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), plies = self.game.move_log().len(), "game saved");
        Ok(())
    }

    pub fn load(&mut self, path: &Path) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        self.game = serde_json::from_str(&text)
            .with_context(|| format!("{} is not a saved game", path.display()))?;
        info!(path = %path.display(), plies = self.game.move_log().len(), "game loaded");
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
