//! Terminal front end for two players sharing a keyboard.
//!
//! Reads one command per line, drives a [`chess_rules::Game`] and prints the
//! result.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p chess_cli -- --config chessgame.toml
//! cargo run -p chess_cli -- --load saved.json
//! ```

mod commands;
mod config;
mod render;
mod session;

pub use commands::*;
pub use config::*;
pub use render::*;
pub use session::*;
