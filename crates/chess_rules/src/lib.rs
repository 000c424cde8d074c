pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod history;
pub mod notation;
pub mod perft;
pub mod repetition;
pub mod types;
pub mod validator;

pub use board::*;
pub use config::RulesConfig;
pub use error::{MoveError, MoveResult};
pub use game::*;
pub use history::{History, HistorySnapshot};
pub use notation::MoveRecord;
pub use perft::{divide, perft};
pub use repetition::{RepetitionKey, repetition_key};
pub use types::*;
pub use validator::MoveKind;
