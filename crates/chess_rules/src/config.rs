use serde::{Deserialize, Serialize};

/// Rule switches for a [`Game`](crate::Game).
///
/// Every field has a default, so a partial `[rules]` table deserializes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// When false any piece may move; the turn then passes to the opponent
    /// of whoever moved.
    pub enforce_turn_order: bool,
    pub fifty_move_rule: bool,
    pub threefold_repetition: bool,
    /// Evaluate checkmate and stalemate before the fifty-move and
    /// repetition draws.
    pub checkmate_precedence: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            enforce_turn_order: true,
            fifty_move_rule: true,
            threefold_repetition: true,
            checkmate_precedence: false,
        }
    }
}
