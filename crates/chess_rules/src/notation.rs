//! Algebraic-style move text.
//!
//! Check (`+`) and mate (`#`) suffixes depend on the resulting position and
//! are appended by the game, not here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::*;

/// `e4`, `exd5`, `Nf3`, `Bxe5`.
pub fn move_notation(kind: PieceKind, from: Square, to: Square, is_capture: bool) -> String {
    match (kind, is_capture) {
        (PieceKind::Pawn, false) => to.name(),
        (PieceKind::Pawn, true) => format!("{}x{}", from.file_char(), to),
        (_, true) => format!("{}x{}", kind.letter(), to),
        (_, false) => format!("{}{}", kind.letter(), to),
    }
}

pub fn castling_notation(kingside: bool) -> &'static str {
    if kingside { "O-O" } else { "O-O-O" }
}

/// `exd6 e.p.`
pub fn en_passant_notation(from: Square, to: Square) -> String {
    format!("{} e.p.", move_notation(PieceKind::Pawn, from, to, true))
}

/// `=Q` etc.
pub fn promotion_suffix(kind: PieceKind) -> String {
    format!("={}", kind.letter())
}

/// One completed half-move as shown in the move log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 1-based half-move number.
    pub ply: usize,
    pub color: Color,
    pub kind: PieceKind,
    pub from: Square,
    pub to: Square,
    pub notation: String,
}

impl fmt::Display for MoveRecord {
    /// `1. W pawn (6,4)→(4,4) [e4]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} {} ({},{})→({},{}) [{}]",
            self.ply,
            self.color.symbol(),
            self.kind.name(),
            self.from.row,
            self.from.col,
            self.to.row,
            self.to.col,
            self.notation
        )
    }
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
