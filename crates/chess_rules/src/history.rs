//! Snapshot stack backing undo and repetition counting.

use serde::{Deserialize, Serialize};

use crate::board::{Board, CastlingRights};
use crate::repetition::RepetitionKey;
use crate::types::*;

/// Everything needed to put a game back exactly as it was after a completed
/// half-move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub board: Board,
    pub active: Color,
    /// Pieces captured by each side, indexed by [`Color::idx`].
    pub captured: [Vec<Piece>; 2],
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub castling: CastlingRights,
    /// Keys of every position reached so far, the current one last.
    pub repetition_keys: Vec<RepetitionKey>,
}

impl HistorySnapshot {
    pub fn current_key(&self) -> Option<RepetitionKey> {
        self.repetition_keys.last().copied()
    }
}

/// Append-only between resets; one entry per completed half-move plus the
/// initial position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    snapshots: Vec<HistorySnapshot>,
}

impl History {
    pub fn seeded(initial: HistorySnapshot) -> Self {
        Self {
            snapshots: vec![initial],
        }
    }

    pub fn push(&mut self, snapshot: HistorySnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn top(&self) -> Option<&HistorySnapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.snapshots.len() >= 2
    }

    /// Drop the latest snapshot and return the one now on top.
    ///
    /// With fewer than two entries nothing is removed and `None` is returned.
    pub fn pop_for_undo(&mut self) -> Option<&HistorySnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.snapshots.pop();
        self.snapshots.last()
    }

    /// Occurrences of `key` in the latest snapshot's key list.
    pub fn repetition_count(&self, key: RepetitionKey) -> usize {
        self.top()
            .map(|s| s.repetition_keys.iter().filter(|&&k| k == key).count())
            .unwrap_or(0)
    }

    pub fn snapshots(&self) -> &[HistorySnapshot] {
        &self.snapshots
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
