//! Position keys for threefold-repetition detection.
//!
//! A key is the XOR of fixed random values for:
//! - each piece on its square (2 colors x 6 kinds x 64 squares)
//! - Black to move
//! - each castling right still available (4 values)
//! - the file of the en passant target (8 values)
//!
//! Castling rights enter the key by what they still permit, so two positions
//! that differ only in which rook moved first hash alike once both wings are
//! lost.

use serde::{Deserialize, Serialize};

use crate::board::{Board, CastlingRights};
use crate::types::*;

pub struct RepetitionTable {
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    pub black_to_move: u64,
    /// [white kingside, white queenside, black kingside, black queenside]
    pub castling: [u64; 4],
    pub en_passant: [u64; 8],
}

impl Default for RepetitionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RepetitionTable {
    /// Fill the table from a fixed xorshift64 stream so keys are stable
    /// across runs and saved games.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x9E37_79B9_7F4A_7C15u64;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut kind = 0;
            while kind < 6 {
                let mut sq = 0;
                while sq < 64 {
                    state = xorshift64(state);
                    pieces[color][kind][sq] = state;
                    sq += 1;
                }
                kind += 1;
            }
            color += 1;
        }

        state = xorshift64(state);
        let black_to_move = state;

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant[i] = state;
            i += 1;
        }

        RepetitionTable {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: Square) -> u64 {
        let index = sq.row as usize * 8 + sq.col as usize;
        self.pieces[piece.color.idx()][piece.kind.idx()][index]
    }
}

pub static KEYS: RepetitionTable = RepetitionTable::new();

/// Canonical encoding of a position for repetition counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepetitionKey(pub u64);

pub fn repetition_key(
    board: &Board,
    side_to_move: Color,
    castling: &CastlingRights,
    en_passant: Option<Square>,
) -> RepetitionKey {
    let mut hash = 0u64;

    for (sq, piece) in board.occupied() {
        hash ^= KEYS.piece_key(piece, sq);
    }

    if side_to_move == Color::Black {
        hash ^= KEYS.black_to_move;
    }

    let rights = [
        castling.white.can_castle_kingside(),
        castling.white.can_castle_queenside(),
        castling.black.can_castle_kingside(),
        castling.black.can_castle_queenside(),
    ];
    for (i, available) in rights.into_iter().enumerate() {
        if available {
            hash ^= KEYS.castling[i];
        }
    }

    if let Some(target) = en_passant {
        hash ^= KEYS.en_passant[target.col as usize];
    }

    RepetitionKey(hash)
}

#[cfg(test)]
#[path = "repetition_tests.rs"]
mod repetition_tests;
