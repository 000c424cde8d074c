//! The game state machine.
//!
//! [`Game`] owns the live board and every piece of state that legality
//! depends on. Callers drive it with [`Game::propose_move`],
//! [`Game::choose_promotion`], [`Game::undo`] and [`Game::reset`]; a rejected
//! call returns a [`MoveError`] and leaves the game untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, CastlingRights, SideCastling};
use crate::config::RulesConfig;
use crate::error::{MoveError, MoveResult};
use crate::history::{History, HistorySnapshot};
use crate::notation::{
    MoveRecord, castling_notation, en_passant_notation, move_notation, promotion_suffix,
};
use crate::repetition::{RepetitionKey, repetition_key};
use crate::types::*;
use crate::validator::{self, MoveKind};

/// A pawn standing on its last row, waiting for the owner to pick a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPromotion {
    pub square: Square,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    White,
    Black,
    Draw,
}

impl Termination {
    pub fn winner(self) -> Winner {
        match self {
            Termination::Checkmate {
                winner: Color::White,
            } => Winner::White,
            Termination::Checkmate {
                winner: Color::Black,
            } => Winner::Black,
            _ => Winner::Draw,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Termination::Checkmate {
                winner: Color::White,
            } => "checkmate, White wins",
            Termination::Checkmate {
                winner: Color::Black,
            } => "checkmate, Black wins",
            Termination::Stalemate => "stalemate, draw",
            Termination::FiftyMoveRule => "fifty-move rule, draw",
            Termination::ThreefoldRepetition => "threefold repetition, draw",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    AwaitingMove,
    PromotionPending(PendingPromotion),
    GameOver(Termination),
}

/// Outcome of an accepted move or promotion choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub captured: Option<Piece>,
    /// `None` while the half-move is incomplete (promotion pending).
    pub notation: Option<String>,
    pub opponent_in_check: bool,
    pub terminal: Option<Termination>,
    pub promotion_pending: bool,
}

/// A pawn move parked until the promotion piece is chosen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct ParkedMove {
    record: MoveRecord,
    captured: Option<Piece>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    active: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    /// Pieces captured by each side, indexed by [`Color::idx`].
    captured: [Vec<Piece>; 2],
    status: GameStatus,
    parked: Option<ParkedMove>,
    move_log: Vec<MoveRecord>,
    history: History,
    config: RulesConfig,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    pub fn with_config(config: RulesConfig) -> Self {
        let board = Board::starting_position();
        let castling = CastlingRights::default();
        let initial = HistorySnapshot {
            board,
            active: Color::White,
            captured: [Vec::new(), Vec::new()],
            en_passant: None,
            halfmove_clock: 0,
            castling,
            repetition_keys: vec![repetition_key(&board, Color::White, &castling, None)],
        };

        Game {
            board,
            active: Color::White,
            castling,
            en_passant: None,
            halfmove_clock: 0,
            captured: [Vec::new(), Vec::new()],
            status: GameStatus::AwaitingMove,
            parked: None,
            move_log: Vec::new(),
            history: History::seeded(initial),
            config,
        }
    }

    /// Start from an arbitrary position with no castling rights.
    ///
    /// The position becomes the first history entry, so it cannot be undone
    /// past. Used to set up endgames and test positions.
    pub fn from_position(board: Board, active: Color, config: RulesConfig) -> Self {
        let mut game = Self::with_config(config);
        let lost = SideCastling {
            king_moved: true,
            kingside_rook_moved: true,
            queenside_rook_moved: true,
        };
        game.board = board;
        game.active = active;
        game.castling = CastlingRights {
            white: lost,
            black: lost,
        };
        game.history = History::seeded(game.snapshot(vec![repetition_key(
            &board,
            active,
            &game.castling,
            None,
        )]));
        game
    }

    /// Like [`Game::from_position`] but with explicit castling rights.
    pub fn from_position_with_castling(
        board: Board,
        active: Color,
        castling: CastlingRights,
        config: RulesConfig,
    ) -> Self {
        let mut game = Self::from_position(board, active, config);
        game.castling = castling;
        game.history = History::seeded(game.snapshot(vec![repetition_key(
            &board, active, &castling, None,
        )]));
        game
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Validate and play `from` -> `to` for the side whose piece stands on
    /// `from`.
    pub fn propose_move(&mut self, from: Square, to: Square) -> MoveResult<MoveReport> {
        let mv = Move::new(from, to);
        match self.try_move(mv) {
            Ok(report) => {
                debug!(?mv, notation = ?report.notation, "move accepted");
                Ok(report)
            }
            Err(err) => {
                debug!(?mv, %err, "move rejected");
                Err(err)
            }
        }
    }

    fn try_move(&mut self, mv: Move) -> MoveResult<MoveReport> {
        match self.status {
            GameStatus::GameOver(_) => return Err(MoveError::GameOver),
            GameStatus::PromotionPending(_) => return Err(MoveError::PromotionPending),
            GameStatus::AwaitingMove => {}
        }
        if !mv.from.in_bounds() || !mv.to.in_bounds() {
            return Err(MoveError::InvalidCoordinate);
        }
        let piece = self
            .board
            .piece_at(mv.from)
            .ok_or(MoveError::NoPieceAtSource)?;
        if self.config.enforce_turn_order && piece.color != self.active {
            return Err(MoveError::NotCurrentPlayersTurn);
        }

        let mover = piece.color;
        let kind = validator::classify_move(&self.board, mv, mover, self.en_passant, &self.castling)?;

        // Accepted: nothing below may fail.
        let captured = self.board.make_move(mv);

        self.castling.touch(piece, mv.from);
        if let Some(taken) = captured
            && kind != MoveKind::EnPassant
        {
            self.castling.touch(taken, mv.to);
        }
        self.en_passant = validator::en_passant_target_for(piece, mv.from, mv.to);
        if piece.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if let Some(taken) = captured {
            self.captured[mover.idx()].push(taken);
        }

        let notation = match kind {
            MoveKind::Castle { kingside } => castling_notation(kingside).to_string(),
            MoveKind::EnPassant => en_passant_notation(mv.from, mv.to),
            MoveKind::Normal => move_notation(piece.kind, mv.from, mv.to, captured.is_some()),
        };
        let record = MoveRecord {
            ply: self.move_log.len() + 1,
            color: mover,
            kind: piece.kind,
            from: mv.from,
            to: mv.to,
            notation,
        };

        if validator::is_promotion_move(piece, mv.to) {
            self.status = GameStatus::PromotionPending(PendingPromotion {
                square: mv.to,
                color: mover,
            });
            self.parked = Some(ParkedMove { record, captured });
            return Ok(MoveReport {
                captured,
                notation: None,
                opponent_in_check: false,
                terminal: None,
                promotion_pending: true,
            });
        }

        Ok(self.complete_half_move(record, captured))
    }

    /// Resolve a pending promotion. Only knight, bishop, rook and queen are
    /// accepted.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> MoveResult<MoveReport> {
        let GameStatus::PromotionPending(pending) = self.status else {
            return Err(MoveError::NoPromotionPending);
        };
        if !kind.is_promotion_choice() {
            return Err(MoveError::InvalidPromotionPiece);
        }
        let ParkedMove {
            mut record,
            captured,
        } = self.parked.take().ok_or(MoveError::NoPromotionPending)?;

        self.board
            .set_piece(pending.square, Some(Piece::new(pending.color, kind)));
        self.halfmove_clock = 0;
        record.notation.push_str(&promotion_suffix(kind));
        self.status = GameStatus::AwaitingMove;

        let report = self.complete_half_move(record, captured);
        debug!(square = %pending.square, piece = kind.name(), "promotion chosen");
        Ok(report)
    }

    /// Switch sides, snapshot, log and check for the end of the game.
    fn complete_half_move(&mut self, mut record: MoveRecord, captured: Option<Piece>) -> MoveReport {
        self.active = record.color.other();

        let mut keys = self
            .history
            .top()
            .map(|s| s.repetition_keys.clone())
            .unwrap_or_default();
        keys.push(repetition_key(
            &self.board,
            self.active,
            &self.castling,
            self.en_passant,
        ));
        let snapshot = self.snapshot(keys);
        self.history.push(snapshot);

        let opponent_in_check = validator::is_in_check(&self.board, self.active);
        let terminal = self.evaluate_termination();

        if matches!(terminal, Some(Termination::Checkmate { .. })) {
            record.notation.push('#');
        } else if opponent_in_check {
            record.notation.push('+');
        }
        let notation = record.notation.clone();
        self.move_log.push(record);

        if let Some(t) = terminal {
            info!(result = t.describe(), plies = self.move_log.len(), "game over");
            self.status = GameStatus::GameOver(t);
        }

        MoveReport {
            captured,
            notation: Some(notation),
            opponent_in_check,
            terminal,
            promotion_pending: false,
        }
    }

    fn evaluate_termination(&self) -> Option<Termination> {
        let draw = || {
            if self.config.fifty_move_rule && self.halfmove_clock >= 100 {
                return Some(Termination::FiftyMoveRule);
            }
            if self.config.threefold_repetition
                && let Some(key) = self.history.top().and_then(HistorySnapshot::current_key)
                && self.history.repetition_count(key) >= 3
            {
                return Some(Termination::ThreefoldRepetition);
            }
            None
        };
        let decisive = || {
            if validator::is_checkmate(&self.board, self.active, self.en_passant, &self.castling) {
                return Some(Termination::Checkmate {
                    winner: self.active.other(),
                });
            }
            if validator::is_stalemate(&self.board, self.active, self.en_passant, &self.castling) {
                return Some(Termination::Stalemate);
            }
            None
        };

        if self.config.checkmate_precedence {
            decisive().or_else(draw)
        } else {
            draw().or_else(decisive)
        }
    }

    /// Take back the last completed half-move.
    pub fn undo(&mut self) -> MoveResult<()> {
        match self.status {
            GameStatus::GameOver(_) => return Err(MoveError::GameOver),
            GameStatus::PromotionPending(_) => return Err(MoveError::PromotionPending),
            GameStatus::AwaitingMove => {}
        }
        let Some(previous) = self.history.pop_for_undo().cloned() else {
            return Err(MoveError::UndoUnavailable);
        };
        self.restore(previous);
        let undone = self.move_log.pop();
        debug!(undone = ?undone.map(|r| r.notation), "undo");
        Ok(())
    }

    fn restore(&mut self, snapshot: HistorySnapshot) {
        self.board = snapshot.board;
        self.active = snapshot.active;
        self.captured = snapshot.captured;
        self.en_passant = snapshot.en_passant;
        self.halfmove_clock = snapshot.halfmove_clock;
        self.castling = snapshot.castling;
        self.status = GameStatus::AwaitingMove;
        self.parked = None;
    }

    fn snapshot(&self, repetition_keys: Vec<RepetitionKey>) -> HistorySnapshot {
        HistorySnapshot {
            board: self.board,
            active: self.active,
            captured: self.captured.clone(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            castling: self.castling,
            repetition_keys,
        }
    }

    /// Back to the starting position, keeping the rule configuration.
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config);
        debug!("game reset");
    }

    pub fn set_enforce_turn_order(&mut self, enforce: bool) {
        self.config.enforce_turn_order = enforce;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_player(&self) -> Color {
        self.active
    }

    /// Whether the side to move is in check.
    pub fn in_check(&self) -> bool {
        validator::is_in_check(&self.board, self.active)
    }

    pub fn notation_history(&self) -> Vec<&str> {
        self.move_log.iter().map(|r| r.notation.as_str()).collect()
    }

    pub fn move_log(&self) -> &[MoveRecord] {
        &self.move_log
    }

    /// Pieces captured by `color`.
    pub fn captured(&self, color: Color) -> &[Piece] {
        &self.captured[color.idx()]
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        match self.status {
            GameStatus::PromotionPending(p) => Some(p),
            _ => None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Winner> {
        match self.status {
            GameStatus::GameOver(t) => Some(t.winner()),
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver(_))
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn castling_rights(&self) -> &CastlingRights {
        &self.castling
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// Legal moves for the side to move; empty unless a move is awaited.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.status != GameStatus::AwaitingMove {
            return Vec::new();
        }
        validator::legal_moves(&self.board, self.active, self.en_passant, &self.castling)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
