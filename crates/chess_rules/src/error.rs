//! Rejection reasons for move proposals, promotion choices and undo.
//!
//! Every variant is a recoverable, local rejection: the game state is left
//! exactly as it was before the call.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("coordinates are off the board")]
    InvalidCoordinate,

    #[error("there is no piece on the source square")]
    NoPieceAtSource,

    #[error("it is not that player's turn")]
    NotCurrentPlayersTurn,

    #[error("cannot capture your own piece")]
    DestinationOccupiedByOwnPiece,

    #[error("the piece cannot move that way")]
    IllegalGeometry,

    #[error("the move would leave your king in check")]
    ExposesOwnKing,

    #[error("castling is not allowed")]
    IllegalCastling,

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("a promotion choice is pending")]
    PromotionPending,

    #[error("a pawn cannot promote to that piece")]
    InvalidPromotionPiece,

    #[error("the game is over")]
    GameOver,

    #[error("nothing to undo")]
    UndoUnavailable,
}

/// Result type alias for game operations
pub type MoveResult<T> = Result<T, MoveError>;
