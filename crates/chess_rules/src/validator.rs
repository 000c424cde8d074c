//! Move legality: per-piece geometry, attack detection and king safety.
//!
//! Every function here is pure over `&Board`. Anything that needs to "try" a
//! move does so on a copy of the board, so the caller's board can never be
//! observed in a half-played state.

use crate::board::{Board, CastlingRights};
use crate::error::MoveError;
use crate::types::*;

/// How an accepted move is carried out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    EnPassant,
    Castle { kingside: bool },
}

/// Geometric legality of moving the piece on `from` to `to`.
///
/// Does not consider whose turn it is or whether the mover's king ends up
/// in check. A king's two-column step along its row is accepted here and
/// left to [`is_valid_castling`].
pub fn is_valid_move(
    board: &Board,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> bool {
    if !from.in_bounds() || !to.in_bounds() {
        return false;
    }
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if from == to {
        return false;
    }
    if let Some(dest) = board.piece_at(to)
        && dest.color == piece.color
    {
        return false;
    }

    reaches(board, piece, from, to, en_passant)
        || (piece.kind == PieceKind::King && is_castling_shape(from, to))
}

/// Per-piece movement rule, assuming `from != to` and `to` is not held by
/// the mover's own piece.
fn reaches(
    board: &Board,
    piece: Piece,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> bool {
    let dr = to.row as i8 - from.row as i8;
    let dc = to.col as i8 - from.col as i8;

    match piece.kind {
        PieceKind::Pawn => pawn_reaches(board, piece.color, from, to, en_passant),
        PieceKind::Rook => (dr == 0 || dc == 0) && path_clear(board, from, to),
        PieceKind::Bishop => dr.abs() == dc.abs() && path_clear(board, from, to),
        PieceKind::Queen => {
            (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && path_clear(board, from, to)
        }
        PieceKind::Knight => {
            let (r, c) = (dr.abs(), dc.abs());
            (r == 1 && c == 2) || (r == 2 && c == 1)
        }
        PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
    }
}

fn pawn_reaches(
    board: &Board,
    color: Color,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> bool {
    let dir = color.pawn_direction();
    let dr = to.row as i8 - from.row as i8;
    let dc = to.col as i8 - from.col as i8;

    if dc == 0 {
        if dr == dir {
            return board.is_empty(to);
        }
        if dr == 2 * dir && from.row == color.pawn_start_row() {
            let jumped = Square::new((from.row as i8 + dir) as u8, from.col);
            return board.is_empty(jumped) && board.is_empty(to);
        }
        return false;
    }

    if dc.abs() == 1 && dr == dir {
        return match board.piece_at(to) {
            Some(target) => target.color != color,
            None => en_passant == Some(to),
        };
    }

    false
}

fn is_castling_shape(from: Square, to: Square) -> bool {
    from.row == to.row && (to.col as i8 - from.col as i8).abs() == 2
}

/// True if no piece stands strictly between `from` and `to`.
///
/// Squares that share neither a line nor a diagonal have no path.
pub fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let dr = to.row as i8 - from.row as i8;
    let dc = to.col as i8 - from.col as i8;
    if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
        return false;
    }

    let (step_r, step_c) = (dr.signum(), dc.signum());
    let mut cur = from.offset(step_r, step_c);
    while let Some(sq) = cur {
        if sq == to {
            return true;
        }
        if !board.is_empty(sq) {
            return false;
        }
        cur = sq.offset(step_r, step_c);
    }
    true
}

/// Whether any `attacker` piece could capture on `square` by its movement
/// rule. Pure reachability: king safety of the attacker is never consulted.
///
/// Pawns cover their two forward diagonals whether or not anything stands
/// there, and never the square straight ahead.
pub fn is_square_under_attack(board: &Board, square: Square, attacker: Color) -> bool {
    if let Some(pc) = board.piece_at(square)
        && pc.color == attacker
    {
        return false;
    }
    board.pieces(attacker).any(|(from, pc)| {
        if from == square {
            return false;
        }
        if pc.kind == PieceKind::Pawn {
            let dr = square.row as i8 - from.row as i8;
            let dc = square.col as i8 - from.col as i8;
            return dr == pc.color.pawn_direction() && dc.abs() == 1;
        }
        reaches(board, pc, from, square, None)
    })
}

/// A side without a king is never in check.
pub fn is_in_check(board: &Board, player: Color) -> bool {
    match board.king_square(player) {
        Some(ksq) => is_square_under_attack(board, ksq, player.other()),
        None => false,
    }
}

/// Whether playing `mv` would leave `player`'s king attacked.
///
/// The move is played on a copy, including the pawn removed by an en passant
/// capture and the rook hop of a castle.
pub fn would_leave_king_in_check(board: &Board, mv: Move, player: Color) -> bool {
    let mut after = *board;
    after.make_move(mv);
    is_in_check(&after, player)
}

/// Every legal move for `player`, scanning all from/to square pairs.
pub fn legal_moves(
    board: &Board,
    player: Color,
    en_passant: Option<Square>,
    castling: &CastlingRights,
) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for (from, _) in board.pieces(player) {
        for to in Square::all() {
            if !is_valid_move(board, from, to, en_passant) {
                continue;
            }
            let legal = if is_castling_move(board, from, to) {
                is_valid_castling(board, from, to, player, castling)
            } else {
                !would_leave_king_in_check(board, Move::new(from, to), player)
            };
            if legal {
                out.push(Move::new(from, to));
            }
        }
    }
    out
}

fn has_legal_move(
    board: &Board,
    player: Color,
    en_passant: Option<Square>,
    castling: &CastlingRights,
) -> bool {
    !legal_moves(board, player, en_passant, castling).is_empty()
}

pub fn is_checkmate(
    board: &Board,
    player: Color,
    en_passant: Option<Square>,
    castling: &CastlingRights,
) -> bool {
    is_in_check(board, player) && !has_legal_move(board, player, en_passant, castling)
}

pub fn is_stalemate(
    board: &Board,
    player: Color,
    en_passant: Option<Square>,
    castling: &CastlingRights,
) -> bool {
    !is_in_check(board, player) && !has_legal_move(board, player, en_passant, castling)
}

/// A king stepping two columns along its row.
pub fn is_castling_move(board: &Board, from: Square, to: Square) -> bool {
    matches!(board.piece_at(from), Some(pc) if pc.kind == PieceKind::King)
        && is_castling_shape(from, to)
}

/// Full castling legality for `player`'s king moving `from` -> `to`.
pub fn is_valid_castling(
    board: &Board,
    from: Square,
    to: Square,
    player: Color,
    castling: &CastlingRights,
) -> bool {
    let home = player.home_row();
    if board.piece_at(from) != Some(Piece::new(player, PieceKind::King))
        || from != Square::new(home, 4)
        || !is_castling_shape(from, to)
    {
        return false;
    }

    let kingside = to.col > from.col;
    let side = castling.for_color(player);
    let unmoved = if kingside {
        side.can_castle_kingside()
    } else {
        side.can_castle_queenside()
    };
    if !unmoved {
        return false;
    }

    let rook_sq = Square::new(home, if kingside { 7 } else { 0 });
    if board.piece_at(rook_sq) != Some(Piece::new(player, PieceKind::Rook))
        || !path_clear(board, from, rook_sq)
    {
        return false;
    }

    if is_in_check(board, player) {
        return false;
    }

    // The king may not cross or land on an attacked square.
    let step: i8 = if kingside { 1 } else { -1 };
    for dist in 1..=2 {
        let Some(probe) = from.offset(0, step * dist) else {
            return false;
        };
        let mut test = *board;
        test.relocate(from, probe);
        if is_in_check(&test, player) {
            return false;
        }
    }
    true
}

pub fn is_en_passant_move(
    board: &Board,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    piece.kind == PieceKind::Pawn
        && to.row as i8 - from.row as i8 == piece.color.pawn_direction()
        && (to.col as i8 - from.col as i8).abs() == 1
        && board.is_empty(to)
        && en_passant == Some(to)
}

/// Square jumped over by a pawn's double step from its start row.
/// Any other move yields no target.
pub fn en_passant_target_for(piece: Piece, from: Square, to: Square) -> Option<Square> {
    if piece.kind != PieceKind::Pawn || from.col != to.col {
        return None;
    }
    let dir = piece.color.pawn_direction();
    if from.row == piece.color.pawn_start_row() && to.row as i8 - from.row as i8 == 2 * dir {
        Some(Square::new((from.row as i8 + dir) as u8, from.col))
    } else {
        None
    }
}

/// A pawn arriving on the row farthest from its own side.
pub fn is_promotion_move(piece: Piece, to: Square) -> bool {
    piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row()
}

/// Run every check a proposed move must pass and report how to play it.
///
/// Turn order is the caller's concern; `player` is the side whose king must
/// stay safe.
pub fn classify_move(
    board: &Board,
    mv: Move,
    player: Color,
    en_passant: Option<Square>,
    castling: &CastlingRights,
) -> Result<MoveKind, MoveError> {
    if !mv.from.in_bounds() || !mv.to.in_bounds() {
        return Err(MoveError::InvalidCoordinate);
    }
    let piece = board.piece_at(mv.from).ok_or(MoveError::NoPieceAtSource)?;
    if mv.from == mv.to {
        return Err(MoveError::IllegalGeometry);
    }
    if let Some(dest) = board.piece_at(mv.to)
        && dest.color == piece.color
    {
        return Err(MoveError::DestinationOccupiedByOwnPiece);
    }

    if is_castling_move(board, mv.from, mv.to) {
        return if is_valid_castling(board, mv.from, mv.to, player, castling) {
            Ok(MoveKind::Castle {
                kingside: mv.to.col > mv.from.col,
            })
        } else {
            Err(MoveError::IllegalCastling)
        };
    }

    if !is_valid_move(board, mv.from, mv.to, en_passant) {
        return Err(MoveError::IllegalGeometry);
    }
    if would_leave_king_in_check(board, mv, player) {
        return Err(MoveError::ExposesOwnKing);
    }

    if is_en_passant_move(board, mv.from, mv.to, en_passant) {
        Ok(MoveKind::EnPassant)
    } else {
        Ok(MoveKind::Normal)
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod validator_tests;
