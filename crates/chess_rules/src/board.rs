use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::*;

/// Moved-flags for one side. Castling on a wing needs the king and that
/// wing's rook both unmoved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideCastling {
    pub king_moved: bool,
    pub kingside_rook_moved: bool,
    pub queenside_rook_moved: bool,
}

impl SideCastling {
    pub fn can_castle_kingside(&self) -> bool {
        !self.king_moved && !self.kingside_rook_moved
    }
    pub fn can_castle_queenside(&self) -> bool {
        !self.king_moved && !self.queenside_rook_moved
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white: SideCastling,
    pub black: SideCastling,
}

impl CastlingRights {
    pub fn for_color(&self, c: Color) -> &SideCastling {
        match c {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
    pub fn for_color_mut(&mut self, c: Color) -> &mut SideCastling {
        match c {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Record that the piece standing on `sq` left it (or was captured there).
    /// Only king and corner-rook home squares matter.
    pub fn touch(&mut self, piece: Piece, sq: Square) {
        let home = piece.color.home_row();
        let side = self.for_color_mut(piece.color);
        match piece.kind {
            PieceKind::King => side.king_moved = true,
            PieceKind::Rook if sq.row == home && sq.col == 7 => side.kingside_rook_moved = true,
            PieceKind::Rook if sq.row == home && sq.col == 0 => side.queenside_rook_moved = true,
            _ => {}
        }
    }
}

/// 8x8 grid of squares. `None` marks an empty square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    pub fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
        }
    }

    pub fn starting_position() -> Self {
        let mut b = Board::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            b.set_piece(Square::new(0, col), Some(Piece::new(Color::Black, kind)));
            b.set_piece(
                Square::new(1, col),
                Some(Piece::new(Color::Black, PieceKind::Pawn)),
            );
            b.set_piece(
                Square::new(6, col),
                Some(Piece::new(Color::White, PieceKind::Pawn)),
            );
            b.set_piece(Square::new(7, col), Some(Piece::new(Color::White, kind)));
        }
        b
    }

    /// Builder used by tests and setups: place a piece and return the board.
    pub fn with(mut self, sq: Square, piece: Piece) -> Self {
        self.set_piece(sq, Some(piece));
        self
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.row as usize][sq.col as usize]
    }

    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.grid[sq.row as usize][sq.col as usize] = pc;
    }

    /// Remove and return whatever stands on `sq`.
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.grid[sq.row as usize][sq.col as usize].take()
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Move whatever stands on `from` to `to`, returning the displaced piece.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moving = self.take(from);
        let displaced = self.take(to);
        self.set_piece(to, moving);
        displaced
    }

    /// Play `mv` on the board and return the captured piece.
    ///
    /// Handles the two moves that touch a third square: a king stepping two
    /// columns also hops the matching corner rook, and a pawn moving
    /// diagonally onto an empty square removes the pawn beside it
    /// (en passant). No legality checks are made.
    pub fn make_move(&mut self, mv: Move) -> Option<Piece> {
        let moved = self.piece_at(mv.from)?;
        let mut captured = None;

        if moved.kind == PieceKind::Pawn && mv.col_delta() != 0 && self.is_empty(mv.to) {
            captured = self.take(Square::new(mv.from.row, mv.to.col));
        }

        if moved.kind == PieceKind::King && mv.row_delta() == 0 && mv.col_delta().abs() == 2 {
            let (rook_from, rook_to) = if mv.col_delta() > 0 { (7, 5) } else { (0, 3) };
            self.relocate(
                Square::new(mv.from.row, rook_from),
                Square::new(mv.from.row, rook_to),
            );
        }

        let displaced = self.relocate(mv.from, mv.to);
        captured.or(displaced)
    }

    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.pieces(c)
            .find(|(_, pc)| pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Occupied squares with their pieces, row by row from row 0.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn pieces(&self, c: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, pc)| pc.color == c)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let c = self
                    .piece_at(Square::new(row, col))
                    .map(Piece::to_char)
                    .unwrap_or('.');
                write!(f, "{c}")?;
                if col < 7 {
                    f.write_str(" ")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
