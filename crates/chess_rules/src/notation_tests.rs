use super::*;

fn sq(name: &str) -> Square {
    Square::parse(name).unwrap()
}

#[test]
fn test_pawn_notation() {
    assert_eq!(move_notation(PieceKind::Pawn, sq("e2"), sq("e4"), false), "e4");
    assert_eq!(move_notation(PieceKind::Pawn, sq("e4"), sq("d5"), true), "exd5");
}

#[test]
fn test_piece_notation() {
    assert_eq!(move_notation(PieceKind::Knight, sq("g1"), sq("f3"), false), "Nf3");
    assert_eq!(move_notation(PieceKind::Bishop, sq("c3"), sq("e5"), true), "Bxe5");
    assert_eq!(move_notation(PieceKind::King, sq("e1"), sq("e2"), false), "Ke2");
    assert_eq!(move_notation(PieceKind::Queen, sq("d1"), sq("h5"), true), "Qxh5");
    assert_eq!(move_notation(PieceKind::Rook, sq("a1"), sq("a8"), false), "Ra8");
}

#[test]
fn test_special_notation() {
    assert_eq!(castling_notation(true), "O-O");
    assert_eq!(castling_notation(false), "O-O-O");
    assert_eq!(en_passant_notation(sq("e5"), sq("d6")), "exd6 e.p.");
    assert_eq!(promotion_suffix(PieceKind::Queen), "=Q");
    assert_eq!(promotion_suffix(PieceKind::Knight), "=N");
}

#[test]
fn test_move_record_display() {
    let record = MoveRecord {
        ply: 1,
        color: Color::White,
        kind: PieceKind::Pawn,
        from: sq("e2"),
        to: sq("e4"),
        notation: "e4".to_string(),
    };
    assert_eq!(record.to_string(), "1. W pawn (6,4)→(4,4) [e4]");
}
