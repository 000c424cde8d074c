//! Tests for game endings driven through the public `Game` API
//!
//! - Stalemate
//! - Fifty-move rule
//! - Threefold repetition
//! - Precedence between draw counters and checkmate

use chess_rules::{
    Board, Color, Game, GameStatus, MoveError, Piece, PieceKind, RulesConfig, Square,
    Termination, Winner,
};

fn sq(name: &str) -> Square {
    Square::parse(name).unwrap()
}

fn mv(game: &mut Game, from: &str, to: &str) -> Option<Termination> {
    game.propose_move(sq(from), sq(to))
        .unwrap_or_else(|e| panic!("{from}{to} rejected: {e}"))
        .terminal
}

/// Black Kh8, White Kg6 and Ra1, Black to move. Rook shuffles on the first
/// rank while the black king steps between h8 and g8.
fn rook_endgame(config: RulesConfig) -> Game {
    let board = Board::empty()
        .with(sq("h8"), Piece::new(Color::Black, PieceKind::King))
        .with(sq("g6"), Piece::new(Color::White, PieceKind::King))
        .with(sq("a1"), Piece::new(Color::White, PieceKind::Rook));
    Game::from_position(board, Color::Black, config)
}

/// 96 quiet half-moves that return to the starting layout.
fn shuffle_96(game: &mut Game) {
    for _ in 0..24 {
        assert_eq!(mv(game, "h8", "g8"), None);
        assert_eq!(mv(game, "a1", "b1"), None);
        assert_eq!(mv(game, "g8", "h8"), None);
        assert_eq!(mv(game, "b1", "a1"), None);
    }
    assert_eq!(game.halfmove_clock(), 96);
}

// =============================================================================
// Stalemate Tests
// =============================================================================

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    // White Kf6 and pawn g7 vs Black Kg8; Kg6 leaves Black without a move.
    let board = Board::empty()
        .with(sq("g8"), Piece::new(Color::Black, PieceKind::King))
        .with(sq("g7"), Piece::new(Color::White, PieceKind::Pawn))
        .with(sq("f6"), Piece::new(Color::White, PieceKind::King));
    let mut game = Game::from_position(board, Color::White, RulesConfig::default());

    assert_eq!(mv(&mut game, "f6", "g6"), Some(Termination::Stalemate));
    assert_eq!(game.winner(), Some(Winner::Draw));
    assert!(!game.in_check());
}

// =============================================================================
// Fifty-Move Rule Tests
// =============================================================================

#[test]
fn test_fifty_move_rule_at_one_hundred_half_moves() {
    let config = RulesConfig {
        threefold_repetition: false,
        ..RulesConfig::default()
    };
    let mut game = rook_endgame(config);
    shuffle_96(&mut game);

    assert_eq!(mv(&mut game, "h8", "g8"), None);
    assert_eq!(mv(&mut game, "a1", "b1"), None);
    assert_eq!(mv(&mut game, "g8", "h8"), None);
    assert_eq!(game.halfmove_clock(), 99);
    assert_eq!(mv(&mut game, "b1", "c1"), Some(Termination::FiftyMoveRule));
    assert_eq!(game.winner(), Some(Winner::Draw));
    assert_eq!(
        game.propose_move(sq("h8"), sq("g8")),
        Err(MoveError::GameOver)
    );
}

#[test]
fn test_pawn_move_resets_clock() {
    let mut game = Game::new();
    mv(&mut game, "g1", "f3");
    mv(&mut game, "g8", "f6");
    assert_eq!(game.halfmove_clock(), 2);
    mv(&mut game, "e2", "e3");
    assert_eq!(game.halfmove_clock(), 0);
}

#[test]
fn test_fifty_move_rule_can_be_disabled() {
    let config = RulesConfig {
        threefold_repetition: false,
        fifty_move_rule: false,
        ..RulesConfig::default()
    };
    let mut game = rook_endgame(config);
    shuffle_96(&mut game);
    shuffle_96(&mut game);
    assert!(!game.is_game_over());
    assert_eq!(game.halfmove_clock(), 192);
}

// =============================================================================
// Checkmate vs. draw counters
// =============================================================================

#[test]
fn test_draw_counter_wins_by_default() {
    let config = RulesConfig {
        threefold_repetition: false,
        ..RulesConfig::default()
    };
    let mut game = rook_endgame(config);
    shuffle_96(&mut game);
    mv(&mut game, "h8", "g8");
    mv(&mut game, "a1", "b1");
    mv(&mut game, "g8", "h8");

    // Rb8 is mate, but it is also the hundredth quiet half-move.
    assert_eq!(mv(&mut game, "b1", "b8"), Some(Termination::FiftyMoveRule));
    assert_eq!(game.notation_history().last(), Some(&"Rb8+"));
}

#[test]
fn test_checkmate_precedence_switch() {
    let config = RulesConfig {
        threefold_repetition: false,
        checkmate_precedence: true,
        ..RulesConfig::default()
    };
    let mut game = rook_endgame(config);
    shuffle_96(&mut game);
    mv(&mut game, "h8", "g8");
    mv(&mut game, "a1", "b1");
    mv(&mut game, "g8", "h8");

    let mate = Termination::Checkmate {
        winner: Color::White,
    };
    assert_eq!(mv(&mut game, "b1", "b8"), Some(mate));
    assert_eq!(game.status(), GameStatus::GameOver(mate));
    assert_eq!(game.notation_history().last(), Some(&"Rb8#"));
}

// =============================================================================
// Threefold Repetition Tests
// =============================================================================

#[test]
fn test_threefold_in_endgame() {
    let mut game = rook_endgame(RulesConfig::default());

    // The starting layout recurs after every fourth half-move.
    for (from, to) in [("h8", "g8"), ("a1", "b1"), ("g8", "h8"), ("b1", "a1")] {
        assert_eq!(mv(&mut game, from, to), None);
    }
    assert_eq!(mv(&mut game, "h8", "g8"), None);
    assert_eq!(mv(&mut game, "a1", "b1"), None);
    assert_eq!(mv(&mut game, "g8", "h8"), None);
    assert_eq!(
        mv(&mut game, "b1", "a1"),
        Some(Termination::ThreefoldRepetition)
    );
    assert_eq!(game.history().len(), 9);
}

#[test]
fn test_threefold_counts_current_position() {
    let mut game = Game::new();
    let shuffle = [("b1", "c3"), ("b8", "c6"), ("c3", "b1"), ("c6", "b8")];
    for (from, to) in shuffle {
        assert_eq!(mv(&mut game, from, to), None);
    }
    for (from, to) in &shuffle[..3] {
        assert_eq!(mv(&mut game, from, to), None);
    }
    assert_eq!(
        mv(&mut game, "c6", "b8"),
        Some(Termination::ThreefoldRepetition)
    );
}

#[test]
fn test_undo_restores_repetition_keys() {
    let mut game = Game::new();
    let shuffle = [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")];
    for (from, to) in shuffle {
        mv(&mut game, from, to);
    }
    for (from, to) in &shuffle[..3] {
        mv(&mut game, from, to);
    }

    // Undo and replay the last knight move: still only the third occurrence
    // on the final ply.
    game.undo().unwrap();
    assert_eq!(mv(&mut game, "f3", "g1"), None);
    assert_eq!(mv(&mut game, "f6", "g8"), Some(Termination::ThreefoldRepetition));
}
