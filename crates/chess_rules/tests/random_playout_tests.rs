//! Seeded random games checking engine invariants after every half-move.

use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

use chess_rules::{Color, Game, GameStatus, Move, PieceKind, Square, validator};

const GAMES: u64 = 24;
const MAX_PLIES: usize = 200;

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

fn random_square(rng: &mut StdRng) -> Square {
    Square::new(rng.gen_range(0..8), rng.gen_range(0..8))
}

fn check_position(game: &Game) {
    let board = game.board();
    for color in [Color::White, Color::Black] {
        let kings = board
            .pieces(color)
            .filter(|(_, pc)| pc.kind == PieceKind::King)
            .count();
        assert_eq!(kings, 1, "{color} should have exactly one king");
        assert!(board.pieces(color).count() <= 16);
    }

    if game.status() != GameStatus::AwaitingMove {
        return;
    }
    for (sq, pc) in board.occupied() {
        if pc.kind == PieceKind::Pawn {
            assert!(sq.row != 0 && sq.row != 7, "pawn left on {sq}");
        }
    }

    let mover = game.active_player().other();
    assert!(
        !validator::is_in_check(board, mover),
        "{mover} left its own king in check"
    );
    assert_eq!(game.history().len(), game.move_log().len() + 1);
    assert!(game.halfmove_clock() <= 100);
    if let Some(ep) = game.en_passant_target() {
        assert!(ep.row == 2 || ep.row == 5, "en passant target on {ep}");
    }
}

fn assert_same_state(a: &Game, b: &Game) {
    assert_eq!(a.board(), b.board());
    assert_eq!(a.active_player(), b.active_player());
    assert_eq!(a.en_passant_target(), b.en_passant_target());
    assert_eq!(a.castling_rights(), b.castling_rights());
    assert_eq!(a.halfmove_clock(), b.halfmove_clock());
    assert_eq!(a.captured(Color::White), b.captured(Color::White));
    assert_eq!(a.captured(Color::Black), b.captured(Color::Black));
    assert_eq!(a.history(), b.history());
    assert_eq!(a.move_log(), b.move_log());
}

fn play_random_game(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();

    for _ in 0..MAX_PLIES {
        if game.is_game_over() {
            break;
        }
        let legal = game.legal_moves();
        assert!(!legal.is_empty(), "no legal moves but game is not over");

        // An arbitrary non-legal request is refused without side effects.
        let probe = Move::new(random_square(&mut rng), random_square(&mut rng));
        if !legal.contains(&probe) {
            let before = game.clone();
            assert!(game.propose_move(probe.from, probe.to).is_err());
            assert_same_state(&game, &before);
        }

        let Some(&mv) = legal.choose(&mut rng) else {
            break;
        };
        let before = game.clone();
        let report = game
            .propose_move(mv.from, mv.to)
            .unwrap_or_else(|e| panic!("seed {seed}: legal move {mv} rejected: {e}"));
        if report.promotion_pending {
            let Some(&kind) = PROMOTIONS.choose(&mut rng) else {
                break;
            };
            game.choose_promotion(kind).unwrap();
        }
        check_position(&game);

        if !game.is_game_over() {
            let mut undone = game.clone();
            undone.undo().unwrap();
            assert_same_state(&undone, &before);
        }
    }
}

#[test]
fn random_playouts_keep_invariants() {
    (0..GAMES).into_par_iter().for_each(play_random_game);
}

#[test]
fn random_playouts_are_deterministic() {
    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new();
        for _ in 0..40 {
            let legal = game.legal_moves();
            let Some(&mv) = legal.choose(&mut rng) else {
                break;
            };
            if game.propose_move(mv.from, mv.to).is_ok_and(|r| r.promotion_pending) {
                game.choose_promotion(PieceKind::Queen).unwrap();
            }
        }
        game.notation_history().join(" ")
    };
    assert_eq!(run(7), run(7));
}
