use crate::game::Game;
use crate::types::{Move, PieceKind};

const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Pure perft node count.
/// Counts all positions reachable from `game` in exactly `depth` half-moves,
/// driving every move through [`Game::propose_move`]. Each promotion counts
/// once per piece choice; finished games have no successors.
pub fn perft(game: &Game, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    game.legal_moves()
        .into_iter()
        .map(|mv| children(game, mv).map(|g| perft(&g, depth - 1)).sum::<u64>())
        .sum()
}

/// Per-root-move node counts, in legal move order.
pub fn divide(game: &Game, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    game.legal_moves()
        .into_iter()
        .map(|mv| {
            let nodes = children(game, mv).map(|g| perft(&g, depth - 1)).sum();
            (mv, nodes)
        })
        .collect()
}

/// Games after playing `mv`, one per promotion choice when it promotes.
fn children(game: &Game, mv: Move) -> impl Iterator<Item = Game> {
    let mut after = game.clone();
    let played = after.propose_move(mv.from, mv.to);

    let games: Vec<Game> = match played {
        Ok(report) if report.promotion_pending => PROMOTION_CHOICES
            .iter()
            .filter_map(|&kind| {
                let mut promoted = after.clone();
                promoted.choose_promotion(kind).ok().map(|_| promoted)
            })
            .collect(),
        Ok(_) => vec![after],
        Err(_) => Vec::new(),
    };
    games.into_iter()
}
