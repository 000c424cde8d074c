//! Text output for the terminal.

use chess_rules::{Color, Game, GameStatus, MoveReport};
use std::fmt::Write;

pub fn render_board(game: &Game) -> String {
    format!("{}\n{}", game.board(), render_status(game))
}

pub fn render_status(game: &Game) -> String {
    match game.status() {
        GameStatus::GameOver(t) => format!("Game over: {}", t.describe()),
        GameStatus::PromotionPending(p) => {
            format!("{} to choose a promotion piece for {} (q, r, b or n)", p.color, p.square)
        }
        GameStatus::AwaitingMove => {
            let mut line = format!("{} to move", game.active_player());
            if game.in_check() {
                line.push_str(" (check)");
            }
            if !game.config().enforce_turn_order {
                line.push_str(" [turn order off]");
            }
            line
        }
    }
}

pub fn render_report(report: &MoveReport) -> String {
    let mut out = String::new();
    match &report.notation {
        Some(notation) => out.push_str(notation),
        None => out.push_str("Promotion pending: choose q, r, b or n"),
    }
    if let Some(piece) = report.captured {
        let _ = write!(out, " (captured {piece})");
    }
    if let Some(t) = report.terminal {
        let _ = write!(out, "\nGame over: {}", t.describe());
    }
    out
}

/// Numbered move pairs, `1. e4 e5`.
pub fn render_history(game: &Game) -> String {
    let notation = game.notation_history();
    if notation.is_empty() {
        return "No moves yet".to_string();
    }
    let first = game.move_log().first().map(|r| r.color);
    let mut out = String::new();
    let mut plies = notation.iter();
    let mut number = 1;
    if first == Some(Color::Black)
        && let Some(reply) = plies.next()
    {
        let _ = writeln!(out, "1... {reply}");
        number = 2;
    }
    while let Some(white) = plies.next() {
        let _ = write!(out, "{number}. {white}");
        if let Some(black) = plies.next() {
            let _ = write!(out, " {black}");
        }
        out.push('\n');
        number += 1;
    }
    out.trim_end().to_string()
}

pub fn render_log(game: &Game) -> String {
    if game.move_log().is_empty() {
        return "No moves yet".to_string();
    }
    game.move_log()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_captured(game: &Game) -> String {
    [Color::White, Color::Black]
        .iter()
        .map(|&color| {
            let pieces: Vec<String> = game
                .captured(color)
                .iter()
                .map(|p| p.to_char().to_string())
                .collect();
            let list = if pieces.is_empty() {
                "-".to_string()
            } else {
                pieces.join(" ")
            };
            format!("{color} captured: {list}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_moves(game: &Game) -> String {
    let moves = game.legal_moves();
    if moves.is_empty() {
        return "No legal moves".to_string();
    }
    let list: Vec<String> = moves.iter().map(ToString::to_string).collect();
    format!("{} legal moves: {}", list.len(), list.join(" "))
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
