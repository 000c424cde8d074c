use chess_rules::{PieceKind, Square, coord_to_sq};
use std::path::PathBuf;
use thiserror::Error;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move {
        from: Square,
        to: Square,
        /// Chosen up front with a trailing letter, as in `e7e8q`.
        promotion: Option<PieceKind>,
    },
    Promote(PieceKind),
    Undo,
    Reset,
    Board,
    History,
    Log,
    Captured,
    Status,
    Moves,
    Save(Option<PathBuf>),
    Load(Option<PathBuf>),
    Turns(bool),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command `{0}` (type `help` for a list)")]
    Unknown(String),
    #[error("`{0}` is not a square like e2")]
    BadSquare(String),
    #[error("`{0}` is not a promotion piece (q, r, b or n)")]
    BadPiece(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
Commands:
  e2e4 | move e2 e4     move a piece (add q/r/b/n to promote, e.g. e7e8q)
  promote <q|r|b|n>     choose the piece for a pending promotion
  undo                  take back the last half-move
  reset                 start a new game
  board                 show the board
  history               show the moves in notation
  log                   show the detailed move log
  captured              show captured pieces
  status                show whose turn it is and the game state
  moves                 list legal moves
  save [path]           save the game as JSON
  load [path]           load a saved game
  turns on|off          enforce or relax turn order
  help                  show this help
  quit                  exit";

/// Parse a line. Blank lines give `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = parts.split_first() else {
        return Ok(None);
    };

    let cmd = match head.to_ascii_lowercase().as_str() {
        "move" | "m" => match args {
            [from, to] => move_command(from, to, None)?,
            [from, to, piece] => move_command(from, to, Some(*piece))?,
            _ => return Err(ParseError::Usage("move <from> <to> [q|r|b|n]")),
        },
        "promote" | "p" => match args {
            [piece] => Command::Promote(parse_piece(piece)?),
            _ => return Err(ParseError::Usage("promote <q|r|b|n>")),
        },
        "undo" | "u" => Command::Undo,
        "reset" | "new" => Command::Reset,
        "board" | "b" => Command::Board,
        "history" | "h" => Command::History,
        "log" => Command::Log,
        "captured" => Command::Captured,
        "status" | "s" => Command::Status,
        "moves" => Command::Moves,
        "save" => Command::Save(args.first().map(PathBuf::from)),
        "load" => Command::Load(args.first().map(PathBuf::from)),
        "turns" => match args {
            ["on"] => Command::Turns(true),
            ["off"] => Command::Turns(false),
            _ => return Err(ParseError::Usage("turns on|off")),
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ if args.is_empty() => parse_coordinate_move(head)?,
        _ => return Err(ParseError::Unknown(head.to_string())),
    };
    Ok(Some(cmd))
}

/// `e2e4` or `e7e8q`.
fn parse_coordinate_move(txt: &str) -> Result<Command, ParseError> {
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return Err(ParseError::Unknown(txt.to_string()));
    }
    let from = &txt[0..2];
    let to = &txt[2..4];
    if coord_to_sq(from).is_none() {
        return Err(ParseError::Unknown(txt.to_string()));
    }
    move_command(from, to, txt.get(4..).filter(|p| !p.is_empty()))
}

fn move_command(from: &str, to: &str, piece: Option<&str>) -> Result<Command, ParseError> {
    Ok(Command::Move {
        from: parse_square(from)?,
        to: parse_square(to)?,
        promotion: piece.map(parse_piece).transpose()?,
    })
}

fn parse_square(txt: &str) -> Result<Square, ParseError> {
    coord_to_sq(txt).ok_or_else(|| ParseError::BadSquare(txt.to_string()))
}

fn parse_piece(txt: &str) -> Result<PieceKind, ParseError> {
    let mut chars = txt.chars();
    match (chars.next().and_then(PieceKind::from_char), chars.next()) {
        (Some(kind), None) if kind.is_promotion_choice() => Ok(kind),
        _ => Err(ParseError::BadPiece(txt.to_string())),
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
