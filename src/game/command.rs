//! Command parsing for the text front end
//!
//! One line of input is one command: either a keyword with operands or a
//! move in its textual form. Keywords are case-insensitive; anything that
//! starts like a square is handed to the move parser.

use crate::board::{Move, PieceColor};
use crate::error::GameError;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Clear,
    Dump,
    Help,
    Quit,
    /// Seat an AI at `color`; `dumb` selects the random mover.
    Auto { color: PieceColor, dumb: bool },
    /// Seat a human at `color`.
    Manual { color: PieceColor },
    Seed { seed: u64 },
    /// Clear and place pieces from a layout string, `color` to move.
    Set { color: PieceColor, layout: String },
    /// Execute the commands in a script file.
    Load { path: String },
    PieceMove(Move),
}

/// Parse one input line. Unknown keywords, missing operands, and
/// malformed moves all come back as `Parse` errors.
pub fn parse_command(line: &str) -> Result<Command, GameError> {
    let mut parts = line.split_whitespace();
    let head = parts
        .next()
        .ok_or_else(|| GameError::parse("command not understood"))?;
    match head.to_lowercase().as_str() {
        "start" => Ok(Command::Start),
        "clear" => Ok(Command::Clear),
        "dump" => Ok(Command::Dump),
        "help" => Ok(Command::Help),
        "quit" => Ok(Command::Quit),
        "auto" => {
            let operand = operand(parts.next())?.to_lowercase();
            let (name, dumb) = match operand.strip_prefix("dumb") {
                Some(rest) => (rest.to_string(), true),
                None => (operand, false),
            };
            Ok(Command::Auto {
                color: parse_color(&name)?,
                dumb,
            })
        }
        "manual" => Ok(Command::Manual {
            color: parse_color(&operand(parts.next())?.to_lowercase())?,
        }),
        "seed" => {
            // Out-of-range seeds silently collapse to a fixed value.
            let seed = operand(parts.next())?.parse().unwrap_or(u64::MAX);
            Ok(Command::Seed { seed })
        }
        "set" => {
            let color = parse_color(&operand(parts.next())?.to_lowercase())?;
            let layout: String = parts.collect::<Vec<_>>().join(" ");
            if layout.is_empty() {
                return Err(GameError::parse("missing board layout"));
            }
            Ok(Command::Set { color, layout })
        }
        "load" => Ok(Command::Load {
            path: operand(parts.next())?.to_string(),
        }),
        word if looks_like_move(word) => Ok(Command::PieceMove(line.trim().parse()?)),
        _ => Err(GameError::parse("command not understood")),
    }
}

fn operand(part: Option<&str>) -> Result<&str, GameError> {
    part.ok_or_else(|| GameError::parse("missing operand"))
}

fn parse_color(name: &str) -> Result<PieceColor, GameError> {
    match name {
        "white" => Ok(PieceColor::White),
        "black" => Ok(PieceColor::Black),
        _ => Err(GameError::parse("not a valid piece color")),
    }
}

fn looks_like_move(word: &str) -> bool {
    word == "-" || word.starts_with(|ch| ('a'..='e').contains(&ch))
}
