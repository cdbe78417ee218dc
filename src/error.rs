//! Error types shared across the engine

use thiserror::Error;

/// Errors raised by the board, the players, and the command layer.
///
/// `Parse` and `IllegalMove` are recoverable: the session reports them and
/// keeps accepting input. `State` means an operation was attempted in a
/// state that cannot support it (undo with no history, a searcher that
/// produced no move) and usually ends the current activity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Malformed move text, board layout, or command.
    #[error("parse error: {0}")]
    Parse(String),

    /// A move that violates the legality rules.
    #[error("invalid move: {0}")]
    IllegalMove(String),

    /// The operation does not apply to the current state.
    #[error("{0}")]
    State(String),
}

impl GameError {
    pub fn parse(msg: impl Into<String>) -> Self {
        GameError::Parse(msg.into())
    }

    pub fn illegal(msg: impl Into<String>) -> Self {
        GameError::IllegalMove(msg.into())
    }

    pub fn state(msg: impl Into<String>) -> Self {
        GameError::State(msg.into())
    }
}
