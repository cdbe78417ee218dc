//! Qirkat (Alquerque) engine with a text front end
//!
//! A complete engine for Qirkat on its traditional 5x5 board:
//! - 25 squares, diagonal lines only through alternating points
//! - Captures by jumping are mandatory and must be carried as far as
//!   they can go
//! - Pieces step forward or sideways, never back toward their own side
//! - A sideways step may not be reversed while the piece stays put
//! - The side left without a move loses
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//! - [`board`]: Board state, squares, moves, undo history
//! - [`rules`]: Legality of steps and jumps, move generation
//! - [`eval`]: Static position evaluation
//! - [`search`]: Alpha-beta move finder and the random mover
//! - [`game`]: Interactive session, command parsing, play loop
//!
//! # Quick Start
//!
//! ```
//! use qirkat::{Board, Move, Searcher};
//!
//! let mut board = Board::new();
//! let mv: Move = "c2-c3".parse().unwrap();
//! board.make_move(&mv).unwrap();
//!
//! // The AI answers for Black.
//! let mut searcher = Searcher::new(4);
//! let reply = searcher.find_move(&board).unwrap();
//! board.make_move(&reply).unwrap();
//! println!("Black plays {}", reply);
//! ```

pub mod board;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, BoardUpdate, Jump, Move, PieceColor, Sq, Step};
pub use error::GameError;
pub use search::{random_move, Searcher};
