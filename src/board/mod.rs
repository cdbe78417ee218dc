//! Board representation for Qirkat

pub mod board;
pub mod moves;


// Re-exports
pub use board::{Board, BoardUpdate};
pub use moves::{Jump, Move, Step};

use std::fmt;

use crate::error::GameError;

/// Board side length (5x5)
pub const SIDE: usize = 5;
pub const NUM_SQUARES: usize = SIDE * SIDE; // 25
pub const MAX_INDEX: u8 = (NUM_SQUARES - 1) as u8;

/// Piece colors. White moves up the board, Black moves down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Empty,
    White,
    Black,
}

impl PieceColor {
    /// Get the opposing color
    #[inline]
    pub fn opposite(self) -> PieceColor {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
            PieceColor::Empty => PieceColor::Empty,
        }
    }

    /// One-character board notation: `w`, `b`, or `-`
    #[inline]
    pub fn short_name(self) -> char {
        match self {
            PieceColor::White => 'w',
            PieceColor::Black => 'b',
            PieceColor::Empty => '-',
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
            PieceColor::Empty => "Empty",
        };
        write!(f, "{name}")
    }
}

/// A square, stored as its linearized index: row-major order with row 0
/// at the bottom of the board. Squares are written as a column letter
/// (`a`..`e`, left to right) followed by a row digit (`1`..`5`, bottom up),
/// so `a1` is index 0 and `e5` is index 24.
///
/// Index parity decides adjacency: even squares connect to all 8
/// neighbors, odd squares only to the 4 orthogonal ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sq(u8);

impl Sq {
    #[inline]
    pub fn new(index: u8) -> Self {
        debug_assert!(index <= MAX_INDEX);
        Sq(index)
    }

    #[inline]
    pub fn from_col_row(col: u8, row: u8) -> Self {
        debug_assert!(col < SIDE as u8 && row < SIDE as u8);
        Sq(row * SIDE as u8 + col)
    }

    /// Build a square from its textual column letter and row digit.
    pub fn from_chars(col: char, row: char) -> Result<Self, GameError> {
        if !('a'..='e').contains(&col) || !('1'..='5').contains(&row) {
            return Err(GameError::parse(format!("bad square: {col}{row}")));
        }
        Ok(Sq::from_col_row(col as u8 - b'a', row as u8 - b'1'))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn col(self) -> u8 {
        self.0 % SIDE as u8
    }

    #[inline]
    pub fn row(self) -> u8 {
        self.0 / SIDE as u8
    }

    #[inline]
    pub fn col_char(self) -> char {
        (b'a' + self.col()) as char
    }

    #[inline]
    pub fn row_char(self) -> char {
        (b'1' + self.row()) as char
    }

    /// Even squares have full 8-neighbor adjacency; odd squares are
    /// restricted to orthogonal neighbors.
    #[inline]
    pub fn is_even(self) -> bool {
        self.0 % 2 == 0
    }

    #[inline]
    pub fn is_valid(index: i32) -> bool {
        (0..NUM_SQUARES as i32).contains(&index)
    }

    /// Offset the linearized index, returning `None` off the board.
    /// Column wrap-around is the caller's concern.
    #[inline]
    pub fn offset(self, delta: i32) -> Option<Sq> {
        let to = self.0 as i32 + delta;
        Sq::is_valid(to).then(|| Sq(to as u8))
    }
}

impl fmt::Display for Sq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col_char(), self.row_char())
    }
}
