//! Move values: passes, steps, and multi-jump chains
//!
//! Moves are written as square names joined by `-`: `c2-c3` is a step or a
//! single jump (the geometry decides which), `b2-b4-d2` is a jump chain,
//! and a lone `-` is a pass. Parsing checks the shape of every hop; whether
//! a move is actually playable is the board's business.

use std::fmt;
use std::str::FromStr;

use super::Sq;
use crate::error::GameError;

/// A non-capturing move to an adjacent square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    pub from: Sq,
    pub to: Sq,
}

impl Step {
    pub fn new(from: Sq, to: Sq) -> Self {
        Step { from, to }
    }

    /// Column displacement, `to - from`.
    #[inline]
    pub fn col_delta(self) -> i32 {
        i32::from(self.to.col()) - i32::from(self.from.col())
    }

    /// True iff the step moves one column to the left. Row movement is
    /// deliberately ignored: the reversal rule classifies steps by their
    /// column delta alone.
    #[inline]
    pub fn is_left(self) -> bool {
        self.col_delta() == -1
    }

    /// True iff the step moves one column to the right.
    #[inline]
    pub fn is_right(self) -> bool {
        self.col_delta() == 1
    }

    /// The step that exactly undoes this one.
    #[inline]
    pub fn reversed(self) -> Step {
        Step {
            from: self.to,
            to: self.from,
        }
    }
}

/// A capture hop, possibly chained into further hops. The captured square
/// is implied: it is always the row/column midpoint of `from` and `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Jump {
    pub from: Sq,
    pub to: Sq,
    pub next: Option<Box<Jump>>,
}

impl Jump {
    pub fn new(from: Sq, to: Sq, next: Option<Box<Jump>>) -> Self {
        Jump { from, to, next }
    }

    /// The square jumped over by this hop.
    #[inline]
    pub fn jumped(&self) -> Sq {
        Sq::from_col_row(
            (self.from.col() + self.to.col()) / 2,
            (self.from.row() + self.to.row()) / 2,
        )
    }

    /// Iterate over the hops of the chain, front to back.
    pub fn hops(&self) -> Hops<'_> {
        Hops { next: Some(self) }
    }

    /// Landing square of the final hop.
    pub fn last_to(&self) -> Sq {
        self.hops().last().map(|hop| hop.to).unwrap_or(self.to)
    }
}

/// Iterator over the hops of a jump chain.
pub struct Hops<'a> {
    next: Option<&'a Jump>,
}

impl<'a> Iterator for Hops<'a> {
    type Item = &'a Jump;

    fn next(&mut self) -> Option<&'a Jump> {
        let hop = self.next.take()?;
        self.next = hop.next.as_deref();
        Some(hop)
    }
}

/// A Qirkat move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Move {
    /// The empty move.
    Pass,
    Step(Step),
    Jump(Jump),
}

impl Move {
    pub fn step(from: Sq, to: Sq) -> Self {
        Move::Step(Step::new(from, to))
    }

    pub fn jump(from: Sq, to: Sq, next: Option<Box<Jump>>) -> Self {
        Move::Jump(Jump::new(from, to, next))
    }

    #[inline]
    pub fn is_jump(&self) -> bool {
        matches!(self, Move::Jump(_))
    }

    /// Source square; `None` for a pass.
    pub fn from(&self) -> Option<Sq> {
        match self {
            Move::Pass => None,
            Move::Step(step) => Some(step.from),
            Move::Jump(jump) => Some(jump.from),
        }
    }
}

/// True iff the displacement is a legal step shape (a unit king move).
fn step_shape(dr: i32, dc: i32) -> bool {
    dr.abs() <= 1 && dc.abs() <= 1 && (dr, dc) != (0, 0)
}

/// True iff the displacement is a legal hop shape (two squares along a
/// rank, file, or diagonal).
fn jump_shape(dr: i32, dc: i32) -> bool {
    matches!((dr.abs(), dc.abs()), (2, 0) | (0, 2) | (2, 2))
}

fn deltas(from: Sq, to: Sq) -> (i32, i32) {
    (
        i32::from(to.row()) - i32::from(from.row()),
        i32::from(to.col()) - i32::from(from.col()),
    )
}

fn parse_square(text: &str) -> Result<Sq, GameError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(col), Some(row), None) => Sq::from_chars(col, row),
        _ => Err(GameError::parse(format!("bad square: {text}"))),
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(text: &str) -> Result<Self, GameError> {
        let text = text.trim();
        if text == "-" {
            return Ok(Move::Pass);
        }
        let squares = text
            .split('-')
            .map(parse_square)
            .collect::<Result<Vec<_>, _>>()?;
        match squares.as_slice() {
            [] | [_] => Err(GameError::parse(format!("bad move: {text}"))),
            [from, to] => {
                let (dr, dc) = deltas(*from, *to);
                if step_shape(dr, dc) {
                    Ok(Move::step(*from, *to))
                } else if jump_shape(dr, dc) {
                    Ok(Move::jump(*from, *to, None))
                } else {
                    Err(GameError::parse(format!("bad move: {text}")))
                }
            }
            all => {
                // Three or more squares can only be a jump chain.
                for pair in all.windows(2) {
                    let (dr, dc) = deltas(pair[0], pair[1]);
                    if !jump_shape(dr, dc) {
                        return Err(GameError::parse(format!("bad jump: {text}")));
                    }
                }
                let mut tail: Option<Box<Jump>> = None;
                for pair in all.windows(2).rev() {
                    tail = Some(Box::new(Jump::new(pair[0], pair[1], tail)));
                }
                // The loop ran at least once, so tail is populated.
                Ok(Move::Jump(*tail.ok_or_else(|| {
                    GameError::parse(format!("bad jump: {text}"))
                })?))
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Pass => write!(f, "-"),
            Move::Step(step) => write!(f, "{}-{}", step.from, step.to),
            Move::Jump(jump) => {
                write!(f, "{}", jump.from)?;
                for hop in jump.hops() {
                    write!(f, "-{}", hop.to)?;
                }
                Ok(())
            }
        }
    }
}
