//! Jump enumeration and validation
//!
//! A jump hops two squares along a rank, file, or diagonal, over an enemy
//! piece on the midpoint square, onto an empty landing square. Odd squares
//! are barred from diagonal hops, matching their step adjacency. Jumps are
//! mandatory and maximal: if a landed piece can hop again, the chain must
//! continue, so a complete move is a chain no further hop can extend.
//!
//! Enumeration is a depth-first search over hypothetical boards: each
//! candidate hop is applied to a scratch clone before recursing, so sibling
//! branches never see each other's captures and every distinct maximal
//! chain comes back as its own move.

use crate::board::{Board, Jump, PieceColor, Sq, NUM_SQUARES, SIDE};

/// Row offsets of the hop targets: one row of squares down, same row, up.
const ROW_OFFSETS: [i32; 3] = [-2 * SIDE as i32, 0, 2 * SIDE as i32];
/// Column offsets of the hop targets.
const COL_OFFSETS: [i32; 3] = [-2, 0, 2];

/// Midpoint square of a hop, computed per axis.
#[inline]
fn midpoint(a: Sq, b: Sq) -> Sq {
    Sq::from_col_row((a.col() + b.col()) / 2, (a.row() + b.row()) / 2)
}

/// Hop-target squares reachable from `sq`, with wrap-around and parity
/// filtered out. Yields `(to, jumped)` pairs; occupancy is the caller's
/// concern.
fn hop_targets(sq: Sq) -> impl Iterator<Item = (Sq, Sq)> {
    ROW_OFFSETS.into_iter().flat_map(move |dr| {
        COL_OFFSETS.into_iter().filter_map(move |dc| {
            if dr == 0 && dc == 0 {
                return None;
            }
            // Diagonal hops need full adjacency, which odd squares lack.
            if dr != 0 && dc != 0 && !sq.is_even() {
                return None;
            }
            // Column arithmetic must not wrap across a board edge.
            if dc == 2 && sq.col() >= (SIDE - 2) as u8 {
                return None;
            }
            if dc == -2 && sq.col() <= 1 {
                return None;
            }
            let to = sq.offset(dr + dc)?;
            Some((to, midpoint(sq, to)))
        })
    })
}

/// True iff the piece on `sq` has at least one immediate hop.
pub fn jump_possible_from(board: &Board, sq: Sq) -> bool {
    let color = board.get(sq);
    if color != board.whose_move() {
        return false;
    }
    hop_targets(sq).any(|(to, jumped)| {
        board.get(to) == PieceColor::Empty && board.get(jumped) == color.opposite()
    })
}

/// True iff any piece of the side to move has a hop anywhere on the board.
pub fn jump_possible(board: &Board) -> bool {
    (0..NUM_SQUARES as u8).any(|k| jump_possible_from(board, Sq::new(k)))
}

/// All maximal jump chains starting from `sq` for the side to move. A
/// position with two independent continuations yields two distinct chains.
pub fn jumps_from(board: &Board, sq: Sq) -> Vec<Jump> {
    if board.get(sq) != board.whose_move() {
        return Vec::new();
    }
    branches(board, sq)
}

/// Depth-first chain discovery. Returns every maximal chain from `sq`;
/// empty when no hop is available (the chain ends here).
fn branches(board: &Board, sq: Sq) -> Vec<Jump> {
    let mut chains = Vec::new();
    let color = board.get(sq);
    for (to, jumped) in hop_targets(sq) {
        if board.get(jumped) != color.opposite() || board.get(to) != PieceColor::Empty {
            continue;
        }
        let mut branch = board.clone();
        branch.set(jumped, PieceColor::Empty);
        branch.set(to, color);
        branch.set(sq, PieceColor::Empty);
        let tails = branches(&branch, to);
        if tails.is_empty() {
            chains.push(Jump::new(sq, to, None));
        } else {
            chains.extend(
                tails
                    .into_iter()
                    .map(|tail| Jump::new(sq, to, Some(Box::new(tail)))),
            );
        }
    }
    chains
}

/// Validate a jump chain hop by hop on a scratch board. A complete chain
/// must be maximal: unless `allow_partial`, a chain whose last hop still
/// has a continuation is rejected.
pub fn check_jump(board: &Board, jump: &Jump, allow_partial: bool) -> bool {
    if board.get(jump.from) == PieceColor::Empty {
        return false;
    }
    let mut scratch = board.clone();
    check_hops(&mut scratch, jump, allow_partial)
}

fn check_hops(board: &mut Board, hop: &Jump, allow_partial: bool) -> bool {
    if board.get(hop.to) != PieceColor::Empty || board.get(hop.from) == PieceColor::Empty {
        return false;
    }
    let color = board.get(hop.from);
    let dr = i32::from(hop.to.row()) - i32::from(hop.from.row());
    let dc = i32::from(hop.to.col()) - i32::from(hop.from.col());
    if !matches!((dr.abs(), dc.abs()), (2, 0) | (0, 2) | (2, 2)) {
        return false;
    }
    if dr != 0 && dc != 0 && !hop.from.is_even() {
        return false;
    }
    let jumped = hop.jumped();
    if board.get(jumped) != color.opposite() {
        return false;
    }
    board.set(hop.to, color);
    board.set(hop.from, PieceColor::Empty);
    board.set(jumped, PieceColor::Empty);
    match &hop.next {
        Some(next) => check_hops(board, next, allow_partial),
        None => allow_partial || !jump_possible_from(board, hop.to),
    }
}
