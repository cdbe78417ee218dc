//! Step legality and non-capturing move generation
//!
//! A step moves one square to an empty neighbor. Three rules shape the
//! step set beyond plain adjacency:
//! - parity: even squares reach all 8 neighbors, odd squares only the 4
//!   orthogonal ones;
//! - direction: a piece never steps toward its own back row, and a piece
//!   that has reached its far row cannot step at all;
//! - repetition: a step that exactly reverses the previous sideways step
//!   into its source square is forbidden (see the board's reversal table).
//!
//! Steps are categorically illegal while any jump exists for the side to
//! move; the generator here assumes the caller has already routed to jumps
//! in that case, but [`legal_step`] re-checks it.

use crate::board::{Board, Move, PieceColor, Sq, Step, SIDE};

use super::jumps;

/// True iff playing `step` is barred by the anti-repetition rule: the
/// step's source square carries a marker equal to the step itself. Only
/// sideways steps (nonzero column delta) are ever barred.
pub fn forbidden_reversal(board: &Board, step: Step) -> bool {
    if !step.is_left() && !step.is_right() {
        return false;
    }
    board.reversal_marker(step.from) == Some(step)
}

/// True iff `step` is legal for the side to move on `board`.
pub fn legal_step(board: &Board, step: Step) -> bool {
    if forbidden_reversal(board, step) {
        return false;
    }
    let mover = board.get(step.from);
    if mover != board.whose_move() || board.get(step.to) != PieceColor::Empty {
        return false;
    }
    let base: i32 = match mover {
        PieceColor::White => 0,
        PieceColor::Black => (SIDE - 1) as i32,
        PieceColor::Empty => return false,
    };
    let r0 = i32::from(step.from.row());
    let r1 = i32::from(step.to.row());
    // Never step back toward the own base row.
    if (r0 - base).pow(2) > (r1 - base).pow(2) {
        return false;
    }
    if at_far_row(mover, step.from) {
        return false;
    }
    // Captures are mandatory: any jump anywhere bars every step.
    if jumps::jump_possible(board) {
        return false;
    }
    let dr = r1 - r0;
    let dc = step.col_delta();
    if step.from.is_even() {
        dr.abs() <= 1 && dc.abs() <= 1
    } else {
        dr * dr + dc * dc == 1
    }
}

/// A piece on its far row (White on row 5, Black on row 1) is stuck for
/// stepping purposes; only the opponent removing it changes that.
#[inline]
fn at_far_row(color: PieceColor, sq: Sq) -> bool {
    match color {
        PieceColor::White => sq.row() as usize == SIDE - 1,
        PieceColor::Black => sq.row() == 0,
        PieceColor::Empty => false,
    }
}

/// True iff the piece on `sq` has at least one legal step. Used for
/// game-over detection; ignores the mandatory-jump bar, which the caller
/// accounts for separately.
pub fn move_possible(board: &Board, sq: Sq) -> bool {
    let mover = board.get(sq);
    if mover != board.whose_move() || at_far_row(mover, sq) {
        return false;
    }
    let ahead = forward(mover, sq);
    if let Some(a) = ahead {
        if board.get(a) == PieceColor::Empty {
            return true;
        }
    }
    if side_candidate(board, sq, sq) {
        return true;
    }
    match ahead {
        Some(a) if sq.is_even() => side_candidate(board, sq, a),
        _ => false,
    }
}

/// Add all legal steps of the piece on `sq` to `moves`: sideways first,
/// then straight ahead, then (from even squares) the forward diagonals.
pub fn step_moves_from(board: &Board, sq: Sq, moves: &mut Vec<Move>) {
    let mover = board.get(sq);
    if mover != board.whose_move() || at_far_row(mover, sq) {
        return;
    }
    let ahead = forward(mover, sq);
    add_row_pair(board, sq, sq, moves);
    if let Some(a) = ahead {
        add_if_open(board, sq, a, moves);
        if sq.is_even() {
            add_row_pair(board, sq, a, moves);
        }
    }
}

/// The square directly ahead of `sq` for `color`, if on the board.
#[inline]
fn forward(color: PieceColor, sq: Sq) -> Option<Sq> {
    let dir = match color {
        PieceColor::White => SIDE as i32,
        PieceColor::Black => -(SIDE as i32),
        PieceColor::Empty => return None,
    };
    sq.offset(dir)
}

/// Try the left and right neighbors of `base` as destinations from
/// `origin`, guarding the column edges of `origin` (the two squares share
/// a column, so the guards apply to both).
fn add_row_pair(board: &Board, origin: Sq, base: Sq, moves: &mut Vec<Move>) {
    for dc in [-1i32, 1] {
        if origin.col() == 0 && dc == -1 {
            continue;
        }
        if origin.col() == (SIDE - 1) as u8 && dc == 1 {
            break;
        }
        if let Some(to) = base.offset(dc) {
            add_if_open(board, origin, to, moves);
        }
    }
}

fn side_candidate(board: &Board, origin: Sq, base: Sq) -> bool {
    for dc in [-1i32, 1] {
        if origin.col() == 0 && dc == -1 {
            continue;
        }
        if origin.col() == (SIDE - 1) as u8 && dc == 1 {
            break;
        }
        if let Some(to) = base.offset(dc) {
            if board.get(to) == PieceColor::Empty
                && !forbidden_reversal(board, Step::new(origin, to))
            {
                return true;
            }
        }
    }
    false
}

fn add_if_open(board: &Board, from: Sq, to: Sq, moves: &mut Vec<Move>) {
    if board.get(to) == PieceColor::Empty && !forbidden_reversal(board, Step::new(from, to)) {
        moves.push(Move::step(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Sq {
        let mut it = name.chars();
        Sq::from_chars(it.next().unwrap(), it.next().unwrap()).unwrap()
    }

    #[test]
    fn test_steps_blocked_and_open() {
        let mut board = Board::new();
        board
            .set_pieces("wwwww ww-ww bb--w bbbbb bbbbb", PieceColor::White)
            .unwrap();
        // b1 -> c2 is a diagonal from an odd square.
        assert!(!board.legal_move(&Move::step(sq("b1"), sq("c2"))));
        // a1 -> b1 has an occupied destination.
        assert!(!board.legal_move(&Move::step(sq("a1"), sq("b1"))));
        // c1 -> c2 goes straight ahead to an open square.
        assert!(board.legal_move(&Move::step(sq("c1"), sq("c2"))));
        // d2 -> c3 is a forward diagonal from an even square.
        assert!(board.legal_move(&Move::step(sq("d2"), sq("c3"))));
    }

    #[test]
    fn test_no_backward_steps() {
        let mut board = Board::new();
        board
            .set_pieces("----- --w-- ----- ----- -----", PieceColor::White)
            .unwrap();
        assert!(board.legal_move(&Move::step(sq("c2"), sq("c3"))));
        assert!(!board.legal_move(&Move::step(sq("c2"), sq("c1"))));
        // Sideways stays legal.
        assert!(board.legal_move(&Move::step(sq("c2"), sq("b2"))));
    }

    #[test]
    fn test_far_row_piece_cannot_step() {
        let mut board = Board::new();
        board
            .set_pieces("----- ----- ----- ----- --w--", PieceColor::White)
            .unwrap();
        assert!(!board.legal_move(&Move::step(sq("c5"), sq("b5"))));
        board.check_game_over();
        assert!(board.game_over());
    }

    #[test]
    fn test_steps_illegal_while_jump_exists() {
        // White b1 can jump the black piece on b2; the step from e1 is
        // then barred even though its own neighborhood is quiet.
        let mut board = Board::new();
        board
            .set_pieces("-w--w -b--- ----- ----- -----", PieceColor::White)
            .unwrap();
        assert!(jumps::jump_possible(&board));
        assert!(!board.legal_move(&Move::step(sq("e1"), sq("e2"))));
    }

    #[test]
    fn test_forbidden_reversal_blocks_exact_step_only() {
        let mut board = Board::new();
        board
            .set_pieces("----- -w--- ----- ----- -----", PieceColor::White)
            .unwrap();
        board.make_move(&Move::step(sq("b2"), sq("c2"))).unwrap();
        // The marker sits on the destination square and matches only the
        // exact reverse step.
        assert!(forbidden_reversal(&board, Step::new(sq("c2"), sq("b2"))));
        assert!(!forbidden_reversal(&board, Step::new(sq("c2"), sq("d2"))));
    }

    #[test]
    fn test_generation_skips_marked_reversal() {
        let mut board = Board::new();
        board
            .set_pieces("----- --w-- ----- ----- -----", PieceColor::White)
            .unwrap();
        board.set_reversal_marker(sq("c2"), Step::new(sq("c2"), sq("b2")));
        let moves = board.get_moves();
        assert!(!moves.contains(&Move::step(sq("c2"), sq("b2"))));
        assert!(moves.contains(&Move::step(sq("c2"), sq("d2"))));
        assert!(moves.contains(&Move::step(sq("c2"), sq("c3"))));
    }
}
