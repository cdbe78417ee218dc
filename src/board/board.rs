//! Board state: placement, turn, reversal markers, history, notification
//!
//! The board owns everything a position needs: the 25 square contents, the
//! side to move, the per-square forbidden-reversal table, and a stack of
//! snapshots for undo. Mutations go through [`Board::make_move`], which
//! validates first and leaves the board untouched on error. Interested
//! parties (a front end, typically) call [`Board::subscribe`] and receive a
//! [`BoardUpdate`] after every change; the board never renders anything
//! itself.

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::fmt;
use std::fmt::Write as _;

use super::moves::{Jump, Move, Step};
use super::{PieceColor, Sq, NUM_SQUARES, SIDE};
use crate::error::GameError;
use crate::rules::{jumps, steps};

/// Standard starting layout: two White rows at the bottom, two Black rows
/// at the top, and a mixed middle row with the center square open.
const START_LAYOUT: &str = "w w w w w w w w w w b b - w w b b b b b b b b b b";

/// Snapshot published to subscribers after every mutation.
#[derive(Debug, Clone)]
pub struct BoardUpdate {
    /// Rendered board text, without a legend.
    pub text: String,
    pub whose_move: PieceColor,
    pub game_over: bool,
}

/// Everything `undo` needs to restore.
#[derive(Debug, Clone)]
struct Snapshot {
    contents: [PieceColor; NUM_SQUARES],
    whose_move: PieceColor,
    game_over: bool,
    draws: [Option<Step>; NUM_SQUARES],
}

/// A Qirkat board.
#[derive(Debug)]
pub struct Board {
    contents: [PieceColor; NUM_SQUARES],
    whose_move: PieceColor,
    game_over: bool,
    /// `draws[k]` holds the one step that would exactly reverse the last
    /// sideways step into square `k`, and is forbidden while it stands.
    draws: [Option<Step>; NUM_SQUARES],
    history: Vec<Snapshot>,
    watchers: Vec<Sender<BoardUpdate>>,
}

impl Clone for Board {
    /// Value-semantics copy: position, turn, markers, and history, but not
    /// the subscriber list. Search branches clone freely without echoing
    /// hypothetical moves to the front end.
    fn clone(&self) -> Self {
        Board {
            contents: self.contents,
            whose_move: self.whose_move,
            game_over: self.game_over,
            draws: self.draws,
            history: self.history.clone(),
            watchers: Vec::new(),
        }
    }
}

impl Board {
    /// A new board in the starting position, White to move.
    pub fn new() -> Self {
        let mut board = Board {
            contents: [PieceColor::Empty; NUM_SQUARES],
            whose_move: PieceColor::White,
            game_over: false,
            draws: [None; NUM_SQUARES],
            history: Vec::new(),
            watchers: Vec::new(),
        };
        board.clear();
        board
    }

    /// Reset to the starting position. Clears the reversal table and the
    /// undo history.
    pub fn clear(&mut self) {
        self.whose_move = PieceColor::White;
        self.game_over = false;
        self.draws = [None; NUM_SQUARES];
        self.history.clear();
        self.set_pieces(START_LAYOUT, PieceColor::White)
            .unwrap_or_else(|_| unreachable!("start layout is well formed"));
    }

    /// Set the position from a 25-character layout over `{b,w,-}`,
    /// row-major starting at the bottom row, whitespace ignored.
    /// `next_move` is the side to move. Rejects bad input without
    /// touching the current position.
    pub fn set_pieces(&mut self, text: &str, next_move: PieceColor) -> Result<(), GameError> {
        if next_move == PieceColor::Empty {
            return Err(GameError::state("bad player color"));
        }
        let mut contents = [PieceColor::Empty; NUM_SQUARES];
        let mut count = 0;
        for ch in text.chars().filter(|ch| !ch.is_whitespace()) {
            if count == NUM_SQUARES {
                return Err(GameError::parse("bad board description"));
            }
            contents[count] = match ch {
                '-' => PieceColor::Empty,
                'b' => PieceColor::Black,
                'w' => PieceColor::White,
                _ => return Err(GameError::parse("bad board description")),
            };
            count += 1;
        }
        if count != NUM_SQUARES {
            return Err(GameError::parse("bad board description"));
        }
        self.contents = contents;
        self.whose_move = next_move;
        self.draws = [None; NUM_SQUARES];
        self.check_game_over();
        self.notify();
        Ok(())
    }

    #[inline]
    pub fn get(&self, sq: Sq) -> PieceColor {
        self.contents[sq.index()]
    }

    #[inline]
    pub(crate) fn set(&mut self, sq: Sq, color: PieceColor) {
        self.contents[sq.index()] = color;
    }

    /// The color whose turn it is. Arbitrary once the game is over.
    #[inline]
    pub fn whose_move(&self) -> PieceColor {
        self.whose_move
    }

    /// True iff the side to move has no legal move.
    #[inline]
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Number of pieces of `color` on the board.
    pub fn piece_count(&self, color: PieceColor) -> i32 {
        self.contents.iter().filter(|&&c| c == color).count() as i32
    }

    /// The reversal marker attached to square `sq`, if any.
    #[inline]
    pub fn reversal_marker(&self, sq: Sq) -> Option<Step> {
        self.draws[sq.index()]
    }

    /// Attach a reversal marker by hand. Normal play maintains the table
    /// through `make_move`; this is a setup hook for tests and scripted
    /// positions.
    pub fn set_reversal_marker(&mut self, sq: Sq, step: Step) {
        self.draws[sq.index()] = Some(step);
    }

    /// Return true iff `mov` is legal on the current board.
    pub fn legal_move(&self, mov: &Move) -> bool {
        match mov {
            Move::Pass => false,
            Move::Step(step) => steps::legal_step(self, *step),
            Move::Jump(jump) => {
                self.get(jump.from) == self.whose_move && jumps::check_jump(self, jump, false)
            }
        }
    }

    /// All legal moves for the side to move: only jump chains whenever any
    /// jump exists anywhere on the board, otherwise all legal steps. Empty
    /// once the game is over.
    pub fn get_moves(&self) -> Vec<Move> {
        if self.game_over {
            return Vec::new();
        }
        self.legal_moves()
    }

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        if jumps::jump_possible(self) {
            for k in 0..NUM_SQUARES as u8 {
                let sq = Sq::new(k);
                if self.get(sq) != self.whose_move {
                    continue;
                }
                moves.extend(jumps::jumps_from(self, sq).into_iter().map(Move::Jump));
            }
        } else {
            for k in 0..NUM_SQUARES as u8 {
                let sq = Sq::new(k);
                if self.get(sq) != self.whose_move {
                    continue;
                }
                steps::step_moves_from(self, sq, &mut moves);
            }
        }
        moves
    }

    /// Play `mov`. On success the turn flips, the game-over flag is
    /// recomputed, and subscribers are notified; on error nothing changes.
    pub fn make_move(&mut self, mov: &Move) -> Result<(), GameError> {
        let from = mov
            .from()
            .ok_or_else(|| GameError::illegal("cannot pass"))?;
        if self.get(from) != self.whose_move {
            return Err(GameError::illegal(format!("{}'s move", self.whose_move)));
        }
        match mov {
            Move::Pass => unreachable!("pass has no source square"),
            Move::Step(step) => {
                if jumps::jump_possible(self) {
                    return Err(GameError::illegal("jump possible"));
                }
                if steps::forbidden_reversal(self, *step) {
                    return Err(GameError::illegal("forbidden reversal"));
                }
                if !steps::legal_step(self, *step) {
                    return Err(GameError::illegal("enter another"));
                }
                self.history.push(self.snapshot());
                self.apply_step(*step);
            }
            Move::Jump(jump) => {
                if !jumps::check_jump(self, jump, false) {
                    return Err(GameError::illegal("enter another"));
                }
                self.history.push(self.snapshot());
                self.apply_jump(jump);
            }
        }
        self.whose_move = self.whose_move.opposite();
        self.check_game_over();
        self.notify();
        Ok(())
    }

    /// Undo the last move, restoring position, turn, markers, and the
    /// game-over flag in full.
    pub fn undo(&mut self) -> Result<(), GameError> {
        let snap = self
            .history
            .pop()
            .ok_or_else(|| GameError::state("cannot undo anymore"))?;
        self.contents = snap.contents;
        self.whose_move = snap.whose_move;
        self.game_over = snap.game_over;
        self.draws = snap.draws;
        self.notify();
        Ok(())
    }

    /// Recompute the game-over flag: the game ends when the side to move
    /// has no legal move.
    pub fn check_game_over(&mut self) {
        self.game_over = !self.is_move();
    }

    fn is_move(&self) -> bool {
        (0..NUM_SQUARES as u8).any(|k| {
            steps::move_possible(self, Sq::new(k)) || jumps::jump_possible_from(self, Sq::new(k))
        })
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            contents: self.contents,
            whose_move: self.whose_move,
            game_over: self.game_over,
            draws: self.draws,
        }
    }

    fn apply_step(&mut self, step: Step) {
        self.draws[step.from.index()] = None;
        self.set(step.to, self.get(step.from));
        self.set(step.from, PieceColor::Empty);
        // Only sideways movement is oscillation-prone: record the exact
        // reverse of this step against the destination square.
        if step.is_left() || step.is_right() {
            self.draws[step.to.index()] = Some(step.reversed());
        }
    }

    fn apply_jump(&mut self, jump: &Jump) {
        for hop in jump.hops() {
            let jumped = hop.jumped();
            self.set(hop.to, self.get(hop.from));
            self.set(hop.from, PieceColor::Empty);
            self.set(jumped, PieceColor::Empty);
            // Markers die with the squares the chain vacates. Jumps never
            // set new ones.
            self.draws[hop.from.index()] = None;
            self.draws[jumped.index()] = None;
        }
    }

    /// Subscribe to board changes. Every mutation delivers one
    /// [`BoardUpdate`]; dropped receivers are pruned automatically.
    pub fn subscribe(&mut self) -> Receiver<BoardUpdate> {
        let (tx, rx) = unbounded();
        self.watchers.push(tx);
        rx
    }

    fn notify(&mut self) {
        if self.watchers.is_empty() {
            return;
        }
        let update = BoardUpdate {
            text: self.to_text(false),
            whose_move: self.whose_move,
            game_over: self.game_over,
        };
        self.watchers
            .retain(|tx| tx.send(update.clone()).is_ok());
    }

    /// Render the board, top row first, each square two characters wide.
    /// With `legend`, row digits run down the left edge and column letters
    /// along the bottom.
    pub fn to_text(&self, legend: bool) -> String {
        let mut out = String::new();
        for row in (0..SIDE as u8).rev() {
            out.push_str("  ");
            if legend {
                let _ = write!(out, "{} ", row + 1);
            }
            for col in 0..SIDE as u8 {
                if col > 0 {
                    out.push(' ');
                }
                out.push(self.get(Sq::from_col_row(col, row)).short_name());
            }
            if row != 0 {
                out.push('\n');
            }
        }
        if legend {
            out.push_str("\n    a b c d e \n");
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(false))
    }
}

impl PartialEq for Board {
    /// Position equality: contents and side to move.
    fn eq(&self, other: &Self) -> bool {
        self.contents == other.contents && self.whose_move == other.whose_move
    }
}
