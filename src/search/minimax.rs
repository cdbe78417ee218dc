//! Depth-bounded minimax with alpha-beta pruning
//!
//! The searcher explores every legal move on its own board clone, so no
//! hypothetical position ever leaks between branches or back to the live
//! game board. `sense` carries the polarity: +1 maximizes for White, -1
//! minimizes for Black, and values are symmetric around zero.
//!
//! Before recursing, each node scans its moves for one that ends the game
//! on the spot and takes it unconditionally with an extreme value. This
//! happens outside the alpha-beta bookkeeping on purpose: a game-ending
//! move needs no window to justify it.
//!
//! There is no iterative deepening, no transposition table, and no move
//! ordering; ties go to the first move found.

use rand::Rng;

use crate::board::{Board, Move, PieceColor};
use crate::error::GameError;
use crate::eval::{static_score, INFTY};

/// Default search depth before falling back to static evaluation.
pub const MAX_DEPTH: u32 = 8;

/// Minimax searcher. Holds nothing between calls except the last move
/// found and node statistics.
#[derive(Debug)]
pub struct Searcher {
    depth: u32,
    last_found: Option<Move>,
    nodes: u64,
}

impl Searcher {
    pub fn new(depth: u32) -> Self {
        Searcher {
            depth,
            last_found: None,
            nodes: 0,
        }
    }

    /// Nodes visited by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Choose a move for the side to move on `board`. Fails with a
    /// `State` error when no move exists or a hypothetical application is
    /// rejected, which would mean the generator and the board disagree.
    pub fn find_move(&mut self, board: &Board) -> Result<Move, GameError> {
        let scratch = board.clone();
        let sense = if board.whose_move() == PieceColor::White {
            1
        } else {
            -1
        };
        self.last_found = None;
        self.nodes = 0;
        self.search(&scratch, self.depth, true, sense, -INFTY, INFTY)?;
        self.last_found
            .take()
            .ok_or_else(|| GameError::state("search found no move"))
    }

    /// Recursive minimax. Returns the sensed value of `board`; records the
    /// chosen move in `last_found` iff `save`. Depth 0 and finished games
    /// evaluate statically without recording anything.
    fn search(
        &mut self,
        board: &Board,
        depth: u32,
        save: bool,
        sense: i32,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32, GameError> {
        self.nodes += 1;
        if depth == 0 || board.game_over() {
            return Ok(static_score(board));
        }
        let moves = board.get_moves();

        // Take any move that ends the game outright.
        for mv in &moves {
            let mut hypot = board.clone();
            hypot.make_move(mv)?;
            if hypot.game_over() {
                if save {
                    self.last_found = Some(mv.clone());
                }
                return Ok(sense * INFTY);
            }
        }

        let mut best: Option<&Move> = None;
        let mut best_score = 0;
        for mv in &moves {
            let mut next = board.clone();
            next.make_move(mv)?;
            let score = self.search(&next, depth - 1, false, -sense, alpha, beta)?;
            if best.is_none() || score * sense > sense * best_score {
                best_score = score;
                best = Some(mv);
                if sense == 1 {
                    alpha = alpha.max(best_score);
                } else {
                    beta = beta.min(best_score);
                }
                if beta <= alpha {
                    break;
                }
            }
        }
        if save {
            self.last_found = best.cloned();
        }
        Ok(best_score)
    }
}

/// Uniformly random legal move: the easy opponent.
pub fn random_move(board: &Board, rng: &mut impl Rng) -> Result<Move, GameError> {
    let moves = board.get_moves();
    if moves.is_empty() {
        return Err(GameError::state("no legal moves"));
    }
    Ok(moves[rng.random_range(0..moves.len())].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board_from(layout: &str, next: PieceColor) -> Board {
        let mut board = Board::new();
        board.set_pieces(layout, next).unwrap();
        board.check_game_over();
        board
    }

    /// Unpruned reference minimax with the same terminal policy.
    fn plain_minimax(board: &Board, depth: u32, sense: i32) -> i32 {
        if depth == 0 || board.game_over() {
            return static_score(board);
        }
        let moves = board.get_moves();
        for mv in &moves {
            let mut hypot = board.clone();
            hypot.make_move(mv).unwrap();
            if hypot.game_over() {
                return sense * INFTY;
            }
        }
        let mut best: Option<i32> = None;
        for mv in &moves {
            let mut next = board.clone();
            next.make_move(mv).unwrap();
            let score = plain_minimax(&next, depth - 1, -sense);
            best = Some(match best {
                None => score,
                Some(b) if score * sense > sense * b => score,
                Some(b) => b,
            });
        }
        best.unwrap_or(0)
    }

    #[test]
    fn test_search_returns_a_legal_move() {
        let board = Board::new();
        let mut searcher = Searcher::new(4);
        let mv = searcher.find_move(&board).unwrap();
        assert!(board.legal_move(&mv));
        assert!(searcher.nodes() > 1);
    }

    #[test]
    fn test_search_takes_immediate_win() {
        // White captures the last Black piece, leaving Black with
        // nothing: that move must be selected outright.
        let board = board_from("w---- -b--- ----- ----- -----", PieceColor::White);
        let mut searcher = Searcher::new(4);
        let mv = searcher.find_move(&board).unwrap();
        assert_eq!(mv.to_string(), "a1-c3");
    }

    #[test]
    fn test_search_only_offers_jumps_when_mandatory() {
        let board = board_from("w---w -b--- ----- ----- b----", PieceColor::White);
        let mut searcher = Searcher::new(2);
        let mv = searcher.find_move(&board).unwrap();
        assert!(mv.is_jump());
    }

    #[test]
    fn test_pruned_value_matches_plain_minimax() {
        let positions = [
            ("w--b- -b--- --w-- ----- -----", PieceColor::White),
            ("----- -wb-- --b-- -w--- -----", PieceColor::Black),
            ("w-w-- -bb-- ----- --b-- -----", PieceColor::White),
        ];
        for (layout, next) in positions {
            let board = board_from(layout, next);
            if board.game_over() {
                continue;
            }
            let sense = if next == PieceColor::White { 1 } else { -1 };
            for depth in 1..=4 {
                let mut searcher = Searcher::new(depth);
                searcher.last_found = None;
                searcher.nodes = 0;
                let pruned = searcher
                    .search(&board, depth, true, sense, -INFTY, INFTY)
                    .unwrap();
                let reference = plain_minimax(&board, depth, sense);
                assert_eq!(pruned, reference, "depth {depth} layout {layout}");
            }
        }
    }

    #[test]
    fn test_random_move_is_legal_and_seeded() {
        let board = Board::new();
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = random_move(&board, &mut rng_a).unwrap();
        let b = random_move(&board, &mut rng_b).unwrap();
        assert!(board.legal_move(&a));
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_moves_is_an_error() {
        let board = board_from("----- ----- ----- ----- --w--", PieceColor::White);
        assert!(board.game_over());
        let mut searcher = Searcher::new(4);
        assert!(searcher.find_move(&board).is_err());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_move(&board, &mut rng).is_err());
    }
}
