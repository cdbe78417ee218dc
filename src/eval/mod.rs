//! Static position evaluation
//!
//! Plain material count, oriented so that positive favors White. Terminal
//! positions evaluate to the extreme magnitudes: whichever color is to
//! move on a finished board is the color with no moves, i.e. the loser.

use crate::board::{Board, PieceColor};

/// A magnitude greater than any reachable evaluation.
pub const INFTY: i32 = i32::MAX;

/// A position magnitude indicating a win (positive for White, negative
/// for Black).
pub const WINNING_VALUE: i32 = i32::MAX - 1;

/// Heuristic value of `board`: White pieces minus Black pieces, or the
/// extreme win/loss values on a finished game.
pub fn static_score(board: &Board) -> i32 {
    if board.game_over() {
        return if board.whose_move() == PieceColor::White {
            -INFTY
        } else {
            INFTY
        };
    }
    board.piece_count(PieceColor::White) - board.piece_count(PieceColor::Black)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_start_scores_zero() {
        let board = Board::new();
        assert_eq!(static_score(&board), 0);
    }

    #[test]
    fn test_material_shift() {
        let mut board = Board::new();
        // Starting layout with one White piece removed from a1.
        board
            .set_pieces("-wwww wwwww bb-ww bbbbb bbbbb", PieceColor::White)
            .unwrap();
        assert_eq!(static_score(&board), -1);
        // And one Black piece removed instead.
        board
            .set_pieces("wwwww wwwww bb-ww bbbbb bbbb-", PieceColor::White)
            .unwrap();
        assert_eq!(static_score(&board), 1);
    }

    #[test]
    fn test_finished_game_is_extreme() {
        let mut board = Board::new();
        // Lone White piece stuck on its far row: White to move has
        // nothing, so White has lost.
        board
            .set_pieces("----- ----- ----- ----- --w--", PieceColor::White)
            .unwrap();
        board.check_game_over();
        assert!(board.game_over());
        assert_eq!(static_score(&board), -INFTY);
    }
}
