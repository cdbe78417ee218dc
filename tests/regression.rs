//! End-to-end scenarios exercising the public API: a short opening with
//! captures, mandatory-jump enforcement, the sideways-reversal rule, undo,
//! and positions where the side to move is out of moves.

use qirkat::{Board, Move, PieceColor, Searcher, Sq, Step};

fn mv(text: &str) -> Move {
    text.parse().unwrap()
}

fn sq(name: &str) -> Sq {
    let mut chars = name.chars();
    Sq::from_chars(chars.next().unwrap(), chars.next().unwrap()).unwrap()
}

const START_TEXT: &str = "  b b b b b\n\
                          \x20 b b b b b\n\
                          \x20 b b - w w\n\
                          \x20 w w w w w\n\
                          \x20 w w w w w";

#[test]
fn test_opening_capture_sequence() {
    let mut board = Board::new();
    for text in ["c2-c3", "c4-c2", "c1-c3", "a3-c1"] {
        board.make_move(&mv(text)).unwrap();
    }
    assert_eq!(
        board.to_string(),
        "  b b b b b\n\
         \x20 b b - b b\n\
         \x20 - b w w w\n\
         \x20 w - - w w\n\
         \x20 w w b w w"
    );
    assert_eq!(board.piece_count(PieceColor::White), 10);
    assert_eq!(board.piece_count(PieceColor::Black), 11);
    assert_eq!(board.whose_move(), PieceColor::White);
    assert!(!board.game_over());
}

#[test]
fn test_undo_replays_to_start() {
    let mut board = Board::new();
    for text in ["c2-c3", "c4-c2", "c1-c3", "a3-c1"] {
        board.make_move(&mv(text)).unwrap();
    }
    for _ in 0..4 {
        board.undo().unwrap();
    }
    assert_eq!(board.to_string(), START_TEXT);
    assert_eq!(board.whose_move(), PieceColor::White);
    assert!(board.undo().is_err());
}

#[test]
fn test_mandatory_jump_preempts_steps() {
    let mut board = Board::new();
    board
        .set_pieces("w---- -b--- b---- ----- -----", PieceColor::White)
        .unwrap();
    let moves = board.get_moves();
    assert!(!moves.is_empty());
    assert!(moves.iter().all(Move::is_jump));

    // The open step a1-a2 is refused while the jump stands.
    let err = board.make_move(&mv("a1-a2")).unwrap_err();
    assert!(err.to_string().contains("jump possible"));
    board.make_move(&mv("a1-c3")).unwrap();
    assert_eq!(board.piece_count(PieceColor::Black), 1);
}

#[test]
fn test_search_takes_mandatory_jump() {
    let mut board = Board::new();
    board
        .set_pieces("w---- -b--- b---- ----- -----", PieceColor::White)
        .unwrap();
    let mut searcher = Searcher::new(4);
    let found = searcher.find_move(&board).unwrap();
    assert!(found.is_jump());
    board.make_move(&found).unwrap();
}

#[test]
fn test_sideways_reversal_lifecycle() {
    let mut board = Board::new();
    board
        .set_pieces("----- --w-- ----- ----- b----", PieceColor::White)
        .unwrap();

    board.make_move(&mv("c2-d2")).unwrap();
    board.make_move(&mv("a5-a4")).unwrap();

    // Stepping straight back is the one thing the piece may not do.
    assert!(!board.legal_move(&mv("d2-c2")));
    let err = board.make_move(&mv("d2-c2")).unwrap_err();
    assert!(err.to_string().contains("forbidden reversal"));

    // Moving anywhere else lifts the restriction on that square.
    board.make_move(&mv("d2-d3")).unwrap();
    assert!(board.reversal_marker(sq("d2")).is_none());
}

#[test]
fn test_blocked_base_row_ends_game() {
    let mut board = Board::new();
    board
        .set_pieces("--bbb w---- ----- ----- -----", PieceColor::Black)
        .unwrap();
    // Black's pieces sit on its far row and have no jumps; a marker on
    // c1 removes nothing further, so Black is out of moves.
    board.set_reversal_marker(sq("c1"), Step::new(sq("c1"), sq("b1")));
    board.check_game_over();
    assert!(board.game_over());
    assert!(board.get_moves().is_empty());
}

#[test]
fn test_game_ends_when_last_piece_taken() {
    let mut board = Board::new();
    board
        .set_pieces("w---- -b--- ----- ----- -----", PieceColor::White)
        .unwrap();
    board.make_move(&mv("a1-c3")).unwrap();
    assert!(board.game_over());
    assert_eq!(board.piece_count(PieceColor::Black), 0);
    assert_eq!(board.whose_move(), PieceColor::Black);
}
