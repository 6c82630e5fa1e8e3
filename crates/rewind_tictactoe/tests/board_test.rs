//! Tests for the board model and outcome evaluation.

use rewind_tictactoe::{
    Board, EngineError, IllegalMove, Outcome, Player, Position, Square, evaluate,
};

#[test]
fn test_apply_differs_in_exactly_one_square() {
    let board: Board = "X___O____".parse().expect("Valid notation");
    let before = board;
    let next = board.apply(8, Player::X).expect("Empty square");

    assert_eq!(board, before, "apply must not mutate its input");
    let changed: Vec<usize> = (0..9).filter(|&i| board.get(i) != next.get(i)).collect();
    assert_eq!(changed, vec![8]);
    assert_eq!(next.get(8), Some(Square::Occupied(Player::X)));
}

#[test]
fn test_apply_rejects_illegal_targets() {
    let board: Board = "X___O____".parse().expect("Valid notation");
    assert_eq!(
        board.apply(4, Player::X),
        Err(EngineError::IllegalMove(IllegalMove::SquareOccupied(4)))
    );
    assert_eq!(
        board.apply(42, Player::X),
        Err(EngineError::IllegalMove(IllegalMove::OutOfBounds(42)))
    );
}

#[test]
fn test_is_full() {
    assert!(!Board::new().is_full());
    let full: Board = "XOXOXOOXO".parse().expect("Valid notation");
    assert!(full.is_full());
}

#[test]
fn test_top_row_win_regardless_of_rest() {
    let board: Board = "XXX_OO___".parse().expect("Valid notation");
    assert_eq!(evaluate(&board), Outcome::Win(Player::X));
}

#[test]
fn test_full_board_without_line_is_draw() {
    let board: Board = "XOXOXOOXO".parse().expect("Valid notation");
    assert_eq!(evaluate(&board), Outcome::Draw);
}

#[test]
fn test_evaluate_is_deterministic_on_double_line() {
    // Not reachable in a legal game, but the first line in order still decides.
    let board: Board = "XXXOOO___".parse().expect("Valid notation");
    assert_eq!(evaluate(&board), Outcome::Win(Player::X));
}

#[test]
fn test_valid_moves_filters_occupied() {
    let board: Board = "X___O____".parse().expect("Valid notation");
    let valid = Position::valid_moves(&board);
    assert_eq!(valid.len(), 7);
    assert!(!valid.contains(&Position::TopLeft));
    assert!(!valid.contains(&Position::Center));
    assert!(valid.contains(&Position::BottomRight));
}

#[test]
fn test_notation_round_trip() {
    let board: Board = "XO_|_X_|__O".parse().expect("Valid notation");
    assert_eq!(board.to_notation(), "XO__X___O");
    assert_eq!(board.to_notation().parse::<Board>(), Ok(board));
}
