//! Tests for the minimax search.

use rewind_tictactoe::{
    Board, DRAW_SCORE, EngineError, Outcome, Player, WIN_SCORE, analyze, best_move, evaluate,
};

/// Plays every possible opponent line against the search and counts
/// finished games. Panics if the computer ever loses.
fn play_out(board: Board, to_move: Player, ai_side: Player, finished: &mut usize) {
    match evaluate(&board) {
        Outcome::Win(winner) => {
            assert_eq!(
                winner,
                ai_side,
                "computer ({}) lost on {}",
                ai_side,
                board.to_notation()
            );
            *finished += 1;
            return;
        }
        Outcome::Draw => {
            *finished += 1;
            return;
        }
        Outcome::InProgress => {}
    }

    if to_move == ai_side {
        let index = best_move(&board, to_move, ai_side).expect("Board is in progress");
        let next = board.apply(index, to_move).expect("Search returns an empty square");
        play_out(next, to_move.opponent(), ai_side, finished);
    } else {
        let replies: Vec<usize> = board.empty_indices().collect();
        for index in replies {
            let next = board.apply(index, to_move).expect("Empty square");
            play_out(next, to_move.opponent(), ai_side, finished);
        }
    }
}

#[test]
fn test_computer_as_o_never_loses() {
    let mut finished = 0;
    play_out(Board::new(), Player::X, Player::O, &mut finished);
    assert!(finished > 0);
}

#[test]
fn test_computer_as_x_never_loses() {
    let mut finished = 0;
    play_out(Board::new(), Player::X, Player::X, &mut finished);
    assert!(finished > 0);
}

#[test]
fn test_best_move_is_deterministic() {
    let board: Board = "X___O___X".parse().expect("Valid notation");
    let first = best_move(&board, Player::O, Player::O);
    for _ in 0..5 {
        assert_eq!(best_move(&board, Player::O, Player::O), first);
    }
}

#[test]
fn test_center_opening_reply_does_not_lose() {
    let board = Board::new().apply(4, Player::X).expect("Empty board");
    let scores = analyze(&board, Player::O, Player::O).expect("In progress");
    let index = best_move(&board, Player::O, Player::O).expect("In progress");

    let chosen = scores.iter().find(|m| m.index == index).expect("Chosen move scored");
    assert_eq!(chosen.score, DRAW_SCORE);
    // Edges lose against a centre opening; the search picks a corner.
    assert_eq!(index, 0);
}

#[test]
fn test_analyze_lists_moves_in_index_order() {
    let board: Board = "OO_XX_X__".parse().expect("Valid notation");
    let scores = analyze(&board, Player::O, Player::O).expect("In progress");
    let indices: Vec<usize> = scores.iter().map(|m| m.index).collect();
    assert_eq!(indices, vec![2, 5, 7, 8]);
    assert_eq!(scores[0].score, WIN_SCORE);
}

#[test]
fn test_full_board_has_no_legal_moves() {
    let board: Board = "XOXOXOOXO".parse().expect("Valid notation");
    assert_eq!(best_move(&board, Player::X, Player::O), Err(EngineError::NoLegalMoves));
}
