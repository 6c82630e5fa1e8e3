//! Tests for the board analysis behind the `solve` command.

use rewind_games::{SolveError, render, solve};
use rewind_tictactoe::{Board, Player, Position};

#[test]
fn test_empty_board_is_a_draw_everywhere() {
    let report = solve(&Board::new(), None).unwrap();
    assert_eq!(report.to_move, Player::X);
    assert_eq!(report.moves.len(), 9);
    assert!(report.moves.iter().all(|m| m.score == 0));
    // Ties go to the lowest index
    assert_eq!(report.best, Some(Position::TopLeft));
}

#[test]
fn test_scores_from_other_side() {
    let board: Board = "OO_XX_X__".parse().unwrap();
    let report = solve(&board, Some(Player::X)).unwrap();
    assert_eq!(report.ai_side, Player::X);
    let top_right = report.moves.iter().find(|m| m.index == 2).unwrap();
    assert_eq!(top_right.score, -1);
}

#[test]
fn test_blocks_when_it_cannot_win() {
    let board: Board = "XX__O____".parse().unwrap();
    let report = solve(&board, None).unwrap();
    assert_eq!(report.to_move, Player::O);
    assert_eq!(report.best, Some(Position::TopRight));
}

#[test]
fn test_rejects_unreachable_board() {
    let board: Board = "XXX______".parse().unwrap();
    assert!(matches!(
        solve(&board, None),
        Err(SolveError::InvalidMarkCounts { x_count: 3, o_count: 0 })
    ));
}

#[test]
fn test_json_report_shape() {
    let board: Board = "X___O____".parse().unwrap();
    let report = solve(&board, None).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["board"], "X___O____");
    assert_eq!(json["to_move"], "X");
    assert_eq!(json["moves"].as_array().map(Vec::len), Some(7));
}

#[test]
fn test_render_draw() {
    let board: Board = "XOXXOOOXX".parse().unwrap();
    let report = solve(&board, None).unwrap();
    assert!(render(&report, &board).contains("Draw"));
}
