//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. [`evaluate`] is the only place that
//! decides whether a position is won, drawn or still open; move validation
//! and the search both go through it.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, winning_line};

use crate::types::{Board, Outcome};

/// Classifies a board.
///
/// Lines are checked in [`LINES`] order and the first completed one wins.
/// Otherwise a full board is a draw.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(winner) = check_winner(board) {
        Outcome::Win(winner)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
