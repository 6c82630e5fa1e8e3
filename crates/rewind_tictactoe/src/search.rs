//! Exact minimax search.
//!
//! The tree is small enough to solve outright, so there is no depth limit,
//! no pruning and no heuristic: every line is played to a finished board.
//! Children are explored on copies of the board, so sibling branches never
//! see each other's marks.

use crate::error::EngineError;
use crate::rules::evaluate;
use crate::types::{Board, Outcome, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a finished board won by the computer side.
pub const WIN_SCORE: i32 = 1;
/// Score of a finished board won by the other side.
pub const LOSS_SCORE: i32 = -1;
/// Score of a drawn board.
pub const DRAW_SCORE: i32 = 0;

/// Minimax value of one candidate move, from the computer side's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveScore {
    /// Board index of the move.
    pub index: usize,
    /// Value of the position after the move under perfect play.
    pub score: i32,
}

fn terminal_score(outcome: Outcome, ai_side: Player) -> Option<i32> {
    match outcome {
        Outcome::InProgress => None,
        Outcome::Draw => Some(DRAW_SCORE),
        Outcome::Win(winner) if winner == ai_side => Some(WIN_SCORE),
        Outcome::Win(_) => Some(LOSS_SCORE),
    }
}

/// Value of `board` with `side` to move.
fn minimax(board: Board, side: Player, ai_side: Player) -> i32 {
    if let Some(score) = terminal_score(evaluate(&board), ai_side) {
        return score;
    }

    let maximizing = side == ai_side;
    let mut best: Option<i32> = None;
    for index in board.empty_indices() {
        let score = minimax(board.with_mark(index, side), side.opponent(), ai_side);
        best = Some(match best {
            None => score,
            Some(current) if maximizing => current.max(score),
            Some(current) => current.min(score),
        });
    }

    // A board that is not finished always has an empty square.
    best.unwrap_or(DRAW_SCORE)
}

/// First candidate holding the extreme score, in ascending index order.
fn select(scores: &[MoveScore], maximizing: bool) -> Option<MoveScore> {
    let mut best: Option<MoveScore> = None;
    for &candidate in scores {
        let better = match best {
            None => true,
            Some(current) if maximizing => candidate.score > current.score,
            Some(current) => candidate.score < current.score,
        };
        if better {
            best = Some(candidate);
        }
    }
    best
}

/// Scores every legal move for `side_to_move`, in ascending index order.
///
/// # Errors
///
/// [`EngineError::NoLegalMoves`] if the board is already won or drawn.
#[instrument(skip(board), fields(board = %board.to_notation()))]
pub fn analyze(
    board: &Board,
    side_to_move: Player,
    ai_side: Player,
) -> Result<Vec<MoveScore>, EngineError> {
    if evaluate(board).is_terminal() {
        return Err(EngineError::NoLegalMoves);
    }

    Ok(board
        .empty_indices()
        .map(|index| MoveScore {
            index,
            score: minimax(
                board.with_mark(index, side_to_move),
                side_to_move.opponent(),
                ai_side,
            ),
        })
        .collect())
}

/// Picks the optimal move for `side_to_move`.
///
/// The computer side (`ai_side`) maximises the score and the other side
/// minimises it. Among equally good moves the lowest index is chosen, so the
/// same position always produces the same move.
///
/// # Errors
///
/// [`EngineError::NoLegalMoves`] if the board is already won or drawn.
#[instrument(skip(board), fields(board = %board.to_notation()))]
pub fn best_move(
    board: &Board,
    side_to_move: Player,
    ai_side: Player,
) -> Result<usize, EngineError> {
    let scores = analyze(board, side_to_move, ai_side)?;
    let chosen = select(&scores, side_to_move == ai_side).ok_or(EngineError::NoLegalMoves)?;
    debug!(index = chosen.index, score = chosen.score, "Search chose move");
    Ok(chosen.index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_immediate_win() {
        let board: Board = "OO_XX____".parse().unwrap();
        assert_eq!(best_move(&board, Player::O, Player::O), Ok(2));
    }

    #[test]
    fn test_blocks_opponent_line() {
        let board: Board = "XX__O____".parse().unwrap();
        assert_eq!(best_move(&board, Player::O, Player::O), Ok(2));
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        // Every opening draws under perfect play.
        let scores = analyze(&Board::new(), Player::X, Player::X).unwrap();
        assert!(scores.iter().all(|m| m.score == DRAW_SCORE));
        assert_eq!(best_move(&Board::new(), Player::X, Player::X), Ok(0));
    }

    #[test]
    fn test_minimizing_side_picks_lowest_score() {
        // Human X to move can win at 2; from the computer's view that is a loss.
        let board: Board = "XX_OO____".parse().unwrap();
        assert_eq!(best_move(&board, Player::X, Player::O), Ok(2));
        let scores = analyze(&board, Player::X, Player::O).unwrap();
        assert_eq!(scores[0], MoveScore { index: 2, score: LOSS_SCORE });
    }

    #[test]
    fn test_finished_board_has_no_moves() {
        let won: Board = "XXX_OO___".parse().unwrap();
        assert_eq!(best_move(&won, Player::O, Player::O), Err(EngineError::NoLegalMoves));

        let drawn: Board = "XOXOXOOXO".parse().unwrap();
        assert_eq!(analyze(&drawn, Player::X, Player::O), Err(EngineError::NoLegalMoves));
    }

    #[test]
    fn test_search_does_not_touch_board() {
        let board: Board = "X___O____".parse().unwrap();
        let before = board;
        let _ = best_move(&board, Player::X, Player::O);
        assert_eq!(board, before);
    }
}
