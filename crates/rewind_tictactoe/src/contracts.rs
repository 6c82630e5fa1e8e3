//! Contract-based validation for move requests.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::error::IllegalMove;
use crate::game::{Game, Mode};
use crate::invariants::{GameInvariants, InvariantSet, InvariantViolation};
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), IllegalMove>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: a mode has been chosen.
pub struct ModeChosen;

impl ModeChosen {
    /// Refuses requests in an undetermined session.
    pub fn check(game: &Game) -> Result<(), IllegalMove> {
        if game.mode() == Mode::Undetermined {
            Err(IllegalMove::ModeUnset)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the shown snapshot is neither won nor drawn.
pub struct GameNotOver;

impl GameNotOver {
    /// Refuses requests on a finished snapshot.
    pub fn check(game: &Game) -> Result<(), IllegalMove> {
        if game.outcome().is_terminal() {
            Err(IllegalMove::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the index is on the board and its square is empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Refuses off-board and occupied squares.
    pub fn check(index: usize, game: &Game) -> Result<(), IllegalMove> {
        match game.current_board().get(index) {
            None => Err(IllegalMove::OutOfBounds(index)),
            Some(square) if square.player().is_some() => Err(IllegalMove::SquareOccupied(index)),
            Some(_) => Ok(()),
        }
    }
}

/// Precondition: a human is the side to move.
pub struct HumansTurn;

impl HumansTurn {
    /// In single player mode, refuses requests on the computer's turn.
    pub fn check(game: &Game) -> Result<(), IllegalMove> {
        if game.is_computer_turn() {
            Err(IllegalMove::ComputersTurn)
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for a human move request.
pub struct LegalRequest;

impl LegalRequest {
    /// Validates all preconditions for a move request.
    #[instrument(skip(game))]
    pub fn check(index: usize, game: &Game) -> Result<(), IllegalMove> {
        ModeChosen::check(game)?;
        GameNotOver::check(game)?;
        SquareIsEmpty::check(index, game)?;
        HumansTurn::check(game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for human move requests.
///
/// Postconditions:
/// - history up to the old pointer is untouched
/// - one human move, plus at most one computer reply, was appended
/// - the pointer sits on the last snapshot
/// - every history invariant holds
pub struct MoveContract;

impl Contract<Game, usize> for MoveContract {
    fn pre(game: &Game, index: &usize) -> Result<(), IllegalMove> {
        LegalRequest::check(*index, game)
    }

    fn post(before: &Game, after: &Game) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = GameInvariants::check_all(after).err().unwrap_or_default();

        let kept = before.pointer() + 1;
        if after.history().get(..kept) != before.history().get(..kept) {
            violations.push(InvariantViolation::new(
                "Snapshots up to the pointer were rewritten",
            ));
        }

        let appended = after.history_len().saturating_sub(kept);
        if !(1..=2).contains(&appended) {
            violations.push(InvariantViolation::new(format!(
                "Expected one or two new snapshots, found {}",
                appended
            )));
        }

        if after.pointer() + 1 != after.history_len() {
            violations.push(InvariantViolation::new("Pointer is not on the last snapshot"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Board, Player};

    fn multiplayer() -> Game {
        let mut game = Game::new();
        game.choose_mode(Mode::Multiplayer).unwrap();
        game
    }

    #[test]
    fn test_precondition_empty_square() {
        let game = multiplayer();
        assert!(MoveContract::pre(&game, &4).is_ok());
    }

    #[test]
    fn test_precondition_occupied_square() {
        let mut game = multiplayer();
        game.request_move(4).unwrap();
        assert_eq!(
            MoveContract::pre(&game, &4),
            Err(IllegalMove::SquareOccupied(4))
        );
    }

    #[test]
    fn test_precondition_off_board() {
        let game = multiplayer();
        assert_eq!(MoveContract::pre(&game, &9), Err(IllegalMove::OutOfBounds(9)));
    }

    #[test]
    fn test_precondition_computers_turn() {
        let mut game = Game::with_ai_side(Player::O);
        game.choose_mode(Mode::SinglePlayer).unwrap();
        game.request_move(4).unwrap();
        game.jump_to(1).unwrap();
        assert_eq!(MoveContract::pre(&game, &0), Err(IllegalMove::ComputersTurn));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = multiplayer();
        let mut after = before.clone();
        after.request_move(0).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_rewritten_history() {
        let mut before = multiplayer();
        before.request_move(0).unwrap();
        let mut after = before.clone();
        after.request_move(4).unwrap();

        // Swap the first move for a different square
        after.history[1] = Board::new().apply(8, Player::X).unwrap();
        assert!(MoveContract::post(&before, &after).is_err());
    }
}
