//! First-class invariants over game history.
//!
//! Invariants are logical properties that must hold after every mutation of
//! a [`Game`]. They are checked in debug builds and can be tested
//! independently.

use crate::game::Game;
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of up to four invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>),+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

pub mod alternating_turn;
pub mod empty_origin;
pub mod monotonic_history;
pub mod pointer_in_bounds;

pub use alternating_turn::AlternatingTurnInvariant;
pub use empty_origin::EmptyOriginInvariant;
pub use monotonic_history::MonotonicHistoryInvariant;
pub use pointer_in_bounds::PointerInBoundsInvariant;

/// All history invariants as a composable set.
pub type GameInvariants = (
    EmptyOriginInvariant,
    MonotonicHistoryInvariant,
    AlternatingTurnInvariant,
    PointerInBoundsInvariant,
);

/// Asserts that all game invariants hold (panics on violation in debug builds).
pub(crate) fn assert_invariants(game: &Game) {
    if cfg!(debug_assertions)
        && let Err(violations) = GameInvariants::check_all(game)
    {
        for violation in &violations {
            warn!(description = %violation.description, "Invariant violated");
        }
        panic!("Game invariants violated: {:?}", violations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Mode;
    use crate::types::{Board, Player};

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        assert!(GameInvariants::check_all(&Game::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let game = Game::replay(Mode::Multiplayer, Player::O, &[0, 4, 2]).unwrap();
        assert!(GameInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut game = Game::replay(Mode::Multiplayer, Player::O, &[4]).unwrap();

        // Corrupt the origin
        game.history[0] = Board::new().apply(0, Player::O).unwrap();

        let violations = GameInvariants::check_all(&game).unwrap_err();
        assert!(violations.len() >= 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (EmptyOriginInvariant, PointerInBoundsInvariant);
        assert!(TwoInvariants::check_all(&Game::new()).is_ok());
    }
}
