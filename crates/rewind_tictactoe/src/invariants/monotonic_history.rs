//! Monotonic history invariant: marks are added one at a time, never removed.

use super::Invariant;
use crate::game::Game;
use crate::types::Square;

/// Invariant: each snapshot equals its predecessor plus exactly one mark.
///
/// A square that holds a mark keeps it in every later snapshot.
pub struct MonotonicHistoryInvariant;

impl Invariant<Game> for MonotonicHistoryInvariant {
    fn holds(game: &Game) -> bool {
        game.history().windows(2).all(|pair| {
            let (before, after) = (pair[0].squares(), pair[1].squares());
            let mut added = 0;
            for (old, new) in before.iter().zip(after.iter()) {
                match (old, new) {
                    (Square::Empty, Square::Occupied(_)) => added += 1,
                    (old, new) if old == new => {}
                    _ => return false,
                }
            }
            added == 1
        })
    }

    fn description() -> &'static str {
        "Each snapshot adds exactly one mark and never clears one"
    }
}
