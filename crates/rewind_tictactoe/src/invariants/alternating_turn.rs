//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::Invariant;
use crate::game::Game;
use crate::types::Player;

/// Invariant: players alternate turns.
///
/// Snapshot `k` holds `ceil(k/2)` X marks and `floor(k/2)` O marks, so the
/// mark added by move `k` belongs to the side to move in snapshot `k - 1`.
pub struct AlternatingTurnInvariant;

impl Invariant<Game> for AlternatingTurnInvariant {
    fn holds(game: &Game) -> bool {
        game.history().iter().enumerate().all(|(k, board)| {
            board.mark_count(Player::X) == k.div_ceil(2) && board.mark_count(Player::O) == k / 2
        })
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
