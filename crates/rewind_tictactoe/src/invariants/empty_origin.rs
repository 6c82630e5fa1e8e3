//! Empty origin invariant: history starts from the empty board.

use super::Invariant;
use crate::game::Game;
use crate::types::Board;

/// Invariant: `history[0]` exists and is the empty board.
pub struct EmptyOriginInvariant;

impl Invariant<Game> for EmptyOriginInvariant {
    fn holds(game: &Game) -> bool {
        game.history().first() == Some(&Board::new())
    }

    fn description() -> &'static str {
        "History starts with the empty board"
    }
}
