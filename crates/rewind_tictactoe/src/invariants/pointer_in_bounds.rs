//! Pointer invariant: the pointer names a stored snapshot.

use super::Invariant;
use crate::game::Game;

/// Invariant: `0 <= pointer < history.len()`.
pub struct PointerInBoundsInvariant;

impl Invariant<Game> for PointerInBoundsInvariant {
    fn holds(game: &Game) -> bool {
        game.pointer() < game.history_len()
    }

    fn description() -> &'static str {
        "Pointer refers to a stored snapshot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Mode;
    use crate::types::Player;

    #[test]
    fn test_jump_keeps_pointer_in_bounds() {
        let mut game = Game::replay(Mode::Multiplayer, Player::O, &[0, 1]).unwrap();
        game.jump_to(1).unwrap();
        assert!(PointerInBoundsInvariant::holds(&game));
    }

    #[test]
    fn test_dangling_pointer_violates() {
        let mut game = Game::new();
        game.pointer = 3;
        assert!(!PointerInBoundsInvariant::holds(&game));
    }
}
