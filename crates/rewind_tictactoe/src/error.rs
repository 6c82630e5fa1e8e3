//! Error types for the engine.

use serde::{Deserialize, Serialize};

/// Why a move or mode request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum IllegalMove {
    /// Index outside 0-8.
    #[display("Position {} is off the board", _0)]
    OutOfBounds(usize),

    /// The square at the index already holds a mark.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(usize),

    /// The current snapshot is already won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// Single player mode and the computer is the side to move.
    #[display("It's the computer's turn")]
    ComputersTurn,

    /// The computer was asked to move on the human's turn.
    #[display("It's not the computer's turn")]
    NotComputersTurn,

    /// No mode has been chosen yet.
    #[display("Choose single player or multiplayer first")]
    ModeUnset,

    /// A mode was already chosen for this session.
    #[display("Mode already chosen; start over to change it")]
    ModeAlreadyChosen,
}

impl std::error::Error for IllegalMove {}

/// Error returned by engine operations.
///
/// Every error is a rejection: the game state is unchanged when one is
/// returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum EngineError {
    /// The request breaks the rules of the game.
    #[display("Illegal move: {}", _0)]
    IllegalMove(IllegalMove),

    /// History index passed to a jump is past the end of history.
    #[display("Move #{} is out of range (history has {} entries)", index, len)]
    OutOfRange {
        /// Requested history index.
        index: usize,
        /// Length of history at the time of the request.
        len: usize,
    },

    /// Search was asked to move on a finished board.
    #[display("No legal moves on a finished board")]
    NoLegalMoves,
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::IllegalMove(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<IllegalMove> for EngineError {
    fn from(reason: IllegalMove) -> Self {
        EngineError::IllegalMove(reason)
    }
}

/// Error parsing board notation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// Notation did not describe exactly nine squares.
    #[display("Expected 9 squares, got {}", got)]
    WrongLength {
        /// Number of squares read.
        got: usize,
    },

    /// A character that is not a mark, an empty marker or a separator.
    #[display("Invalid character '{}' at offset {}", character, offset)]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Character offset in the input.
        offset: usize,
    },
}

impl std::error::Error for BoardParseError {}

/// A stored session that breaks the history invariants.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invalid game: {}", reasons.join("; "))]
pub struct InvalidGame {
    /// Description of each violated invariant.
    pub reasons: Vec<String>,
}

impl std::error::Error for InvalidGame {}
