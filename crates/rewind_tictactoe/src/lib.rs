//! Tic-tac-toe engine with a perfect computer opponent and rewindable history.
//!
//! # Architecture
//!
//! - **Board model**: [`Board`], [`Square`], [`Player`] are small `Copy` values
//! - **Rules**: [`evaluate`] classifies a board as won, drawn or in progress
//! - **Search**: [`best_move`] solves the position exactly with minimax
//! - **Session**: [`Game`] owns the snapshot history, the pointer and the mode
//!
//! # Example
//!
//! ```
//! use rewind_tictactoe::{Game, Mode, Outcome};
//!
//! # fn example() -> Result<(), rewind_tictactoe::EngineError> {
//! let mut game = Game::new();
//! game.choose_mode(Mode::SinglePlayer)?;
//! game.request_move(4)?;
//!
//! // The computer has already answered.
//! assert_eq!(game.history_len(), 3);
//! assert_eq!(game.outcome(), Outcome::InProgress);
//!
//! // Rewind to the start; history is kept until the next move.
//! game.jump_to(0)?;
//! game.request_move(0)?;
//! assert_eq!(game.history_len(), 3);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod contracts;
mod error;
mod game;
mod invariants;
mod position;
mod rules;
mod search;
mod types;

// Crate-level exports - Board model
pub use types::{Board, Outcome, Player, Square};

// Crate-level exports - Positions
pub use position::Position;

// Crate-level exports - Errors
pub use error::{BoardParseError, EngineError, IllegalMove, InvalidGame};

// Crate-level exports - Rules
pub use rules::{LINES, check_winner, evaluate, is_draw, is_full, winning_line};

// Crate-level exports - Search
pub use search::{DRAW_SCORE, LOSS_SCORE, MoveScore, WIN_SCORE, analyze, best_move};

// Crate-level exports - Session
pub use game::{Game, HistoryEntry, Mode, Status};

// Crate-level exports - Contracts and invariants
pub use contracts::{
    Contract, GameNotOver, HumansTurn, LegalRequest, ModeChosen, MoveContract, SquareIsEmpty,
};
pub use invariants::{
    AlternatingTurnInvariant, EmptyOriginInvariant, GameInvariants, Invariant, InvariantSet,
    InvariantViolation, MonotonicHistoryInvariant, PointerInBoundsInvariant,
};
