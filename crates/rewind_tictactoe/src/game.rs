//! Rewindable game session.
//!
//! [`Game`] owns the ordered history of board snapshots, the pointer to the
//! snapshot being shown, and the play mode. Every accepted move goes through
//! one path: drop history past the pointer, append the new snapshot, move the
//! pointer onto it. The side to move is always derived from the pointer.

use crate::contracts::{Contract, MoveContract};
use crate::error::{EngineError, IllegalMove, InvalidGame};
use crate::invariants::{GameInvariants, InvariantSet, assert_invariants};
use crate::position::Position;
use crate::rules::evaluate;
use crate::search;
use crate::types::{Board, Outcome, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// How the session is played.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mode {
    /// No mode chosen yet; moves are refused.
    #[default]
    Undetermined,
    /// One human against the computer.
    #[strum(to_string = "SinglePlayer", serialize = "single")]
    SinglePlayer,
    /// Two humans sharing the board.
    #[strum(to_string = "Multiplayer", serialize = "multi")]
    Multiplayer,
}

/// Outcome of the shown snapshot plus the side to move there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Outcome of the current snapshot.
    pub outcome: Outcome,
    /// Side to move in the current snapshot.
    pub to_move: Player,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.outcome {
            Outcome::InProgress => write!(f, "Next player: {}", self.to_move),
            outcome => write!(f, "{}", outcome),
        }
    }
}

/// One row of the "jump to move" list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// History index to pass to [`Game::jump_to`].
    pub move_index: usize,
    /// True for the empty starting board.
    pub is_start: bool,
    /// Square filled by this move; `None` for the start.
    pub played: Option<Position>,
}

/// Tic-tac-toe session with time travel.
///
/// Deserialization refuses any history or pointer that breaks the session
/// invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameRecord")]
pub struct Game {
    pub(crate) mode: Mode,
    pub(crate) history: Vec<Board>,
    pub(crate) pointer: usize,
    pub(crate) ai_side: Player,
}

impl Game {
    /// New session; the computer plays O in single player mode.
    pub fn new() -> Self {
        Self::with_ai_side(Player::O)
    }

    /// New session with the computer playing `ai_side` in single player mode.
    #[instrument]
    pub fn with_ai_side(ai_side: Player) -> Self {
        Self {
            mode: Mode::Undetermined,
            history: vec![Board::new()],
            pointer: 0,
            ai_side,
        }
    }

    /// Rebuilds a session by requesting `moves` in order.
    ///
    /// In single player mode the computer's replies are generated as usual, so
    /// `moves` holds only the human's squares.
    #[instrument]
    pub fn replay(mode: Mode, ai_side: Player, moves: &[usize]) -> Result<Self, EngineError> {
        let mut game = Self::with_ai_side(ai_side);
        game.choose_mode(mode)?;
        for &index in moves {
            game.request_move(index)?;
        }
        Ok(game)
    }

    // ─────────────────────────────────────────────────────────────
    //  Read-only view
    // ─────────────────────────────────────────────────────────────

    /// The snapshot at the pointer.
    pub fn current_board(&self) -> Board {
        self.history[self.pointer]
    }

    /// Side to move in the current snapshot.
    pub fn to_move(&self) -> Player {
        Player::to_move_after(self.pointer)
    }

    /// Outcome of the current snapshot.
    pub fn outcome(&self) -> Outcome {
        evaluate(&self.current_board())
    }

    /// Outcome plus side to move, for status text.
    pub fn status(&self) -> Status {
        Status {
            outcome: self.outcome(),
            to_move: self.to_move(),
        }
    }

    /// One entry per snapshot, oldest first.
    pub fn history_labels(&self) -> Vec<HistoryEntry> {
        self.history
            .iter()
            .enumerate()
            .map(|(move_index, board)| HistoryEntry {
                move_index,
                is_start: move_index == 0,
                played: move_index
                    .checked_sub(1)
                    .and_then(|prev| changed_square(&self.history[prev], board)),
            })
            .collect()
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Index of the shown snapshot.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Number of snapshots, including the empty start.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// All snapshots, oldest first.
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    /// Side the computer plays in single player mode.
    pub fn ai_side(&self) -> Player {
        self.ai_side
    }

    /// True when single player, still open, and the computer is to move.
    pub fn is_computer_turn(&self) -> bool {
        self.mode == Mode::SinglePlayer
            && self.outcome() == Outcome::InProgress
            && self.to_move() == self.ai_side
    }

    // ─────────────────────────────────────────────────────────────
    //  Mutations
    // ─────────────────────────────────────────────────────────────

    /// Chooses single player or multiplayer for this session.
    ///
    /// If the computer plays X in single player mode it opens immediately.
    ///
    /// # Errors
    ///
    /// [`IllegalMove::ModeAlreadyChosen`] if a mode is already set, and
    /// [`IllegalMove::ModeUnset`] when asked to choose `Undetermined`.
    #[instrument(skip(self), fields(current = %self.mode))]
    pub fn choose_mode(&mut self, mode: Mode) -> Result<(), EngineError> {
        if self.mode != Mode::Undetermined {
            warn!("Mode change refused");
            return Err(IllegalMove::ModeAlreadyChosen.into());
        }
        if mode == Mode::Undetermined {
            return Err(IllegalMove::ModeUnset.into());
        }

        info!(%mode, ai_side = %self.ai_side, "Mode chosen");
        self.mode = mode;
        self.reply_as_computer();
        Ok(())
    }

    /// Places the side-to-move's mark at `index` on behalf of a human.
    ///
    /// History past the pointer is discarded before the new snapshot is
    /// appended. In single player mode the computer's reply is appended in
    /// the same call.
    ///
    /// # Errors
    ///
    /// [`EngineError::IllegalMove`] when no mode is chosen, the game is over,
    /// the index is off the board or occupied, or it is the computer's turn.
    /// State is unchanged on error.
    #[instrument(skip(self), fields(pointer = self.pointer, to_move = %self.to_move()))]
    pub fn request_move(&mut self, index: usize) -> Result<(), EngineError> {
        if let Err(reason) = MoveContract::pre(self, &index) {
            warn!(%reason, "Move rejected");
            return Err(reason.into());
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let next = self.current_board().apply(index, self.to_move())?;
        self.advance(next);
        debug!(index, history_len = self.history.len(), "Move accepted");

        self.reply_as_computer();

        #[cfg(debug_assertions)]
        if let Err(violations) = MoveContract::post(&before, self) {
            panic!("Move postcondition failed: {:?}", violations);
        }

        Ok(())
    }

    /// Lets the computer move from the current snapshot.
    ///
    /// After [`Game::jump_to`] lands on a snapshot where the computer is to
    /// move, human requests are refused until this is called.
    ///
    /// # Errors
    ///
    /// [`IllegalMove::ModeUnset`], [`IllegalMove::GameOver`], or
    /// [`IllegalMove::NotComputersTurn`].
    #[instrument(skip(self), fields(pointer = self.pointer))]
    pub fn resume_computer(&mut self) -> Result<(), EngineError> {
        if self.mode == Mode::Undetermined {
            return Err(IllegalMove::ModeUnset.into());
        }
        if self.outcome().is_terminal() {
            return Err(IllegalMove::GameOver.into());
        }
        if !self.is_computer_turn() {
            return Err(IllegalMove::NotComputersTurn.into());
        }

        self.reply_as_computer();
        Ok(())
    }

    /// Moves the pointer to `move_index` without touching history.
    ///
    /// # Errors
    ///
    /// [`EngineError::OutOfRange`] if `move_index` is past the last snapshot.
    #[instrument(skip(self), fields(history_len = self.history.len()))]
    pub fn jump_to(&mut self, move_index: usize) -> Result<(), EngineError> {
        if move_index >= self.history.len() {
            warn!("Jump rejected");
            return Err(EngineError::OutOfRange {
                index: move_index,
                len: self.history.len(),
            });
        }

        self.pointer = move_index;
        debug!(pointer = self.pointer, "Jumped");
        assert_invariants(self);
        Ok(())
    }

    /// Starts over: empty board, no mode.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Starting over");
        self.mode = Mode::Undetermined;
        self.history.clear();
        self.history.push(Board::new());
        self.pointer = 0;
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    /// Truncate-append-advance.
    fn advance(&mut self, next: Board) {
        self.history.truncate(self.pointer + 1);
        self.history.push(next);
        self.pointer = self.history.len() - 1;
        assert_invariants(self);
    }

    /// Appends computer moves until a human is to move or the game ends.
    fn reply_as_computer(&mut self) {
        while self.is_computer_turn() {
            let board = self.current_board();
            let side = self.to_move();
            let next = search::best_move(&board, side, self.ai_side)
                .and_then(|index| board.apply(index, side));

            match next {
                Ok(next) => {
                    self.advance(next);
                    debug!(history_len = self.history.len(), "Computer moved");
                }
                Err(err) => {
                    error!(%err, board = %board.to_notation(), "Computer could not move");
                    debug_assert!(false, "computer could not move: {}", err);
                    return;
                }
            }
        }
    }
}

/// Unchecked wire form of a [`Game`].
#[derive(Debug, Deserialize)]
struct GameRecord {
    mode: Mode,
    history: Vec<Board>,
    pointer: usize,
    ai_side: Player,
}

impl TryFrom<GameRecord> for Game {
    type Error = InvalidGame;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let game = Self {
            mode: record.mode,
            history: record.history,
            pointer: record.pointer,
            ai_side: record.ai_side,
        };
        GameInvariants::check_all(&game).map_err(|violations| {
            warn!(count = violations.len(), "Stored game rejected");
            InvalidGame {
                reasons: violations.into_iter().map(|v| v.description).collect(),
            }
        })?;
        Ok(game)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// The square that differs between two consecutive snapshots.
fn changed_square(before: &Board, after: &Board) -> Option<Position> {
    (0..Board::CELLS)
        .find(|&i| before.get(i) != after.get(i))
        .and_then(Position::from_index)
}
