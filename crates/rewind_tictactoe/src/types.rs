//! Core domain types for tic-tac-toe.

use crate::error::{BoardParseError, EngineError, IllegalMove};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A side in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Side to move in the snapshot reached after `moves_played` moves.
    pub fn to_move_after(moves_played: usize) -> Self {
        if moves_played % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// The player holding this square, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Boards are values: [`Board::apply`] returns a new board and leaves the
/// receiver untouched, so a snapshot stored in history stays valid forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Number of cells on the board.
    pub const CELLS: usize = 9;

    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; Self::CELLS],
        }
    }

    /// Builds a board directly from its squares.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks if a square is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns a new board with `player`'s mark at `index`.
    ///
    /// # Errors
    ///
    /// [`IllegalMove::OutOfBounds`] when `index > 8`, and
    /// [`IllegalMove::SquareOccupied`] when the square already holds a mark.
    pub fn apply(&self, index: usize, player: Player) -> Result<Board, EngineError> {
        match self.get(index) {
            None => Err(IllegalMove::OutOfBounds(index).into()),
            Some(Square::Occupied(_)) => Err(IllegalMove::SquareOccupied(index).into()),
            Some(Square::Empty) => Ok(self.with_mark(index, player)),
        }
    }

    /// Copy with `player`'s mark at `index`, without validation.
    ///
    /// Callers pass an index taken from [`Board::empty_indices`].
    pub(crate) fn with_mark(&self, index: usize, player: Player) -> Board {
        let mut next = *self;
        next.squares[index] = Square::Occupied(player);
        next
    }

    /// True iff no square is empty.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Indices of empty squares in ascending order.
    pub fn empty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Square::Empty)
            .map(|(i, _)| i)
    }

    /// Number of marks placed by `player`.
    pub fn mark_count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Compact notation: `X`, `O` and `_` for empty, row-major.
    pub fn to_notation(&self) -> String {
        self.squares
            .iter()
            .map(|s| match s {
                Square::Empty => '_',
                Square::Occupied(Player::X) => 'X',
                Square::Occupied(Player::O) => 'O',
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.squares[pos] {
                    Square::Empty => write!(f, "{}", pos + 1)?,
                    Square::Occupied(player) => write!(f, "{}", player)?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses board notation such as `"XXX_OO___"` or `"XO_|_X_|__O"`.
    ///
    /// Separators (`|`, `/`) and whitespace are ignored; `_`, `.` and `-`
    /// mark empty squares.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = [Square::Empty; Board::CELLS];
        let mut count = 0;

        for (offset, ch) in s.chars().enumerate() {
            let square = match ch.to_ascii_uppercase() {
                'X' => Square::Occupied(Player::X),
                'O' => Square::Occupied(Player::O),
                '_' | '.' | '-' => Square::Empty,
                '|' | '/' => continue,
                c if c.is_whitespace() => continue,
                _ => {
                    return Err(BoardParseError::InvalidCharacter {
                        character: ch,
                        offset,
                    });
                }
            };
            if count < Board::CELLS {
                squares[count] = square;
            }
            count += 1;
        }

        if count != Board::CELLS {
            return Err(BoardParseError::WrongLength { got: count });
        }

        Ok(Board { squares })
    }
}

/// Outcome of a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line completed and empty squares remain.
    InProgress,
    /// A player completed a line.
    Win(Player),
    /// Board full with no completed line.
    Draw,
}

impl Outcome {
    /// True for `Win` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win(player) => write!(f, "Winner: {}", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
