//! Rewind Games - terminal front end for the tic-tac-toe engine.
//!
//! Provides the `play` terminal UI and the `solve` analysis command.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod solve;
pub mod tui;

// Command line
pub use cli::{Cli, Command};

// Configuration
pub use config::{ConfigError, GameConfig, ModeChoice};

// Analysis
pub use solve::{MoveReport, SolveError, SolveReport, render, side_to_move, solve};
