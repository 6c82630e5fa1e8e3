//! Command-line interface for rewind_games.

use crate::config::ModeChoice;
use clap::{Parser, Subcommand};
use rewind_tictactoe::Player;

/// Rewind Games - tic-tac-toe with a perfect opponent and time travel
#[derive(Parser, Debug)]
#[command(name = "rewind_games")]
#[command(about = "Tic-tac-toe with a perfect computer opponent and time travel")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Path to the game config file
        #[arg(short, long, default_value = "rewind_games.toml")]
        config: std::path::PathBuf,

        /// Skip the mode menu and start in this mode
        #[arg(short, long, value_enum)]
        mode: Option<ModeChoice>,

        /// Side the computer plays in single player mode (X or O)
        #[arg(long)]
        ai_side: Option<Player>,
    },

    /// Print the minimax score of every move on a board
    Solve {
        /// Board notation, row-major: X, O and _ for empty (e.g. "XO__X____")
        board: String,

        /// Score from this side's view (defaults to the side to move)
        #[arg(long)]
        ai_side: Option<Player>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
