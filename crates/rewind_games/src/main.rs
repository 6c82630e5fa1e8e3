//! Rewind Games - Unified CLI
//!
//! Play tic-tac-toe in the terminal or analyze a board.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use rewind_games::{Cli, Command, GameConfig, ModeChoice, render, solve, tui};
use rewind_tictactoe::{Board, Player};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            mode,
            ai_side,
        } => run_play(config, mode, ai_side),
        Command::Solve {
            board,
            ai_side,
            json,
        } => run_solve(&board, ai_side, json),
    }
}

/// Run the terminal UI
fn run_play(config: PathBuf, mode: Option<ModeChoice>, ai_side: Option<Player>) -> Result<()> {
    let config = GameConfig::load_or_default(&config)
        .with_context(|| format!("Failed to load config from {}", config.display()))?
        .with_overrides(ai_side, mode);

    tui::run_tui(&config)
}

/// Analyze one board and print the result
#[instrument(skip(board_text))]
fn run_solve(board_text: &str, ai_side: Option<Player>, json: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let board: Board = board_text
        .parse()
        .with_context(|| format!("Invalid board '{}'", board_text))?;
    let report = solve(&board, ai_side)?;
    info!(best = ?report.best, "Analysis complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render(&report, &board));
    }
    Ok(())
}
