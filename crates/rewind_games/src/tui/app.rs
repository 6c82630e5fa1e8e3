//! Application state and key handling.

use super::input::{digit_to_index, move_cursor};
use crate::config::{GameConfig, ModeChoice};
use crossterm::event::KeyCode;
use rewind_tictactoe::{EngineError, Game, Mode, Position};
use tracing::{debug, info, instrument};

/// Main application state.
pub struct App {
    game: Game,
    cursor: Position,
    status_message: String,
    default_mode: Option<ModeChoice>,
    should_quit: bool,
}

impl App {
    /// Creates a new application from configuration.
    #[instrument(skip(config))]
    pub fn new(config: &GameConfig) -> Self {
        let mut app = Self {
            game: Game::with_ai_side(*config.ai_side()),
            cursor: Position::Center,
            status_message: String::new(),
            default_mode: *config.default_mode(),
            should_quit: false,
        };
        app.start();
        app
    }

    /// Gets the current game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Gets the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Enters the configured mode, or prompts for one.
    fn start(&mut self) {
        match self.default_mode {
            Some(choice) => self.choose(choice.into()),
            None => {
                self.status_message = "Press 's' for single player or 'm' for multiplayer".into();
            }
        }
    }

    fn choose(&mut self, mode: Mode) {
        let result = self.game.choose_mode(mode);
        self.report(result, || match mode {
            Mode::SinglePlayer => "Single player. Arrows + Enter or 1-9 to move".into(),
            _ => "Multiplayer. Arrows + Enter or 1-9 to move".into(),
        });
    }

    fn place(&mut self, index: usize) {
        let result = self.game.request_move(index);
        let status = self.game.status();
        self.report(result, || status.to_string());
    }

    fn jump(&mut self, move_index: usize) {
        let result = self.game.jump_to(move_index);
        let message = if self.game.is_computer_turn() {
            format!("At move #{}. Press 'c' to let the computer play", move_index)
        } else {
            format!("At move #{}", move_index)
        };
        self.report(result, || message);
    }

    /// Updates the status line with either the success text or the error.
    fn report(&mut self, result: Result<(), EngineError>, on_ok: impl FnOnce() -> String) {
        self.status_message = match result {
            Ok(()) => on_ok(),
            Err(e) => {
                debug!(error = %e, "Request rejected");
                e.to_string()
            }
        };
    }

    /// Handles one key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) {
        let pointer = self.game.pointer();
        let last = self.game.history_len() - 1;

        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyCode::Char('r') => {
                self.game.reset();
                self.cursor = Position::Center;
                self.start();
            }
            KeyCode::Char('s') if self.game.mode() == Mode::Undetermined => {
                self.choose(Mode::SinglePlayer)
            }
            KeyCode::Char('m') if self.game.mode() == Mode::Undetermined => {
                self.choose(Mode::Multiplayer)
            }
            KeyCode::Char('c') => {
                let result = self.game.resume_computer();
                let status = self.game.status();
                self.report(result, || status.to_string());
            }
            KeyCode::Char('[') => self.jump(pointer.saturating_sub(1)),
            KeyCode::Char(']') => self.jump((pointer + 1).min(last)),
            KeyCode::Home => self.jump(0),
            KeyCode::End => self.jump(last),
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor.to_index()),
            KeyCode::Char(c) => {
                if let Some(index) = digit_to_index(c) {
                    if let Some(pos) = Position::from_index(index) {
                        self.cursor = pos;
                    }
                    self.place(index);
                }
            }
            arrow @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
                self.cursor = move_cursor(self.cursor, arrow);
            }
            _ => {}
        }
    }
}
