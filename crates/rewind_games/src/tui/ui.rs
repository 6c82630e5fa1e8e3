//! Stateless UI rendering.

use super::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use rewind_tictactoe::{Board, HistoryEntry, Mode, Player, Position, Square, winning_line};

const HELP: &str =
    "Arrows/1-9 move · Enter place · [ ] Home End travel · c computer · r restart · q quit";

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(13),   // Board + history
            Constraint::Length(3), // Message
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Rewind Games - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let game = app.game();
    let board = game.current_board();
    let highlight = winning_line(&board).map(|(line, _)| line);
    draw_board(frame, body[0], &board, app.cursor(), highlight);
    draw_side_panel(frame, body[1], app);

    let message = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(message, chunks[2]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_side_panel(frame: &mut Frame, area: Rect, app: &App) {
    let game = app.game();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let mode = match game.mode() {
        Mode::Undetermined => "Choose a mode".to_string(),
        Mode::SinglePlayer => format!("Single player (computer is {})", game.ai_side()),
        Mode::Multiplayer => "Multiplayer".to_string(),
    };
    let status = Paragraph::new(vec![
        Line::from(Span::styled(
            game.status().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(mode),
    ])
    .block(Block::default().title("Status").borders(Borders::ALL));
    frame.render_widget(status, chunks[0]);

    let items: Vec<ListItem> = game
        .history_labels()
        .iter()
        .map(|entry| ListItem::new(history_label(entry)))
        .collect();
    let list = List::new(items)
        .block(Block::default().title("History").borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(game.pointer()));
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn history_label(entry: &HistoryEntry) -> String {
    if entry.is_start {
        "Go to game start".to_string()
    } else {
        match entry.played {
            Some(pos) => format!("Go to move #{} ({})", entry.move_index, pos.label()),
            None => format!("Go to move #{}", entry.move_index),
        }
    }
}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Position,
    highlight: Option<[usize; 3]>,
) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        draw_row(frame, rows[row * 2], board, cursor, highlight, row);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Position,
    highlight: Option<[usize; 3]>,
    row: usize,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for col in 0..3 {
        if let Some(pos) = Position::from_row_col(row, col) {
            let in_line = highlight.is_some_and(|line| line.contains(&pos.to_index()));
            draw_cell(frame, cols[col * 2], board, pos, pos == cursor, in_line);
        }
        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    pos: Position,
    selected: bool,
    in_line: bool,
) {
    let square = board.get(pos.to_index()).unwrap_or(Square::Empty);

    let (symbol, base_style) = match square {
        Square::Empty => ("   ".to_string(), Style::default().fg(Color::DarkGray)),
        Square::Occupied(player) => (
            format!(" {} ", player),
            Style::default()
                .fg(match player {
                    Player::X => Color::Blue,
                    Player::O => Color::Red,
                })
                .add_modifier(Modifier::BOLD),
        ),
    };

    let style = match (selected, in_line) {
        (true, _) => base_style.bg(Color::White).fg(Color::Black),
        (false, true) => base_style.bg(Color::Green),
        (false, false) => base_style,
    };

    // Vertically centre the mark in the three-line cell
    let text = vec![Line::from(""), Line::from(Span::styled(symbol, style))];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("────────────┼────────────┼────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"), Line::from("│"), Line::from("│")])
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, ModeChoice};
    use crossterm::event::KeyCode;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_history_labels() {
        let start = HistoryEntry {
            move_index: 0,
            is_start: true,
            played: None,
        };
        let first = HistoryEntry {
            move_index: 1,
            is_start: false,
            played: Some(Position::Center),
        };
        assert_eq!(history_label(&start), "Go to game start");
        assert_eq!(history_label(&first), "Go to move #1 (Center)");
    }

    #[test]
    fn test_draw_renders_status_and_history() {
        let config = GameConfig::default().with_overrides(None, Some(ModeChoice::Multi));
        let mut app = App::new(&config);
        app.handle_key(KeyCode::Char('5'));

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Next player: O"));
        assert!(text.contains("Go to game start"));
        assert!(text.contains("Go to move #1"));
    }
}
