//! Position analysis for the `solve` command.

use derive_more::Display;
use rewind_tictactoe::{
    Board, EngineError, Outcome, Player, Position, analyze, best_move, evaluate,
};
use serde::Serialize;
use tracing::{debug, instrument};

/// Why a board could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SolveError {
    /// Mark counts that no legal game reaches.
    #[display("Invalid mark counts: X={}, O={} (X must equal O or lead by one)", x_count, o_count)]
    InvalidMarkCounts {
        /// Number of X marks.
        x_count: usize,
        /// Number of O marks.
        o_count: usize,
    },

    /// Search failed.
    #[display("{}", _0)]
    Engine(EngineError),
}

impl std::error::Error for SolveError {}

impl From<EngineError> for SolveError {
    fn from(err: EngineError) -> Self {
        SolveError::Engine(err)
    }
}

/// Score of one candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    /// Board index (0-8).
    pub index: usize,
    /// Named position.
    pub position: Position,
    /// Minimax value for the computer side.
    pub score: i32,
}

/// Full analysis of a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    /// Board in compact notation.
    pub board: String,
    /// Outcome of the board as given.
    pub outcome: Outcome,
    /// Side to move, derived from the mark counts.
    pub to_move: Player,
    /// Side whose point of view the scores use.
    pub ai_side: Player,
    /// Every legal move, ascending by index. Empty for finished boards.
    pub moves: Vec<MoveReport>,
    /// The move the computer would play.
    pub best: Option<Position>,
}

/// Side to move given the marks on the board.
pub fn side_to_move(board: &Board) -> Result<Player, SolveError> {
    let x_count = board.mark_count(Player::X);
    let o_count = board.mark_count(Player::O);
    match x_count.checked_sub(o_count) {
        Some(0) => Ok(Player::X),
        Some(1) => Ok(Player::O),
        _ => Err(SolveError::InvalidMarkCounts { x_count, o_count }),
    }
}

/// Analyzes `board` from the point of view of `ai_side`.
///
/// When `ai_side` is `None` the side to move is analyzed.
#[instrument(skip(board), fields(board = %board.to_notation()))]
pub fn solve(board: &Board, ai_side: Option<Player>) -> Result<SolveReport, SolveError> {
    let to_move = side_to_move(board)?;
    let ai_side = ai_side.unwrap_or(to_move);
    let outcome = evaluate(board);

    let (moves, best) = if outcome.is_terminal() {
        (Vec::new(), None)
    } else {
        let moves = analyze(board, to_move, ai_side)?
            .into_iter()
            .filter_map(|m| {
                Position::from_index(m.index).map(|position| MoveReport {
                    index: m.index,
                    position,
                    score: m.score,
                })
            })
            .collect();
        let best = Position::from_index(best_move(board, to_move, ai_side)?);
        (moves, best)
    };

    debug!(?outcome, ?best, "Solved position");
    Ok(SolveReport {
        board: board.to_notation(),
        outcome,
        to_move,
        ai_side,
        moves,
        best,
    })
}

fn score_label(score: i32) -> &'static str {
    match score.signum() {
        1 => "win",
        -1 => "loss",
        _ => "draw",
    }
}

/// Plain-text rendering of a report.
pub fn render(report: &SolveReport, board: &Board) -> String {
    let mut out = format!("{}\n\n", board);

    if report.outcome.is_terminal() {
        out.push_str(&format!("{}\n", report.outcome));
        return out;
    }

    out.push_str(&format!(
        "Next player: {} (scores from {}'s view)\n",
        report.to_move, report.ai_side
    ));
    for m in &report.moves {
        out.push_str(&format!(
            "  {} {:<14} {:>2} ({})\n",
            m.index,
            m.position.label(),
            m.score,
            score_label(m.score)
        ));
    }
    if let Some(best) = report.best {
        out.push_str(&format!("Best move: {} ({})\n", best.to_index(), best));
    }
    out
}
