use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use super::board_widget;
use super::menu_view::{render_controls, render_message};
use crate::ai::Tier;
use crate::game::{BoardGame, Coord, GameKind, Player, Score};
use crate::session::Session;

/// Rounds listed under the rock-paper-scissors selector.
const RPS_HISTORY_SHOWN: usize = 8;

/// Everything a play scene needs from the app.
pub struct PlayView<'a> {
    pub session: &'a Session,
    pub kind: GameKind,
    pub tier: Tier,
    pub cursor: usize,
    /// Winning cells to highlight.
    pub line: &'a [Coord],
    pub message: &'a Option<String>,
}

pub fn render(frame: &mut Frame, view: &PlayView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    render_board(frame, view, chunks[1]);
    render_message(frame, view.message, chunks[2]);
    render_controls(frame, controls(view.kind), chunks[3]);
}

fn render_header(frame: &mut Frame, view: &PlayView, area: Rect) {
    let session = view.session;
    let (score, status) = match view.kind {
        GameKind::TicTacToe => {
            let game = session.tictactoe();
            (game.score(), turn_status(game.is_over(), game.current_player()))
        }
        GameKind::ConnectFour => {
            let game = session.connect_four();
            (game.score(), turn_status(game.is_over(), game.current_player()))
        }
        GameKind::RockPaperScissors => {
            let rounds = session.rps().history().len();
            (session.rps().score(), format!("Round {}", rounds + 1))
        }
    };

    let header = Paragraph::new(format!(
        "{}  |  {}  |  {}",
        status,
        score_text(score),
        view.kind.tier_label(view.tier)
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(view.kind.title()),
    );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, view: &PlayView, area: Rect) {
    let line = view.line;
    let lines: Vec<Line> = match view.kind {
        GameKind::TicTacToe => {
            board_widget::tictactoe_lines(view.session.tictactoe().board(), view.cursor, line)
        }
        GameKind::ConnectFour => {
            board_widget::connect_four_lines(view.session.connect_four().board(), view.cursor, line)
        }
        GameKind::RockPaperScissors => {
            board_widget::rps_lines(view.cursor, view.session.rps().history(), RPS_HISTORY_SHOWN)
        }
    };

    let board = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(board, area);
}

fn turn_status(over: bool, current: Player) -> String {
    if over {
        "Round over".to_string()
    } else {
        format!("Turn: {}", current.name())
    }
}

fn score_text(score: Score) -> String {
    format!("You {} - {} AI", score.player, score.ai)
}

fn controls(kind: GameKind) -> &'static str {
    match kind {
        GameKind::TicTacToe => "Arrows: Move  |  Enter/1-9: Place  |  R: Restart  |  Esc: Back",
        GameKind::ConnectFour => "←/→: Move  |  Enter/1-7: Drop  |  R: Restart  |  Esc: Back",
        GameKind::RockPaperScissors => "←/→: Choose  |  Enter/1-3: Play  |  R: Restart  |  Esc: Back",
    }
}
