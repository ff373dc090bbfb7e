use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::game::tictactoe;
use crate::game::{Board, COLS, Cell, Choice, Coord, ROWS, Round};

const HIGHLIGHT: Color = Color::LightGreen;

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// 3x3 grid with the cursor cell underlined and the winning line lit up.
pub fn tictactoe_lines(board: &tictactoe::Board, cursor: usize, line: &[Coord]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for row in 0..3 {
        let mut spans = vec![Span::raw(" ")];
        for col in 0..3 {
            let index = row * 3 + col;
            let (symbol, color) = match board.get(index) {
                Cell::Empty => (format!(" {} ", index + 1), Color::DarkGray),
                Cell::One => (" X ".to_string(), Color::Red),
                Cell::Two => (" O ".to_string(), Color::Blue),
            };
            let mut style = Style::default().fg(color);
            if line.contains(&tictactoe::coord(index)) {
                style = style.bg(HIGHLIGHT).add_modifier(Modifier::BOLD);
            }
            if index == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(symbol, style));
            if col < 2 {
                spans.push(Span::raw("│"));
            }
        }
        lines.push(Line::from(spans));
        if row < 2 {
            lines.push(Line::from(" ───┼───┼───"));
        }
    }
    lines
}

/// Connect 4 board with column selector, drop indicator, and winning line.
pub fn connect_four_lines(board: &Board, selected_column: usize, line: &[Coord]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        let label = format!(" {} ", col + 1);
        if col == selected_column {
            col_line.push(Span::styled(label, selected_style()));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔═════════════════════╗"));
    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..COLS {
            let (symbol, color) = match board.get(row, col) {
                Cell::Empty => (" . ", Color::DarkGray),
                Cell::One => (" ● ", Color::Red),
                Cell::Two => (" ● ", Color::Yellow),
            };
            let mut style = Style::default().fg(color);
            if line.contains(&Coord::new(row, col)) {
                style = style.bg(HIGHLIGHT);
            }
            row_spans.push(Span::styled(symbol, style));
        }
        row_spans.push(Span::raw("║"));
        lines.push(Line::from(row_spans));
    }
    lines.push(Line::from("  ╚═════════════════════╝"));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    lines
}

/// Choice selector plus the most recent rounds, newest first.
pub fn rps_lines(cursor: usize, history: &[Round], shown: usize) -> Vec<Line<'static>> {
    let mut choices = Vec::new();
    for (i, choice) in Choice::ALL.into_iter().enumerate() {
        let label = format!(" {}. {} ", i + 1, choice.label());
        if i == cursor {
            choices.push(Span::styled(label, selected_style()));
        } else {
            choices.push(Span::raw(label));
        }
        choices.push(Span::raw("  "));
    }

    let mut lines = vec![Line::from(choices), Line::from("")];
    if history.is_empty() {
        lines.push(Line::from(Span::styled(
            "Make your choice",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for round in history.iter().rev().take(shown) {
        let color = match round.outcome() {
            1 => Color::Green,
            0 => Color::Gray,
            _ => Color::Red,
        };
        lines.push(Line::from(Span::styled(
            round.summary(),
            Style::default().fg(color),
        )));
    }
    lines
}
