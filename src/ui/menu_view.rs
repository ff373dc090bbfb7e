use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// A titled vertical menu with one highlighted entry.
pub fn render(
    frame: &mut Frame,
    title: &str,
    items: &[&str],
    selected: usize,
    message: &Option<String>,
    controls: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                    // Title
            Constraint::Min(items.len() as u16 + 2), // Entries
            Constraint::Length(3),                    // Message
            Constraint::Length(3),                    // Controls
        ])
        .split(frame.area());

    render_title(frame, title, chunks[0]);
    render_items(frame, items, selected, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, controls, chunks[3]);
}

fn render_title(frame: &mut Frame, title: &str, area: Rect) {
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_items(frame: &mut Frame, items: &[&str], selected: usize, area: Rect) {
    let lines: Vec<Line> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let label = format!("{}. {}", i + 1, item);
            if i == selected {
                Line::from(vec![
                    Span::styled("▶ ", Style::default().fg(Color::Cyan)),
                    Span::styled(
                        label,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    ),
                ])
            } else {
                Line::from(vec![Span::raw("  "), Span::raw(label)])
            }
        })
        .collect();

    let menu = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(menu, area);
}

pub(super) fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

pub(super) fn render_controls(frame: &mut Frame, controls: &str, area: Rect) {
    let widget = Paragraph::new(Line::from(controls))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(widget, area);
}
