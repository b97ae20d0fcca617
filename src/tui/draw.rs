use super::state::{ServiceStatus, UiState};
use crate::render::render_transcript;
use crate::runtime::SessionSnapshot;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub const TITLE: &str = "Universal API Demo";
pub const SUBTITLE: &str = "Ask for weather, crypto prices, jokes, facts, and more!";

pub fn draw(frame: &mut Frame<'_>, state: &UiState, snapshot: &SessionSnapshot) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, state, outer[0]);
    draw_transcript(frame, state, snapshot, outer[1]);
    draw_input(frame, state, snapshot.busy, outer[2]);

    let footer = Line::styled(
        format!(
            "Enter send | Tab {} details | Up/Down/PgUp/PgDn scroll | End latest | Esc quit",
            if state.expand_details { "hide" } else { "show" }
        ),
        Style::default().fg(Color::DarkGray),
    );
    frame.render_widget(Paragraph::new(footer), outer[3]);
}

fn draw_header(frame: &mut Frame<'_>, state: &UiState, area: Rect) {
    let (status, color) = match &state.service {
        ServiceStatus::Checking => ("checking...".to_string(), Color::DarkGray),
        ServiceStatus::Online(_) => ("connected".to_string(), Color::Green),
        ServiceStatus::Unreachable(reason) => (format!("unreachable: {reason}"), Color::Red),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(state.endpoint.clone(), Style::default().fg(Color::DarkGray)),
            Span::raw(" "),
            Span::styled(status, Style::default().fg(color)),
        ]),
        Line::styled(SUBTITLE, Style::default().fg(Color::Gray)),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_transcript(frame: &mut Frame<'_>, state: &UiState, snapshot: &SessionSnapshot, area: Rect) {
    let block = Block::default().title("Conversation").borders(Borders::ALL);
    let inner = block.inner(area);

    let lines = if snapshot.transcript.is_empty() {
        vec![Line::styled(
            "Type a request below, e.g. \"weather in Paris\"",
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        render_transcript(&snapshot.transcript, state.render_options())
    };

    let height = wrapped_height(&lines, inner.width);
    let max_top = height.saturating_sub(inner.height);
    let top = max_top.saturating_sub(state.scroll_back);

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((top, 0)),
        area,
    );
}

/// Rows the lines occupy once wrapped to `width`
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn draw_input(frame: &mut Frame<'_>, state: &UiState, busy: bool, area: Rect) {
    let (title, style) = if busy {
        ("Waiting for reply...", Style::default().fg(Color::DarkGray))
    } else {
        ("Message", Style::default())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style);
    let inner = block.inner(area);
    let input = Paragraph::new(state.input.as_str())
        .style(style)
        .block(block);
    frame.render_widget(input, area);

    if !busy {
        let typed = state.input.chars().count();
        let typed = u16::try_from(typed).unwrap_or(u16::MAX);
        let last_column = inner.right().saturating_sub(1);
        let x = inner.x.saturating_add(typed).min(last_column);
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}
