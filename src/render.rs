//! Transcript rendering
//!
//! Stateless: every display pass classifies each stored answer again and
//! produces fresh lines. Nothing is cached between passes.

mod classify;
mod lines;

use crate::transcript::{Transcript, Turn};
use chrono::{Duration, Local};
use classify::classify;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Open the collapsible sections (artifacts, error logs, attempts)
    pub expand_details: bool,
    /// Local submission time after each query, plus how long it took once settled
    pub show_timestamps: bool,
}

/// Query line followed by the answer
pub fn render_turn(turn: &Turn, options: RenderOptions) -> Vec<Line<'static>> {
    let mut query = vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::styled(
            turn.query().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if options.show_timestamps {
        let dim = Style::default().fg(Color::DarkGray);
        let submitted = turn.submitted_at().with_timezone(&Local);
        let at = submitted.format("%H:%M:%S");
        query.push(Span::styled(format!("  {at}"), dim));
        if let Some(settled_at) = turn.settled_at() {
            let took = format_elapsed(settled_at - turn.submitted_at());
            query.push(Span::styled(format!(" ({took})"), dim));
        }
    }
    let mut lines = vec![Line::from(query)];
    lines.extend(render_answer(turn, options));
    lines
}

pub fn render_answer(turn: &Turn, options: RenderOptions) -> Vec<Line<'static>> {
    lines::view_lines(&classify(turn.answer()), options)
}

/// All turns, oldest first, separated by blank lines
pub fn render_transcript(transcript: &Transcript, options: RenderOptions) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, turn) in transcript.turns().iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(render_turn(turn, options));
    }
    lines
}

/// Drop styling, one text line per rendered line
pub fn to_plain(lines: &[Line<'_>]) -> String {
    lines.iter().map(plain_line).collect::<Vec<_>>().join("\n")
}

fn plain_line(line: &Line<'_>) -> String {
    line.spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect()
}

/// Tenths of a second under a minute, then minutes and seconds
fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.num_milliseconds().max(0);
    if millis < 60_000 {
        format!("{}.{}s", millis / 1000, millis % 1000 / 100)
    } else {
        format!("{}m{:02}s", millis / 60_000, millis / 1000 % 60)
    }
}
