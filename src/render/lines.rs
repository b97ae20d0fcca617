//! Terminal lines for each presentation mode

use super::classify::{
    ArtifactBody, ArtifactSection, AttemptView, FailureView, FileView, SuccessView, TurnView,
};
use super::RenderOptions;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const INDENT: &str = "  ";
const NESTED: &str = "    ";
const CODE_MARGIN: &str = "      ";
const EMPTY_NOTICE: &str = "(no details)";

fn success_style() -> Style {
    Style::default().fg(Color::Green)
}

fn failure_style() -> Style {
    Style::default().fg(Color::Red)
}

fn notice_style() -> Style {
    Style::default().fg(Color::Yellow)
}

fn code_style() -> Style {
    Style::default().fg(Color::Gray)
}

fn muted_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn view_lines(view: &TurnView<'_>, options: RenderOptions) -> Vec<Line<'static>> {
    match view {
        TurnView::Waiting => vec![Line::styled("● ● ●", muted_style())],
        TurnView::Plain(text) => text_block(text, Style::default()),
        TurnView::Error(reason) => text_block(&format!("Error: {reason}"), failure_style()),
        TurnView::Success(success) => success_lines(success, options),
        TurnView::Failure(failure) => failure_lines(failure, options),
        TurnView::Notice(Some(text)) => text_block(text, notice_style()),
        TurnView::Notice(None) => vec![Line::styled(EMPTY_NOTICE, notice_style())],
    }
}

/// Preformatted text, one line per source line
fn text_block(text: &str, style: Style) -> Vec<Line<'static>> {
    if text.is_empty() {
        return vec![Line::default()];
    }
    text.lines()
        .map(|line| Line::styled(line.to_string(), style))
        .collect()
}

fn code_lines(text: &str) -> Vec<Line<'static>> {
    let style = code_style();
    text.lines()
        .map(|line| Line::styled(format!("{CODE_MARGIN}{line}"), style))
        .collect()
}

fn title(text: String, style: Style) -> Line<'static> {
    Line::styled(text, style.add_modifier(Modifier::BOLD))
}

fn summary(label: &str, expanded: bool) -> Line<'static> {
    let marker = if expanded { "▾" } else { "▸" };
    let style = Style::default().add_modifier(Modifier::UNDERLINED);
    Line::from(vec![
        Span::raw(INDENT),
        Span::styled(format!("{marker} {label}"), style),
    ])
}

fn file_lines(heading: &str, file: &FileView<'_>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::raw(NESTED),
        Span::styled(format!("📄 {heading}"), bold()),
    ])];
    lines.extend(code_lines(&file.content));
    lines
}

fn success_lines(view: &SuccessView<'_>, options: RenderOptions) -> Vec<Line<'static>> {
    let style = success_style();
    let heading = format!("✅ Success: {} Deployed", view.server_name);
    let mut lines = vec![title(heading, style)];
    lines.extend(text_block(view.message, style));
    lines.push(Line::from(vec![
        Span::styled("Connect at: ", style),
        Span::styled(
            view.connection_url.unwrap_or_default().to_string(),
            style.add_modifier(Modifier::UNDERLINED),
        ),
    ]));

    let ArtifactSection { file_count, body } = &view.artifacts;
    lines.push(summary(
        &format!("View Deployment Files ({file_count} files)"),
        options.expand_details,
    ));
    if options.expand_details {
        match body {
            ArtifactBody::Files(files) => {
                for file in files {
                    lines.extend(file_lines(file.name, file));
                }
            }
            ArtifactBody::Dockerfile(file) => lines.extend(file_lines(file.name, file)),
            ArtifactBody::Empty => lines.push(Line::styled(
                format!("{NESTED}No deployment files available"),
                muted_style(),
            )),
        }
    }
    lines
}

fn failure_lines(view: &FailureView<'_>, options: RenderOptions) -> Vec<Line<'static>> {
    let style = failure_style();
    let heading = format!("❌ Failed: {} Deployment", view.server_name);
    let mut lines = vec![title(heading, style)];
    lines.extend(text_block(view.message, style));
    if let Some(total) = view.total_attempts {
        lines.push(Line::styled(format!("Total attempts: {total}"), style));
    }

    lines.push(summary(
        "View Error Logs & Final Deployment Files",
        options.expand_details,
    ));
    if options.expand_details {
        lines.push(Line::styled(
            format!("{NESTED}Latest Error:"),
            style.add_modifier(Modifier::BOLD),
        ));
        lines.extend(code_lines(view.error_details));
        match &view.final_artifacts {
            ArtifactBody::Files(files) => {
                let heading = format!("{NESTED}Final Deployment Files:");
                lines.push(Line::styled(heading, bold()));
                for file in files {
                    lines.extend(file_lines(file.name, file));
                }
            }
            ArtifactBody::Dockerfile(file) => lines.extend(file_lines("Final Dockerfile", file)),
            ArtifactBody::Empty => {}
        }
    }

    if let Some(attempts) = &view.attempts {
        lines.push(summary(
            &format!("View All Attempts ({})", attempts.len()),
            options.expand_details,
        ));
        if options.expand_details {
            for attempt in attempts {
                lines.extend(attempt_lines(attempt));
            }
        }
    }
    lines
}

fn attempt_lines(attempt: &AttemptView<'_>) -> Vec<Line<'static>> {
    let number = attempt.attempt.map(|n| n.to_string()).unwrap_or_default();
    let heading = format!("{NESTED}Attempt {number} ({}):", attempt.status);
    let mut lines = vec![Line::styled(heading, bold())];
    lines.extend(code_lines(&attempt.error));
    lines
}
