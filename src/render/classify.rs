//! Answer classification
//!
//! Maps a stored answer to a presentation view. Pure: the same answer always
//! yields the same view, and no shape of result makes it fail.

use crate::provision::{Artifact, AttemptRecord, FailureReport, Outcome, SuccessReport};
use crate::transcript::Answer;
use std::borrow::Cow;

/// Preview length of each final deployment file of a failed result
pub const FAILED_FILE_PREVIEW_CHARS: usize = 500;
/// Preview length of each attempt's error text
pub const ATTEMPT_ERROR_PREVIEW_CHARS: usize = 300;
/// Appended when text was cut
pub const ELLIPSIS: &str = "...";

/// Presentation mode of one answer
#[derive(Debug, Clone, PartialEq)]
pub enum TurnView<'a> {
    /// Call still in flight
    Waiting,
    Plain(&'a str),
    Error(&'a str),
    Success(SuccessView<'a>),
    Failure(FailureView<'a>),
    /// Unknown or missing status: `message`, else `error`, else nothing
    Notice(Option<&'a str>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuccessView<'a> {
    pub server_name: &'a str,
    pub message: &'a str,
    pub connection_url: Option<&'a str>,
    /// Collapsed by default
    pub artifacts: ArtifactSection<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSection<'a> {
    /// Header count: the file map's size, or a fixed 1 without a map
    pub file_count: usize,
    pub body: ArtifactBody<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactBody<'a> {
    Files(Vec<FileView<'a>>),
    Dockerfile(FileView<'a>),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileView<'a> {
    pub name: &'a str,
    pub content: Cow<'a, str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailureView<'a> {
    pub server_name: &'a str,
    pub message: &'a str,
    pub total_attempts: Option<u64>,
    /// Shown verbatim inside the collapsed error section
    pub error_details: &'a str,
    /// Files truncated to a preview; a lone dockerfile is shown whole
    pub final_artifacts: ArtifactBody<'a>,
    /// Present only when more than one attempt was recorded
    pub attempts: Option<Vec<AttemptView<'a>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttemptView<'a> {
    pub attempt: Option<u64>,
    pub status: &'a str,
    pub error: Cow<'a, str>,
}

/// Classify an answer for display
pub fn classify(answer: &Answer) -> TurnView<'_> {
    match answer {
        Answer::Pending => TurnView::Waiting,
        Answer::Text(text) => TurnView::Plain(text),
        Answer::ErrorText(reason) => TurnView::Error(reason),
        Answer::Structured(result) => match result.outcome() {
            Outcome::Success(report) => TurnView::Success(success_view(report)),
            Outcome::Failed(report) => TurnView::Failure(failure_view(report)),
            Outcome::Other(notice) => {
                let message = non_empty(notice.message);
                TurnView::Notice(message.or_else(|| non_empty(notice.error)))
            }
        },
    }
}

fn success_view(report: SuccessReport<'_>) -> SuccessView<'_> {
    let (file_count, body) = match (report.deployment_files, non_empty(report.dockerfile)) {
        (Some(files), _) => (
            files.len(),
            ArtifactBody::Files(files.into_iter().map(file_view).collect()),
        ),
        (None, Some(dockerfile)) => (1, ArtifactBody::Dockerfile(dockerfile_view(dockerfile))),
        (None, None) => (1, ArtifactBody::Empty),
    };

    SuccessView {
        server_name: report.server_name.unwrap_or_default(),
        message: report.message.unwrap_or_default(),
        connection_url: report.connection_url,
        artifacts: ArtifactSection { file_count, body },
    }
}

fn failure_view(report: FailureReport<'_>) -> FailureView<'_> {
    let final_artifacts = match (report.deployment_files, non_empty(report.dockerfile)) {
        (Some(files), _) => ArtifactBody::Files(
            files
                .into_iter()
                .map(|file| FileView {
                    name: file.name,
                    content: preview(file.content, FAILED_FILE_PREVIEW_CHARS),
                })
                .collect(),
        ),
        (None, Some(dockerfile)) => ArtifactBody::Dockerfile(dockerfile_view(dockerfile)),
        (None, None) => ArtifactBody::Empty,
    };

    let attempts = report
        .error_history
        .filter(|history| history.len() > 1)
        .map(|history| history.into_iter().map(attempt_view).collect());

    FailureView {
        server_name: report.server_name.unwrap_or_default(),
        message: report.message.unwrap_or_default(),
        total_attempts: report.total_attempts,
        error_details: report.error_details.unwrap_or_default(),
        final_artifacts,
        attempts,
    }
}

/// An empty string counts as absent
fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

fn file_view(artifact: Artifact<'_>) -> FileView<'_> {
    FileView {
        name: artifact.name,
        content: artifact.content,
    }
}

fn dockerfile_view(content: &str) -> FileView<'_> {
    FileView {
        name: "Dockerfile",
        content: Cow::Borrowed(content),
    }
}

fn attempt_view(record: AttemptRecord<'_>) -> AttemptView<'_> {
    AttemptView {
        attempt: record.attempt,
        status: record.status,
        error: truncate_with_ellipsis(record.error, ATTEMPT_ERROR_PREVIEW_CHARS),
    }
}

/// First `limit` characters plus [`ELLIPSIS`], or the text untouched when it
/// already fits
pub fn truncate_with_ellipsis(text: &str, limit: usize) -> Cow<'_, str> {
    if text.chars().nth(limit).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().take(limit).chain(ELLIPSIS.chars()).collect())
}

fn preview(text: Cow<'_, str>, limit: usize) -> Cow<'_, str> {
    match text {
        Cow::Borrowed(s) => truncate_with_ellipsis(s, limit),
        Cow::Owned(s) => Cow::Owned(truncate_with_ellipsis(&s, limit).into_owned()),
    }
}
