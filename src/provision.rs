//! Provisioning result returned by the adapter service
//!
//! The service builds this record; the client only reads it. The raw JSON
//! object is stored untouched so the transcript keeps exactly what arrived,
//! and [`ProvisionResult::outcome`] exposes a typed view scoped to the status.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Provisioning status tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStatus {
    Success,
    Failed,
    /// Anything unrecognized, including an absent `status`
    Other,
}

impl ProvisionStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("success") => ProvisionStatus::Success,
            Some("failed") => ProvisionStatus::Failed,
            _ => ProvisionStatus::Other,
        }
    }
}

/// Structured payload describing a provisioning attempt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProvisionResult {
    fields: Map<String, Value>,
}

impl ProvisionResult {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wrap a JSON value; non-objects yield `None`
    #[allow(dead_code)] // Used by tests
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    #[allow(dead_code)] // Used by tests
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn status(&self) -> ProvisionStatus {
        ProvisionStatus::parse(self.str_field("status"))
    }

    /// Classify into the view for this result's status.
    ///
    /// Never fails: missing or wrong-typed optional fields read as absent.
    pub fn outcome(&self) -> Outcome<'_> {
        match self.status() {
            ProvisionStatus::Success => Outcome::Success(SuccessReport {
                server_name: self.str_field("server_name"),
                message: self.str_field("message"),
                connection_url: self.str_field("connection_url"),
                deployment_files: self.deployment_files(),
                dockerfile: self.str_field("dockerfile"),
            }),
            ProvisionStatus::Failed => Outcome::Failed(FailureReport {
                server_name: self.str_field("server_name"),
                message: self.str_field("message"),
                error_details: self.str_field("error_details"),
                total_attempts: self.fields.get("total_attempts").and_then(Value::as_u64),
                deployment_files: self.deployment_files(),
                dockerfile: self.str_field("dockerfile"),
                error_history: self.error_history(),
            }),
            ProvisionStatus::Other => Outcome::Other(Notice {
                message: self.str_field("message"),
                error: self.str_field("error"),
            }),
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    fn deployment_files(&self) -> Option<Vec<Artifact<'_>>> {
        let files = self.fields.get("deployment_files")?.as_object()?;
        Some(
            files
                .iter()
                .map(|(name, content)| Artifact {
                    name,
                    content: content_text(content),
                })
                .collect(),
        )
    }

    fn error_history(&self) -> Option<Vec<AttemptRecord<'_>>> {
        let entries = self.fields.get("error_history")?.as_array()?;
        Some(entries.iter().map(AttemptRecord::from_value).collect())
    }
}

/// File contents are normally strings; anything else is shown as JSON
fn content_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

/// Typed view of a [`ProvisionResult`], one variant per status
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<'a> {
    Success(SuccessReport<'a>),
    Failed(FailureReport<'a>),
    Other(Notice<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuccessReport<'a> {
    pub server_name: Option<&'a str>,
    pub message: Option<&'a str>,
    pub connection_url: Option<&'a str>,
    /// Insertion ordered, as sent by the service
    pub deployment_files: Option<Vec<Artifact<'a>>>,
    pub dockerfile: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailureReport<'a> {
    pub server_name: Option<&'a str>,
    pub message: Option<&'a str>,
    /// Latest error text
    pub error_details: Option<&'a str>,
    pub total_attempts: Option<u64>,
    /// Files from the final attempt
    pub deployment_files: Option<Vec<Artifact<'a>>>,
    pub dockerfile: Option<&'a str>,
    /// One record per retry, oldest first
    pub error_history: Option<Vec<AttemptRecord<'a>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice<'a> {
    pub message: Option<&'a str>,
    pub error: Option<&'a str>,
}

/// A generated file
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact<'a> {
    pub name: &'a str,
    pub content: Cow<'a, str>,
}

/// One entry of a failed result's attempt history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttemptRecord<'a> {
    pub attempt: Option<u64>,
    pub status: &'a str,
    pub error: &'a str,
}

impl<'a> AttemptRecord<'a> {
    fn from_value(value: &'a Value) -> Self {
        Self {
            attempt: value.get("attempt").and_then(Value::as_u64),
            status: value.get("status").and_then(Value::as_str).unwrap_or(""),
            error: value.get("error").and_then(Value::as_str).unwrap_or(""),
        }
    }
}
