//! Wire types for the adapter service

use crate::provision::ProvisionResult;
use serde::Serialize;
use serde_json::Value;

/// Text used when a successful body carries nothing displayable
pub const NO_RESPONSE: &str = "No response from server.";

/// Body of the outbound chat call
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Successful reply, classified by how the body resolved
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterReply {
    Structured(ProvisionResult),
    Text(String),
}

impl AdapterReply {
    /// Interpret a 2xx JSON body.
    ///
    /// A `result` string is plain text and a `result` object is a
    /// provisioning record. A body that itself carries `status` or `error`
    /// is the record. Anything else has nothing to show.
    pub fn from_body(body: Value) -> Self {
        let Value::Object(fields) = body else {
            return AdapterReply::Text(NO_RESPONSE.to_string());
        };

        match fields.get("result") {
            Some(Value::String(text)) if !text.is_empty() => {
                return AdapterReply::Text(text.clone());
            }
            Some(Value::Object(record)) => {
                return AdapterReply::Structured(ProvisionResult::from_map(record.clone()));
            }
            Some(Value::Null | Value::String(_)) | None => {}
            Some(other) => return AdapterReply::Text(other.to_string()),
        }

        if fields.contains_key("status") || fields.get("error").is_some_and(Value::is_string) {
            return AdapterReply::Structured(ProvisionResult::from_map(fields));
        }

        AdapterReply::Text(NO_RESPONSE.to_string())
    }
}

/// Error text from a non-2xx body: a non-blank `error`, else a non-blank
/// string `detail`
pub fn error_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "detail"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .find(|message| !message.trim().is_empty())
        .map(str::to_string)
}
