//! HTTP implementation of the adapter boundary

use super::types::{error_message_from_body, AdapterReply, ChatRequest};
use super::{AdapterError, AdapterService};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

/// Chat endpoint of a locally running adapter service
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/chat";

/// Adapter service reached over HTTP.
///
/// No request timeout is configured: a call runs until the service answers
/// or the connection fails.
pub struct HttpAdapter {
    client: Client,
    endpoint: Url,
    endpoint_label: String,
}

impl HttpAdapter {
    pub fn new(endpoint: Url) -> Result<Self, AdapterError> {
        let client = Client::builder()
            .user_agent(concat!("adapter-chat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AdapterError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint_label: endpoint.to_string(),
            endpoint,
        })
    }

    fn classify_failure(status: reqwest::StatusCode, body: &str) -> AdapterError {
        match error_message_from_body(body) {
            Some(message) => AdapterError::remote(status.as_u16(), message),
            None => AdapterError::status(status.as_u16()),
        }
    }
}

fn transport_error(e: &reqwest::Error) -> AdapterError {
    if e.is_connect() {
        AdapterError::transport(format!("Connection failed: {e}"))
    } else {
        AdapterError::transport(format!("Request failed: {e}"))
    }
}

#[async_trait]
impl AdapterService for HttpAdapter {
    async fn chat(&self, query: &str) -> Result<AdapterReply, AdapterError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ChatRequest { message: query })
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AdapterError::transport(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_failure(status, &body));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| AdapterError::malformed(format!("Failed to parse response: {e}")))?;

        Ok(AdapterReply::from_body(value))
    }

    async fn probe(&self) -> Result<String, AdapterError> {
        let root = self
            .endpoint
            .join("/")
            .map_err(|e| AdapterError::transport(format!("Invalid endpoint: {e}")))?;

        let response = self
            .client
            .get(root)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AdapterError::transport(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_failure(status, &body));
        }

        let greeting = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(str::to_string))
            .unwrap_or_else(|| status.to_string());
        Ok(greeting)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint_label
    }
}
