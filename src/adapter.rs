//! Adapter service boundary
//!
//! The universal adapter is reached through one opaque request/response
//! call per submission. Everything behind it (provisioning, container
//! builds, server-side retries) is out of our hands.

mod error;
mod http;
mod types;

pub use error::AdapterError;
pub use http::{HttpAdapter, DEFAULT_ENDPOINT};
pub use types::AdapterReply;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for reaching the adapter service
#[async_trait]
pub trait AdapterService: Send + Sync {
    /// Send one query. Exactly one call per submission, never retried.
    async fn chat(&self, query: &str) -> Result<AdapterReply, AdapterError>;

    /// Check the service is reachable, returning its greeting
    async fn probe(&self) -> Result<String, AdapterError>;

    /// Where requests go, for display and logs
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: AdapterService + ?Sized> AdapterService for Arc<T> {
    async fn chat(&self, query: &str) -> Result<AdapterReply, AdapterError> {
        (**self).chat(query).await
    }

    async fn probe(&self) -> Result<String, AdapterError> {
        (**self).probe().await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Logging wrapper for adapter services
pub struct LoggingAdapter<A> {
    inner: A,
}

impl<A: AdapterService> LoggingAdapter<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<A: AdapterService> AdapterService for LoggingAdapter<A> {
    async fn chat(&self, query: &str) -> Result<AdapterReply, AdapterError> {
        let start = std::time::Instant::now();
        let result = self.inner.chat(query).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    structured = matches!(reply, AdapterReply::Structured(_)),
                    "Adapter call completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    status = ?e.status,
                    error = %e.message,
                    "Adapter call failed"
                );
            }
        }

        result
    }

    async fn probe(&self) -> Result<String, AdapterError> {
        let result = self.inner.probe().await;
        match &result {
            Ok(greeting) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    %greeting,
                    "Adapter reachable"
                );
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = %self.inner.endpoint(),
                    error = %e,
                    "Adapter unreachable"
                );
            }
        }
        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
