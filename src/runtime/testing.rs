//! Mock implementations for testing
//!
//! These mocks enable runtime tests without a live adapter service.

use crate::adapter::{AdapterError, AdapterReply, AdapterService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ============================================================================
// Mock Adapter
// ============================================================================

/// Mock adapter that returns queued replies
pub struct MockAdapter {
    replies: Mutex<VecDeque<Result<AdapterReply, AdapterError>>>,
    /// When set, each call waits for one `notify_one` before answering
    gate: Option<Arc<Notify>>,
    /// Record of all queries sent
    pub queries: Mutex<Vec<String>>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            gate: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Hold every call until the returned gate is released
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn queue_reply(&self, reply: AdapterReply) {
        self.replies.lock().unwrap().push_back(Ok(reply));
    }

    pub fn queue_error(&self, error: AdapterError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdapterService for MockAdapter {
    async fn chat(&self, query: &str) -> Result<AdapterReply, AdapterError> {
        self.queries.lock().unwrap().push(query.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AdapterError::transport("No mock reply queued")))
    }

    async fn probe(&self) -> Result<String, AdapterError> {
        Ok("mock adapter".to_string())
    }

    fn endpoint(&self) -> &str {
        "mock://adapter"
    }
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::ProvisionResult;
    use crate::runtime::{spawn, SessionHandle, SessionSnapshot};
    use crate::transcript::{Answer, Turn};
    use serde_json::json;
    use std::time::Duration;

    /// Wait for a snapshot matching `predicate`, with timeout
    async fn wait_for_snapshot(
        handle: &SessionHandle,
        predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> SessionSnapshot {
        let mut rx = handle.subscribe();
        let snapshot = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(predicate))
            .await
            .expect("timed out waiting for snapshot")
            .expect("runtime stopped");
        snapshot.clone()
    }

    #[tokio::test]
    async fn test_mock_adapter() {
        let mock = MockAdapter::new();
        mock.queue_reply(AdapterReply::Text("Hello".to_string()));

        let reply = mock.chat("hi").await.unwrap();
        assert_eq!(reply, AdapterReply::Text("Hello".to_string()));

        // Second call should fail (no more replies)
        assert!(mock.chat("again").await.is_err());
        assert_eq!(mock.recorded_queries(), vec!["hi", "again"]);
    }

    #[tokio::test]
    async fn test_structured_round_trip() {
        let record = ProvisionResult::from_value(json!({
            "status": "success",
            "server_name": "srv",
            "message": "ok",
            "connection_url": "http://x"
        }))
        .unwrap();
        let mock = MockAdapter::new();
        mock.queue_reply(AdapterReply::Structured(record.clone()));
        let (handle, _task) = spawn(mock);

        let turn_id = handle.submit("hello").await.unwrap();
        let snapshot = handle.wait_settled(turn_id).await.unwrap();

        assert!(!snapshot.busy);
        assert_eq!(snapshot.transcript.len(), 1);
        let turn = &snapshot.transcript.turns()[0];
        assert_eq!(turn.query(), "hello");
        assert_eq!(turn.answer(), &Answer::Structured(record));
    }

    #[tokio::test]
    async fn test_text_reply() {
        let mock = MockAdapter::new();
        mock.queue_reply(AdapterReply::Text("It is sunny".to_string()));
        let (handle, _task) = spawn(mock);

        let turn_id = handle.submit("weather").await.unwrap();
        let snapshot = handle.wait_settled(turn_id).await.unwrap();
        assert_eq!(
            snapshot.transcript.last().unwrap().answer(),
            &Answer::Text("It is sunny".to_string())
        );
    }

    #[tokio::test]
    async fn test_failure_settles_with_reason() {
        let mock = MockAdapter::new();
        mock.queue_error(AdapterError::remote(500, "Docker is not running"));
        let (handle, _task) = spawn(mock);

        let turn_id = handle.submit("deploy git").await.unwrap();
        let snapshot = handle.wait_settled(turn_id).await.unwrap();
        assert_eq!(
            snapshot.transcript.last().unwrap().answer(),
            &Answer::ErrorText("Docker is not running".to_string())
        );
        assert!(!handle.is_busy());
    }

    #[tokio::test]
    async fn test_submit_while_busy_is_ignored() {
        let (mock, gate) = MockAdapter::new().gated();
        mock.queue_reply(AdapterReply::Text("first".to_string()));
        mock.queue_reply(AdapterReply::Text("never".to_string()));
        let mock = Arc::new(mock);
        let (handle, _task) = spawn(mock.clone());

        let first = handle.submit("one").await.unwrap();
        let pending = wait_for_snapshot(&handle, |s| s.busy).await;
        assert_eq!(pending.transcript.len(), 1);
        assert!(handle.is_busy());

        handle.submit("two").await.unwrap();
        gate.notify_one();
        let snapshot = handle.wait_settled(first).await.unwrap();

        assert_eq!(snapshot.transcript.len(), 1);
        assert_eq!(snapshot.transcript.turns()[0].query(), "one");
        assert_eq!(
            snapshot.transcript.turns()[0].answer(),
            &Answer::Text("first".to_string())
        );
        assert_eq!(mock.recorded_queries(), vec!["one"]);
    }

    #[tokio::test]
    async fn test_sequential_submissions_keep_order() {
        let mock = MockAdapter::new();
        for reply in ["a", "b", "c"] {
            mock.queue_reply(AdapterReply::Text(reply.to_string()));
        }
        let (handle, _task) = spawn(mock);

        for query in ["first", "second", "third"] {
            let turn_id = handle.submit(query).await.unwrap();
            handle.wait_settled(turn_id).await.unwrap();
        }

        let snapshot = handle.snapshot();
        let queries: Vec<_> = snapshot.transcript.turns().iter().map(Turn::query).collect();
        let answers: Vec<_> = snapshot
            .transcript
            .turns()
            .iter()
            .map(|t| t.answer().clone())
            .collect();
        assert_eq!(queries, vec!["first", "second", "third"]);
        assert_eq!(
            answers,
            vec![
                Answer::Text("a".to_string()),
                Answer::Text("b".to_string()),
                Answer::Text("c".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_query_is_ignored() {
        let mock = MockAdapter::new();
        mock.queue_reply(AdapterReply::Text("ok".to_string()));
        let mock = Arc::new(mock);
        let (handle, _task) = spawn(mock.clone());

        handle.submit("").await.unwrap();
        handle.submit("   ").await.unwrap();
        let turn_id = handle.submit("real").await.unwrap();
        let snapshot = handle.wait_settled(turn_id).await.unwrap();

        assert_eq!(snapshot.transcript.len(), 1);
        assert_eq!(mock.recorded_queries(), vec!["real"]);
    }

    #[tokio::test]
    async fn test_runtime_stops_when_handles_dropped() {
        let (handle, task) = spawn(MockAdapter::new());
        drop(handle);
        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("runtime did not stop")
            .unwrap();
    }
}
