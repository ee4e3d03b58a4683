//! Deterministic engine that replays canned decisions.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ConverseRequest, Decision, EngineError, ReasoningEngine, SessionRef, ToolResult};

/// Snapshot of one request received by a [`ScriptedEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub previous: Option<SessionRef>,
    pub tool_results: Vec<ToolResult>,
    pub tool_names: Vec<String>,
}

impl RecordedRequest {
    pub fn is_fresh(&self) -> bool {
        self.previous.is_none()
    }
}

/// Engine that answers each request with the next queued [`Decision`].
///
/// Running out of decisions is an error rather than a silent stop so that a
/// loop which asks for more turns than scripted fails loudly.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    decisions: Mutex<VecDeque<Decision>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedEngine {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            decisions: Mutex::new(decisions.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Decisions not yet handed out.
    pub fn remaining(&self) -> usize {
        self.decisions.lock().map(|d| d.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ReasoningEngine for ScriptedEngine {
    async fn converse(&self, request: ConverseRequest<'_>) -> Result<Decision, EngineError> {
        let index = {
            let mut requests = self
                .requests
                .lock()
                .map_err(|_| EngineError::MalformedResponse("request log poisoned".to_string()))?;
            requests.push(RecordedRequest {
                previous: request.previous.cloned(),
                tool_results: request.tool_results.to_vec(),
                tool_names: request.tools.iter().map(|t| t.name.clone()).collect(),
            });
            requests.len()
        };

        let mut decisions = self
            .decisions
            .lock()
            .map_err(|_| EngineError::MalformedResponse("decision queue poisoned".to_string()))?;
        decisions
            .pop_front()
            .ok_or(EngineError::ScriptExhausted(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ToolSpec;

    #[tokio::test]
    async fn replays_and_records() {
        let engine = ScriptedEngine::new(vec![Decision::message(SessionRef::new("s1"), "hi")]);
        let tools: Vec<ToolSpec> = Vec::new();

        let decision = engine
            .converse(ConverseRequest::start("sys", &tools))
            .await
            .unwrap();
        assert_eq!(decision.message.as_deref(), Some("hi"));
        assert_eq!(engine.remaining(), 0);

        let err = engine
            .converse(ConverseRequest::start("sys", &tools))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::ScriptExhausted(2)));

        let requests = engine.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].is_fresh());
    }
}
