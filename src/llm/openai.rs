//! OpenAI Responses API client.
//!
//! Conversation history is kept server-side: every continuation request only
//! carries `previous_response_id` plus the latest batch of tool outputs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{json, Value};

use super::{ConverseRequest, Decision, EngineError, ReasoningEngine, SessionRef, ToolCall};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Reasoning engine backed by `POST {base_url}/responses`.
pub struct OpenAiResponsesClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiResponsesClient {
    /// Create a client with the default base URL and a 120 second timeout.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, EngineError> {
        Self::with_options(api_key, model, DEFAULT_BASE_URL, Duration::from_secs(120))
    }

    pub fn with_options(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, EngineError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }

    /// Build the JSON body for one request.
    fn build_payload(&self, request: &ConverseRequest<'_>) -> Value {
        let tools: Vec<Value> = request
            .tools
            .iter()
            .map(|spec| spec.to_function_schema())
            .collect();

        match request.previous {
            None => json!({
                "model": self.model,
                "input": [{"role": "system", "content": request.instructions}],
                "tools": tools,
            }),
            Some(previous) => {
                let input: Vec<Value> = request
                    .tool_results
                    .iter()
                    .map(|result| {
                        json!({
                            "type": "function_call_output",
                            "call_id": result.call_id,
                            "output": result.output,
                        })
                    })
                    .collect();

                json!({
                    "model": self.model,
                    "previous_response_id": previous.as_str(),
                    "input": input,
                    "tools": tools,
                })
            }
        }
    }
}

#[async_trait]
impl ReasoningEngine for OpenAiResponsesClient {
    async fn converse(&self, request: ConverseRequest<'_>) -> Result<Decision, EngineError> {
        let payload = self.build_payload(&request);

        tracing::debug!(
            fresh = request.is_fresh(),
            results = request.tool_results.len(),
            "Sending request to Responses API"
        );

        let response = self
            .http_client
            .post(self.responses_url())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| EngineError::MalformedResponse(e.to_string()))?;

        parse_decision(&body)
    }
}

/// Turn a Responses API body into a [`Decision`].
pub(crate) fn parse_decision(body: &Value) -> Result<Decision, EngineError> {
    let id = body
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| EngineError::MalformedResponse("missing response id".to_string()))?;

    let output = body
        .get("output")
        .and_then(|o| o.as_array())
        .ok_or_else(|| EngineError::MalformedResponse("missing output".to_string()))?;

    let mut tool_calls = Vec::new();
    let mut text = String::new();

    for item in output {
        match item.get("type").and_then(|t| t.as_str()).unwrap_or("") {
            "function_call" => {
                let name = item
                    .get("name")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        EngineError::MalformedResponse("function_call without name".to_string())
                    })?;
                let call_id = item
                    .get("call_id")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        EngineError::MalformedResponse(format!(
                            "function_call '{}' without call_id",
                            name
                        ))
                    })?;
                // Arguments arrive as a JSON string; anything else is forwarded
                // verbatim so the executor can reject it.
                let arguments = match item.get("arguments") {
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                    None => String::new(),
                };
                tool_calls.push(ToolCall::new(name, arguments, call_id));
            }
            "message" => {
                if let Some(parts) = item.get("content").and_then(|c| c.as_array()) {
                    for part in parts {
                        if let Some(t) = part.get("text").and_then(|t| t.as_str()) {
                            if !text.is_empty() {
                                text.push('\n');
                            }
                            text.push_str(t);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    Ok(Decision {
        session_ref: SessionRef::new(id),
        tool_calls,
        message: if text.is_empty() { None } else { Some(text) },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ToolResult, ToolSpec};
    use mockito::{Matcher, Server};

    fn specs() -> Vec<ToolSpec> {
        vec![ToolSpec {
            name: "read_user_input".to_string(),
            description: "Ask the user something".to_string(),
            parameters: json!({"type": "object", "properties": {}, "required": []}),
        }]
    }

    #[test]
    fn parses_function_calls_in_order() {
        let body = json!({
            "id": "resp_1",
            "output": [
                {"type": "reasoning", "summary": []},
                {"type": "function_call", "name": "load_user_profiles", "arguments": "{}", "call_id": "call_a"},
                {"type": "function_call", "name": "read_user_input", "arguments": "{\"prompt\":\"Hi\"}", "call_id": "call_b"}
            ]
        });

        let decision = parse_decision(&body).unwrap();
        assert_eq!(decision.session_ref.as_str(), "resp_1");
        assert_eq!(decision.tool_calls.len(), 2);
        assert_eq!(decision.tool_calls[0].call_id, "call_a");
        assert_eq!(decision.tool_calls[1].name, "read_user_input");
        assert_eq!(decision.tool_calls[1].arguments, "{\"prompt\":\"Hi\"}");
        assert_eq!(decision.message, None);
    }

    #[test]
    fn parses_message_text() {
        let body = json!({
            "id": "resp_2",
            "output": [{
                "type": "message",
                "content": [
                    {"type": "output_text", "text": "Enjoy"},
                    {"type": "output_text", "text": "your trip!"}
                ]
            }]
        });

        let decision = parse_decision(&body).unwrap();
        assert!(decision.tool_calls.is_empty());
        assert_eq!(decision.message.as_deref(), Some("Enjoy\nyour trip!"));
    }

    #[test]
    fn missing_id_is_malformed() {
        let err = parse_decision(&json!({"output": []})).unwrap_err();
        assert!(matches!(err, EngineError::MalformedResponse(_)));
    }

    #[test]
    fn function_call_without_call_id_is_malformed() {
        let body = json!({
            "id": "resp_3",
            "output": [{"type": "function_call", "name": "read_user_input", "arguments": "{}"}]
        });
        assert!(matches!(
            parse_decision(&body),
            Err(EngineError::MalformedResponse(_))
        ));
    }

    #[test]
    fn new_targets_default_base_url() {
        let client = OpenAiResponsesClient::new("sk-test", "gpt-4.1").unwrap();
        assert_eq!(client.model(), "gpt-4.1");
        assert_eq!(client.responses_url(), "https://api.openai.com/v1/responses");
    }

    #[tokio::test]
    async fn fresh_request_sends_system_instructions_only() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/responses")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4.1",
                "input": [{"role": "system", "content": "Be helpful"}]
            })))
            .with_status(200)
            .with_body(r#"{"id":"resp_1","output":[{"type":"message","content":[{"type":"output_text","text":"ok"}]}]}"#)
            .create_async()
            .await;

        let client = OpenAiResponsesClient::with_options(
            "test-key",
            "gpt-4.1",
            server.url(),
            Duration::from_secs(5),
        )
        .unwrap();
        let tools = specs();

        let decision = client
            .converse(ConverseRequest::start("Be helpful", &tools))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(decision.session_ref.as_str(), "resp_1");
        assert_eq!(decision.message.as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn continuation_sends_previous_id_and_outputs() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/responses")
            .match_body(Matcher::PartialJson(json!({
                "previous_response_id": "resp_1",
                "input": [{"type": "function_call_output", "call_id": "call_a", "output": "Lima"}]
            })))
            .with_status(200)
            .with_body(r#"{"id":"resp_2","output":[]}"#)
            .create_async()
            .await;

        let client = OpenAiResponsesClient::with_options(
            "test-key",
            "gpt-4.1",
            server.url(),
            Duration::from_secs(5),
        )
        .unwrap();
        let tools = specs();
        let previous = SessionRef::new("resp_1");
        let results = vec![ToolResult {
            call_id: "call_a".to_string(),
            output: "Lima".to_string(),
            is_terminal: false,
        }];

        let decision = client
            .converse(ConverseRequest::resume("Be helpful", &tools, &previous, &results))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(decision.session_ref.as_str(), "resp_2");
        assert!(decision.tool_calls.is_empty());
        assert!(decision.message.is_none());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/responses")
            .with_status(401)
            .with_body("bad key")
            .create_async()
            .await;

        let client = OpenAiResponsesClient::with_options(
            "wrong",
            "gpt-4.1",
            server.url(),
            Duration::from_secs(5),
        )
        .unwrap();
        let tools = specs();

        let err = client
            .converse(ConverseRequest::start("x", &tools))
            .await
            .unwrap_err();
        match err {
            EngineError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
