//! Turns raw engine tool calls into stringified results.

use std::sync::Arc;

use serde_json::{json, Value};

use super::{ToolContext, ToolError, ToolRegistry};
use crate::llm::{ToolCall, ToolResult};

/// Executes tool calls against an immutable [`ToolRegistry`].
///
/// Recoverable failures become `{"error": ...}` envelopes in the output;
/// only fatal [`ToolError`]s are returned as `Err`.
#[derive(Clone)]
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    ctx: ToolContext,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>, ctx: ToolContext) -> Self {
        Self { registry, ctx }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one tool by name and return its output string.
    pub async fn execute(&self, name: &str, raw_arguments: &str) -> Result<String, ToolError> {
        let args: Value = match serde_json::from_str(raw_arguments) {
            Ok(v @ Value::Object(_)) => v,
            Ok(other) => {
                return Ok(invalid_arguments(
                    name,
                    &format!("expected a JSON object, got {}", json_kind(&other)),
                ))
            }
            Err(e) => return Ok(invalid_arguments(name, &e.to_string())),
        };

        let Some(tool) = self.registry.get(name) else {
            tracing::warn!(tool = name, "Engine requested an unknown tool");
            return Ok(error_envelope(&format!("unknown tool: {}", name)));
        };

        match tool.execute(args, &self.ctx).await {
            Ok(value) => Ok(value_to_string(&value)),
            Err(e) if e.is_fatal() => {
                tracing::error!(tool = name, "Fatal tool error: {}", e);
                Err(e)
            }
            Err(ToolError::InvalidArguments { reason, .. }) => {
                Ok(invalid_arguments(name, &reason))
            }
            Err(e) => {
                tracing::warn!(tool = name, "Tool failed: {}", e);
                Ok(error_envelope(&format!("{} failed: {}", name, e)))
            }
        }
    }

    /// Run one call, echoing its `call_id` into the result.
    pub async fn execute_call(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let effect = self.registry.get(&call.name).map(|t| t.side_effect());
        tracing::info!(
            tool = %call.name,
            call_id = %call.call_id,
            side_effect = ?effect,
            "Executing tool call"
        );

        let output = self.execute(&call.name, &call.arguments).await?;

        Ok(ToolResult {
            call_id: call.call_id.clone(),
            output,
            is_terminal: self.registry.is_terminal(&call.name),
        })
    }

    /// Run a batch strictly in order, one result per call.
    pub async fn execute_batch(&self, calls: &[ToolCall]) -> Result<Vec<ToolResult>, ToolError> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            results.push(self.execute_call(call).await?);
        }
        Ok(results)
    }
}

/// Serialize an `{"error": message}` envelope.
pub fn error_envelope(message: &str) -> String {
    json!({ "error": message }).to_string()
}

fn invalid_arguments(tool: &str, detail: &str) -> String {
    tracing::warn!(tool, "Invalid tool arguments: {}", detail);
    json!({
        "error": format!("invalid arguments for {}", tool),
        "detail": detail,
    })
    .to_string()
}

/// Strings pass through untouched; everything else becomes its JSON text.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| "null".to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::tools::Tool;
    use async_trait::async_trait;
    use tokio_test::{assert_err, assert_ok};

    /// Returns whatever `value` it is given, unchanged.
    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the value argument"
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {"value": {}},
                "required": ["value"],
                "additionalProperties": false
            })
        }

        async fn execute(&self, args: Value, _ctx: &ToolContext) -> Result<Value, ToolError> {
            Ok(args["value"].clone())
        }
    }

    fn executor(dir: &std::path::Path, answers: &[&str]) -> ToolExecutor {
        let registry = ToolRegistry::with_tools(vec![
            Arc::new(Echo) as Arc<dyn Tool>,
            Arc::new(crate::tools::ReadUserInput),
            Arc::new(crate::tools::LoadUserProfiles),
            Arc::new(crate::tools::SaveTravelPlan),
        ]);
        let ctx = ToolContext::new(
            Arc::new(ScriptedConsole::new(answers.iter().copied())),
            dir.join("user_profiles.txt"),
            dir,
        );
        ToolExecutor::new(Arc::new(registry), ctx)
    }

    fn envelope_error(output: &str) -> String {
        let v: Value = serde_json::from_str(output).expect("envelope is JSON");
        v["error"].as_str().expect("error key").to_string()
    }

    #[tokio::test]
    async fn stringifies_handler_values() {
        let dir = tempfile::tempdir().unwrap();
        let exec = executor(dir.path(), &[]);

        assert_eq!(exec.execute("echo", r#"{"value":"plain"}"#).await.unwrap(), "plain");
        assert_eq!(exec.execute("echo", r#"{"value":42}"#).await.unwrap(), "42");
        assert_eq!(exec.execute("echo", r#"{"value":true}"#).await.unwrap(), "true");
        assert_eq!(
            exec.execute("echo", r#"{"value":{"a":[1,2]}}"#).await.unwrap(),
            r#"{"a":[1,2]}"#
        );
    }

    #[tokio::test]
    async fn unknown_tool_yields_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let exec = executor(dir.path(), &[]);

        let output = assert_ok!(exec.execute("teleport", "{}").await);
        assert_eq!(envelope_error(&output), "unknown tool: teleport");
    }

    #[tokio::test]
    async fn malformed_payload_yields_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let exec = executor(dir.path(), &[]);

        for raw in ["{not json", "", "[1,2]", "\"text\""] {
            let output = assert_ok!(exec.execute("echo", raw).await);
            assert_eq!(envelope_error(&output), "invalid arguments for echo", "{raw}");
        }
    }

    #[tokio::test]
    async fn schema_violation_in_handler_yields_same_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let exec = executor(dir.path(), &[]);

        let output = assert_ok!(
            exec.execute("read_user_input", r#"{"prompt":"hi","extra":1}"#)
                .await
        );
        assert_eq!(envelope_error(&output), "invalid arguments for read_user_input");

        let output = assert_ok!(exec.execute("save_travel_plan", r#"{"user_name":"Ana"}"#).await);
        assert_eq!(envelope_error(&output), "invalid arguments for save_travel_plan");
    }

    #[tokio::test]
    async fn batch_yields_one_result_per_call_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let exec = executor(dir.path(), &["first", "second"]);

        let calls = vec![
            ToolCall::new("read_user_input", r#"{"prompt":"1?"}"#, "call_x"),
            ToolCall::new("teleport", "{}", "call_y"),
            ToolCall::new("echo", "not json", "call_z"),
            ToolCall::new("read_user_input", r#"{"prompt":"2?"}"#, "call_w"),
        ];

        let results = assert_ok!(exec.execute_batch(&calls).await);
        assert_eq!(results.len(), calls.len());
        for (call, result) in calls.iter().zip(&results) {
            assert_eq!(result.call_id, call.call_id);
            assert!(!result.is_terminal);
        }
        assert_eq!(results[0].output, "first");
        assert_eq!(results[3].output, "second");
        assert!(results[1].is_error_envelope());
        assert!(results[2].is_error_envelope());
    }

    #[tokio::test]
    async fn empty_batch_yields_no_results() {
        let dir = tempfile::tempdir().unwrap();
        let exec = executor(dir.path(), &[]);
        assert!(assert_ok!(exec.execute_batch(&[]).await).is_empty());
    }

    #[tokio::test]
    async fn unsupported_backends_are_asymmetric() {
        let dir = tempfile::tempdir().unwrap();
        let exec = executor(dir.path(), &[]);

        // Profile source: reported to the engine.
        let output = assert_ok!(
            exec.execute("load_user_profiles", r#"{"source":"database"}"#)
                .await
        );
        assert!(envelope_error(&output).contains("database source not implemented"));

        // Plan output: propagated as a fatal error.
        let err = assert_err!(
            exec.execute(
                "save_travel_plan",
                r#"{"user_name":"Ana","destination":"Paracas","activities":[],"accommodation":"hotel","transportation":"bus","estimated_budget":"500 USD","output":"database"}"#,
            )
            .await
        );
        assert!(matches!(err, ToolError::UnsupportedOutput(_)));
        assert!(!dir.path().join("travel_plan_ana.json").exists());
    }

    #[tokio::test]
    async fn terminal_flag_follows_registry_even_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let exec = executor(dir.path(), &[]);

        let call = ToolCall::new("save_travel_plan", "{oops", "call_s");
        let result = assert_ok!(exec.execute_call(&call).await);
        assert!(result.is_terminal);
        assert!(result.is_error_envelope());
    }
}
