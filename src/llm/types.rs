//! Wire-independent types exchanged with the reasoning engine.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Opaque continuation handle for engine-side conversation state.
///
/// Never inspected locally; it is only passed forward on the next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRef(String);

impl SessionRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A tool invocation requested by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Registered tool name
    pub name: String,

    /// Raw argument payload, as emitted by the engine (usually a JSON object string)
    pub arguments: String,

    /// Correlation token, echoed back unmodified in the matching result
    pub call_id: String,
}

impl ToolCall {
    pub fn new(
        name: impl Into<String>,
        arguments: impl Into<String>,
        call_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
            call_id: call_id.into(),
        }
    }
}

/// Outcome of executing one [`ToolCall`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub call_id: String,

    /// Stringified handler output or error envelope
    pub output: String,

    /// Whether this result came from the terminal tool
    pub is_terminal: bool,
}

impl ToolResult {
    /// Whether the output is an `{"error": ...}` envelope.
    pub fn is_error_envelope(&self) -> bool {
        serde_json::from_str::<Value>(&self.output)
            .ok()
            .and_then(|v| v.as_object().map(|o| o.contains_key("error")))
            .unwrap_or(false)
    }
}

/// The engine's output for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Continuation handle for the next request
    pub session_ref: SessionRef,

    /// Requested tool calls, in the order they must run
    pub tool_calls: Vec<ToolCall>,

    /// Final assistant text, if any
    pub message: Option<String>,
}

impl Decision {
    /// A decision that only carries a final message.
    pub fn message(session_ref: SessionRef, text: impl Into<String>) -> Self {
        Self {
            session_ref,
            tool_calls: Vec::new(),
            message: Some(text.into()),
        }
    }

    /// A decision that requests a batch of tool calls.
    pub fn tool_calls(session_ref: SessionRef, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            session_ref,
            tool_calls,
            message: None,
        }
    }
}

/// A tool as advertised to the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolSpec {
    /// Function-tool definition in the Responses API shape.
    pub fn to_function_schema(&self) -> Value {
        json!({
            "type": "function",
            "name": self.name,
            "description": self.description,
            "parameters": self.parameters,
        })
    }
}

/// One request to the engine.
///
/// A fresh request has no `previous` reference and no results; a continuation
/// request carries both.
#[derive(Debug, Clone, Copy)]
pub struct ConverseRequest<'a> {
    pub instructions: &'a str,
    pub tools: &'a [ToolSpec],
    pub previous: Option<&'a SessionRef>,
    pub tool_results: &'a [ToolResult],
}

impl<'a> ConverseRequest<'a> {
    pub fn start(instructions: &'a str, tools: &'a [ToolSpec]) -> Self {
        Self {
            instructions,
            tools,
            previous: None,
            tool_results: &[],
        }
    }

    pub fn resume(
        instructions: &'a str,
        tools: &'a [ToolSpec],
        previous: &'a SessionRef,
        tool_results: &'a [ToolResult],
    ) -> Self {
        Self {
            instructions,
            tools,
            previous: Some(previous),
            tool_results,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.previous.is_none()
    }
}
