//! Reasoning-engine boundary.
//!
//! The turn loop only talks to [`ReasoningEngine`]. Production uses
//! [`OpenAiResponsesClient`]; tests use [`ScriptedEngine`].

mod openai;
mod scripted;
mod types;

pub use openai::{OpenAiResponsesClient, DEFAULT_BASE_URL};
pub use scripted::{RecordedRequest, ScriptedEngine};
pub use types::{ConverseRequest, Decision, SessionRef, ToolCall, ToolResult, ToolSpec};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Engine returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed engine response: {0}")]
    MalformedResponse(String),

    #[error("Scripted engine has no decision left for request #{0}")]
    ScriptExhausted(usize),
}

/// Anything that can advance a tool-calling conversation by one turn.
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    /// Send instructions, tools and (for continuations) the previous batch of
    /// tool results; return the engine's next decision.
    async fn converse(&self, request: ConverseRequest<'_>) -> Result<Decision, EngineError>;
}
