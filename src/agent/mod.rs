//! Agent module - the turn-taking loop around the reasoning engine.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Start a session with the system prompt and available tools
//! 2. Execute every tool call the engine requests, in order
//! 3. Stop when the engine answers without tool calls or the terminal tool runs
//! 4. Otherwise feed the results back and repeat

mod agent_loop;
mod prompt;
mod termination;
mod types;

pub use agent_loop::TurnController;
pub use prompt::build_system_prompt;
pub use termination::{is_terminal_batch, terminal_result, TerminationPolicy};
pub use types::{LogEntryType, RunOutcome, Termination, TurnLogEntry};

use thiserror::Error;

use crate::llm::EngineError;
use crate::tools::ToolError;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Reasoning engine failed: {0}")]
    Engine(#[from] EngineError),

    #[error("Fatal tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Max turns ({0}) reached without termination")]
    TurnLimitExceeded(usize),
}
