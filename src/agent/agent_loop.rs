//! Core turn loop.

use std::sync::Arc;

use crate::console::Console;
use crate::llm::{ConverseRequest, Decision, ReasoningEngine, ToolCall, ToolResult, ToolSpec};
use crate::tools::ToolExecutor;

use super::termination::{terminal_result, TerminationPolicy};
use super::types::{LogEntryType, RunOutcome, Termination, TurnLogEntry};
use super::AgentError;

const LOG_CALL_LEN: usize = 1000;
const LOG_RESPONSE_LEN: usize = 2000;

/// Drives one conversation between the reasoning engine and the local tools.
///
/// # Algorithm
/// 1. Start a session with only the instructions and tool specs
/// 2. No tool calls in the decision: render any message and stop
/// 3. Otherwise run every call in order
/// 4. If the terminal tool ran: render its output and stop without replying
/// 5. Otherwise send all results back on the same session and repeat from 2
///
/// A controller owns no session state between runs, so separate runs (or
/// separate controllers) never share a conversation.
pub struct TurnController {
    engine: Arc<dyn ReasoningEngine>,
    executor: ToolExecutor,
    console: Arc<dyn Console>,
    policy: TerminationPolicy,
    max_turns: Option<usize>,
}

impl TurnController {
    pub fn new(
        engine: Arc<dyn ReasoningEngine>,
        executor: ToolExecutor,
        console: Arc<dyn Console>,
    ) -> Self {
        Self {
            engine,
            executor,
            console,
            policy: TerminationPolicy::default(),
            max_turns: None,
        }
    }

    pub fn with_policy(mut self, policy: TerminationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Cap the number of tool batches sent back to the engine. `None` is unbounded.
    pub fn with_max_turns(mut self, max_turns: Option<usize>) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Run the conversation to completion.
    pub async fn run(
        &self,
        instructions: &str,
        tool_specs: &[ToolSpec],
    ) -> Result<RunOutcome, AgentError> {
        let mut log = Vec::new();
        let mut turn = 1;

        tracing::info!(tools = tool_specs.len(), "Starting session");
        let mut decision = self
            .engine
            .converse(ConverseRequest::start(instructions, tool_specs))
            .await?;

        loop {
            tracing::debug!(
                turn,
                session = decision.session_ref.as_str(),
                calls = decision.tool_calls.len(),
                "Received decision"
            );

            if decision.tool_calls.is_empty() {
                return Ok(self.finish_with_message(decision, turn, log));
            }

            if let Some(text) = &decision.message {
                tracing::debug!(turn, "Ignoring message alongside tool calls: {}", text);
            }

            let results = self.executor.execute_batch(&decision.tool_calls).await?;
            log_batch(&decision.tool_calls, &results, turn, &mut log);

            if let Some(terminal) = terminal_result(&results, self.policy) {
                tracing::info!(turn, call_id = %terminal.call_id, "Terminal tool invoked, ending session");
                self.console.show_tool_output(&terminal.output);
                let output = terminal.output.clone();
                let termination = if terminal.is_error_envelope() {
                    Termination::SaveFailed(output)
                } else {
                    Termination::PlanSaved(output)
                };
                return Ok(RunOutcome {
                    termination,
                    turns: turn,
                    log,
                });
            }

            if let Some(max) = self.max_turns {
                if turn >= max {
                    tracing::warn!(max, "Turn limit reached without termination");
                    return Err(AgentError::TurnLimitExceeded(max));
                }
            }

            decision = self
                .engine
                .converse(ConverseRequest::resume(
                    instructions,
                    tool_specs,
                    &decision.session_ref,
                    &results,
                ))
                .await?;
            turn += 1;
        }
    }

    fn finish_with_message(
        &self,
        decision: Decision,
        turn: usize,
        mut log: Vec<TurnLogEntry>,
    ) -> RunOutcome {
        match decision.message.as_deref() {
            Some(text) if !text.is_empty() => {
                self.console.render(text);
                log.push(TurnLogEntry::new(
                    turn,
                    LogEntryType::Response,
                    text,
                    LOG_RESPONSE_LEN,
                ));
                tracing::info!(turn, "Session finished with a final message");
            }
            _ => tracing::info!(turn, "Session finished silently"),
        }

        RunOutcome {
            termination: Termination::Message(decision.message),
            turns: turn,
            log,
        }
    }
}

/// Record each call next to its result.
fn log_batch(
    calls: &[ToolCall],
    results: &[ToolResult],
    turn: usize,
    log: &mut Vec<TurnLogEntry>,
) {
    for (call, result) in calls.iter().zip(results) {
        log.push(TurnLogEntry::new(
            turn,
            LogEntryType::ToolCall,
            &format!("Calling tool: {} with args: {}", call.name, call.arguments),
            LOG_CALL_LEN,
        ));
        log.push(TurnLogEntry::new(
            turn,
            LogEntryType::ToolResult,
            &result.output,
            LOG_CALL_LEN,
        ));
    }
}
