//! Run results and transcript entries.

use serde::Serialize;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The engine stopped requesting tools. `None` is a silent stop.
    Message(Option<String>),

    /// The terminal tool ran and saved the plan; holds its output.
    PlanSaved(String),

    /// The terminal tool ran but reported an error; holds the error envelope.
    SaveFailed(String),
}

/// Result of [`TurnController::run`](super::TurnController::run).
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub termination: Termination,

    /// Number of engine decisions processed
    pub turns: usize,

    pub log: Vec<TurnLogEntry>,
}

/// A single entry in the run transcript.
#[derive(Debug, Clone, Serialize)]
pub struct TurnLogEntry {
    /// Timestamp (RFC 3339)
    pub timestamp: String,

    /// 1-based turn the entry belongs to
    pub turn: usize,

    pub entry_type: LogEntryType,

    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEntryType {
    /// Tool is being called
    ToolCall,
    /// Tool returned a result
    ToolResult,
    /// Engine produced a final response
    Response,
}

impl TurnLogEntry {
    pub fn new(turn: usize, entry_type: LogEntryType, content: &str, max_len: usize) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            turn,
            entry_type,
            content: truncate_for_log(content, max_len),
        }
    }
}

/// Truncate a string for logging purposes, respecting char boundaries.
pub(crate) fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated]", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_keeps_short_strings() {
        assert_eq!(truncate_for_log("short", 10), "short");
    }

    #[test]
    fn truncation_never_splits_a_char() {
        // 'á' is two bytes; cutting at 2 would land inside it.
        assert_eq!(truncate_for_log("Máncora", 2), "M... [truncated]");
    }
}
