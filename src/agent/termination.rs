//! Deciding when a tool batch ends the conversation.

use crate::llm::ToolResult;

/// When a terminal-tool result ends the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TerminationPolicy {
    /// Any invocation of the terminal tool ends the loop, even a failed one.
    #[default]
    OnInvocation,

    /// A terminal-tool result carrying an error envelope is sent back to the
    /// engine instead, giving it a chance to retry the save.
    OnSuccess,
}

/// First result in the batch that ends the loop under `policy`.
pub fn terminal_result(results: &[ToolResult], policy: TerminationPolicy) -> Option<&ToolResult> {
    results.iter().find(|r| match policy {
        TerminationPolicy::OnInvocation => r.is_terminal,
        TerminationPolicy::OnSuccess => r.is_terminal && !r.is_error_envelope(),
    })
}

pub fn is_terminal_batch(results: &[ToolResult], policy: TerminationPolicy) -> bool {
    terminal_result(results, policy).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(call_id: &str, output: &str, is_terminal: bool) -> ToolResult {
        ToolResult {
            call_id: call_id.to_string(),
            output: output.to_string(),
            is_terminal,
        }
    }

    #[test]
    fn empty_batch_is_not_terminal() {
        assert!(!is_terminal_batch(&[], TerminationPolicy::OnInvocation));
        assert!(!is_terminal_batch(&[], TerminationPolicy::OnSuccess));
    }

    #[test]
    fn terminal_anywhere_in_batch_ends_loop() {
        let batch = vec![
            result("a", "Lima", false),
            result("b", "Travel plan saved to travel_plan_ana.json", true),
            result("c", "later", false),
        ];
        let hit = terminal_result(&batch, TerminationPolicy::OnInvocation).unwrap();
        assert_eq!(hit.call_id, "b");
    }

    #[test]
    fn failed_save_depends_on_policy() {
        let batch = vec![result("s", r#"{"error":"save_travel_plan failed: x"}"#, true)];
        assert!(is_terminal_batch(&batch, TerminationPolicy::OnInvocation));
        assert!(!is_terminal_batch(&batch, TerminationPolicy::OnSuccess));
    }

    #[test]
    fn error_content_without_terminal_flag_never_terminates() {
        let batch = vec![result("u", r#"{"error":"unknown tool: x"}"#, false)];
        assert!(!is_terminal_batch(&batch, TerminationPolicy::OnInvocation));
    }
}
