//! Talking to the human.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_args, SideEffect, Tool, ToolContext, ToolError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReadUserInputArgs {
    prompt: String,
}

/// Show a message to the user and wait for a reply.
pub struct ReadUserInput;

#[async_trait]
impl Tool for ReadUserInput {
    fn name(&self) -> &str {
        "read_user_input"
    }

    fn description(&self) -> &str {
        "Display a message to the user and wait for their response. Use this for every question, prompt, or message you want to show the user. Returns the user's typed input as a string."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "The message or question to display to the user."
                }
            },
            "required": ["prompt"],
            "additionalProperties": false
        })
    }

    fn side_effect(&self) -> SideEffect {
        SideEffect::Interactive
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let args: ReadUserInputArgs = parse_args(self.name(), args)?;
        let answer = ctx.console.read_line(&args.prompt).await;
        Ok(Value::String(answer))
    }
}
