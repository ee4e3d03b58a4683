//! Tool system for the travel agent.
//!
//! Tools are unit structs implementing [`Tool`]. The [`ToolRegistry`] is built
//! once at startup and never mutated; the [`ToolExecutor`] turns raw engine
//! tool calls into [`ToolResult`](crate::llm::ToolResult)s.

mod executor;
mod profiles;
mod travel_plan;
mod user_input;

pub use executor::{error_envelope, value_to_string, ToolExecutor};
pub use profiles::{LoadUserProfiles, ProfileSource};
pub use travel_plan::{PlanOutput, SaveTravelPlan};
pub use user_input::ReadUserInput;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::console::Console;
use crate::llm::ToolSpec;
use crate::travel::ProfileParseError;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("{0} source not implemented")]
    UnsupportedSource(String),

    #[error("{0} output not implemented")]
    UnsupportedOutput(String),

    #[error("{0}")]
    Validation(String),

    #[error("Failed to parse profiles: {0}")]
    Profiles(#[from] ProfileParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Fatal errors abort the run instead of being reported to the engine.
    ///
    /// Only an unsupported plan output is fatal; an unsupported profile
    /// source is reported like any other tool failure.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ToolError::UnsupportedOutput(_))
    }
}

/// Resources tools may touch while executing.
#[derive(Clone)]
pub struct ToolContext {
    /// Where `read_user_input` talks to the human
    pub console: Arc<dyn Console>,

    /// Text file holding user profile blocks
    pub profiles_path: PathBuf,

    /// Directory finalized plans are written to
    pub plans_dir: PathBuf,
}

impl ToolContext {
    pub fn new(
        console: Arc<dyn Console>,
        profiles_path: impl Into<PathBuf>,
        plans_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            console,
            profiles_path: profiles_path.into(),
            plans_dir: plans_dir.into(),
        }
    }
}

/// What a tool touches when it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// Blocks on the human
    Interactive,
    /// Reads local data
    Read,
    /// Persists local data
    Write,
}

/// Information about a tool for display purposes.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub side_effect: SideEffect,
    pub is_terminal: bool,
}

/// Trait for implementing tools.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name.
    fn name(&self) -> &str;

    /// Get the tool description.
    fn description(&self) -> &str;

    /// Get the JSON schema for the tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// What the tool touches.
    fn side_effect(&self) -> SideEffect {
        SideEffect::Read
    }

    /// Whether invoking this tool ends the conversation.
    fn is_terminal(&self) -> bool {
        false
    }

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<Value, ToolError>;
}

/// Deserialize keyword-style arguments into a typed struct.
pub(crate) fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

/// Immutable name → tool mapping.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Registry with the three travel tools; `save_travel_plan` is terminal.
    pub fn new() -> Self {
        Self::with_tools(vec![
            Arc::new(ReadUserInput) as Arc<dyn Tool>,
            Arc::new(LoadUserProfiles),
            Arc::new(SaveTravelPlan),
        ])
    }

    /// Build a registry from an explicit tool list. Advertising order follows
    /// the list. Panics on duplicate names.
    pub fn with_tools(tools: Vec<Arc<dyn Tool>>) -> Self {
        let mut index = HashMap::new();
        for (i, tool) in tools.iter().enumerate() {
            if index.insert(tool.name().to_string(), i).is_some() {
                panic!("duplicate tool: {}", tool.name());
            }
        }
        Self { tools, index }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Whether `name` is registered and marked terminal.
    pub fn is_terminal(&self, name: &str) -> bool {
        self.get(name).map(|t| t.is_terminal()).unwrap_or(false)
    }

    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
                side_effect: t.side_effect(),
                is_terminal: t.is_terminal(),
            })
            .collect()
    }

    /// Specs advertised to the engine.
    pub fn get_tool_specs(&self) -> Vec<ToolSpec> {
        self.tools
            .iter()
            .map(|t| ToolSpec {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters_schema(),
            })
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
