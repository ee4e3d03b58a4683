//! # Travel Agent
//!
//! A conversational travel planner driven by an LLM through tool calls.
//!
//! This library provides:
//! - A turn loop that alternates between engine decisions and local tool execution
//! - An immutable tool registry with three tools: `read_user_input`,
//!   `load_user_profiles` and the terminal `save_travel_plan`
//! - A Responses API client with server-side conversation state
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Open a session with the system prompt and available tools
//! 2. Execute every requested tool call in order
//! 3. Stop on a final message or once the plan is saved
//! 4. Otherwise feed the results back on the same session and repeat
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use travel_agent::{agent, console::StdConsole, llm::OpenAiResponsesClient, tools};
//!
//! let console = Arc::new(StdConsole::new());
//! let registry = Arc::new(tools::ToolRegistry::new());
//! let ctx = tools::ToolContext::new(console.clone(), "user_profiles.txt", ".");
//! let engine = Arc::new(OpenAiResponsesClient::new(api_key, "gpt-4.1")?);
//! let controller = agent::TurnController::new(
//!     engine,
//!     tools::ToolExecutor::new(registry.clone(), ctx),
//!     console,
//! );
//! let prompt = agent::build_system_prompt(&registry);
//! controller.run(&prompt, &registry.get_tool_specs()).await?;
//! ```

pub mod agent;
pub mod config;
pub mod console;
pub mod llm;
pub mod tools;
pub mod travel;

pub use config::Config;
