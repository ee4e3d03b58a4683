//! Travel Agent - interactive entry point
//!
//! Runs one planning conversation on stdin/stdout.

use std::sync::Arc;

use travel_agent::agent::{build_system_prompt, Termination, TurnController};
use travel_agent::config::Config;
use travel_agent::console::StdConsole;
use travel_agent::llm::OpenAiResponsesClient;
use travel_agent::tools::{ToolContext, ToolExecutor, ToolRegistry};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the conversation on stdout stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travel_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    let engine = Arc::new(OpenAiResponsesClient::with_options(
        config.api_key.clone(),
        config.default_model.clone(),
        config.base_url.clone(),
        config.request_timeout,
    )?);
    info!(
        "Loaded configuration: model={}, profiles={}",
        engine.model(),
        config.profiles_path.display()
    );

    let console = Arc::new(StdConsole::new());
    let ctx = ToolContext::new(
        console.clone(),
        config.profiles_path.clone(),
        config.plans_dir.clone(),
    );
    let executor = ToolExecutor::new(Arc::new(ToolRegistry::new()), ctx);

    let prompt = build_system_prompt(executor.registry());
    let tool_specs = executor.registry().get_tool_specs();

    let controller = TurnController::new(engine, executor, console)
        .with_policy(config.termination_policy)
        .with_max_turns(config.max_turns);

    let outcome = controller.run(&prompt, &tool_specs).await?;

    match outcome.termination {
        Termination::PlanSaved(_) => info!(turns = outcome.turns, "Plan saved"),
        Termination::SaveFailed(output) => {
            warn!(turns = outcome.turns, "Plan was not saved: {}", output)
        }
        Termination::Message(_) => info!(turns = outcome.turns, "Conversation ended"),
    }

    Ok(())
}
