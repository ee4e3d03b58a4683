//! Persisting the finalized plan. This is the terminal tool.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_args, SideEffect, Tool, ToolContext, ToolError};
use crate::travel::TravelPlan;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanOutput {
    #[default]
    File,
    Database,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SaveTravelPlanArgs {
    user_name: String,
    destination: String,
    activities: Vec<String>,
    accommodation: String,
    transportation: String,
    estimated_budget: String,
    #[serde(default)]
    travel_dates: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    output: PlanOutput,
}

/// Validate and save the final plan, ending the conversation.
pub struct SaveTravelPlan;

#[async_trait]
impl Tool for SaveTravelPlan {
    fn name(&self) -> &str {
        "save_travel_plan"
    }

    fn description(&self) -> &str {
        "Validate and save the final travel plan to a destination. Call this only when the user has confirmed they are ready for their final plan."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_name": {"type": "string", "description": "Name of the user this plan is for."},
                "destination": {"type": "string", "description": "Travel destination."},
                "activities": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "List of recommended activities."
                },
                "accommodation": {"type": "string", "description": "Lodging recommendation."},
                "transportation": {"type": "string", "description": "How the user will get there and get around."},
                "estimated_budget": {"type": "string", "description": "Total estimated cost."},
                "travel_dates": {"type": "string", "description": "Suggested travel dates or timeframe."},
                "notes": {"type": "string", "description": "Personalised tips based on the user profile."},
                "output": {
                    "type": "string",
                    "description": "Output destination: 'file' or 'database'.",
                    "enum": ["file", "database"]
                }
            },
            "required": [
                "user_name",
                "destination",
                "activities",
                "accommodation",
                "transportation",
                "estimated_budget"
            ],
            "additionalProperties": false
        })
    }

    fn side_effect(&self) -> SideEffect {
        SideEffect::Write
    }

    fn is_terminal(&self) -> bool {
        true
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let args: SaveTravelPlanArgs = parse_args(self.name(), args)?;

        if args.output == PlanOutput::Database {
            return Err(ToolError::UnsupportedOutput("database".to_string()));
        }

        let plan = TravelPlan {
            user_name: args.user_name,
            destination: args.destination,
            activities: args.activities,
            accommodation: args.accommodation,
            transportation: args.transportation,
            estimated_budget: args.estimated_budget,
            travel_dates: args.travel_dates,
            notes: args.notes,
        };
        plan.validate().map_err(ToolError::Validation)?;

        let file_name = plan.file_name();
        let path = ctx.plans_dir.join(&file_name);
        tokio::fs::create_dir_all(&ctx.plans_dir).await?;
        tokio::fs::write(&path, serde_json::to_string_pretty(&plan)?).await?;

        tracing::info!(path = %path.display(), user = %plan.user_name, "Saved travel plan");

        Ok(Value::String(format!("Travel plan saved to {}", file_name)))
    }
}
