//! Loading user profiles.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_args, Tool, ToolContext, ToolError};
use crate::travel::parse_profiles;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    #[default]
    File,
    Database,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoadUserProfilesArgs {
    #[serde(default)]
    source: ProfileSource,
}

/// Read every profile from the configured source.
pub struct LoadUserProfiles;

#[async_trait]
impl Tool for LoadUserProfiles {
    fn name(&self) -> &str {
        "load_user_profiles"
    }

    fn description(&self) -> &str {
        "Load all user profiles from a data source. Returns a list of profiles containing each user's name, location, travel preferences, budget, and available time."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "source": {
                    "type": "string",
                    "description": "Data source to read profiles from.",
                    "enum": ["file", "database"]
                }
            },
            "required": [],
            "additionalProperties": false
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<Value, ToolError> {
        let args: LoadUserProfilesArgs = parse_args(self.name(), args)?;

        match args.source {
            ProfileSource::File => {}
            ProfileSource::Database => {
                return Err(ToolError::UnsupportedSource("database".to_string()))
            }
        }

        let raw = tokio::fs::read_to_string(&ctx.profiles_path).await?;
        let profiles = parse_profiles(&raw)?;

        tracing::debug!(
            count = profiles.len(),
            path = %ctx.profiles_path.display(),
            "Loaded user profiles"
        );

        Ok(Value::String(serde_json::to_string_pretty(&profiles)?))
    }
}
