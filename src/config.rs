//! Configuration management for the travel agent.
//!
//! Configuration can be set via environment variables:
//! - `OPENAI_API_KEY` - Required. API key for the Responses API.
//! - `OPENAI_BASE_URL` - Optional. Defaults to `https://api.openai.com/v1`.
//! - `DEFAULT_MODEL` - Optional. Defaults to `gpt-4.1`.
//! - `REQUEST_TIMEOUT_SECS` - Optional. Engine request timeout. Defaults to `120`.
//! - `DATA_DIR` - Optional. Base directory for data files. Defaults to `data`.
//! - `PROFILES_PATH` - Optional. Profiles text file. Defaults to `$DATA_DIR/user_profiles.txt`.
//! - `PLANS_DIR` - Optional. Where plans are written. Defaults to `$DATA_DIR`.
//! - `MAX_TURNS` - Optional. Maximum tool batches per session. Unbounded when unset.
//! - `TERMINATE_ON_FAILED_SAVE` - Optional. End the session even when saving fails. Defaults to `true`.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::agent::TerminationPolicy;
use crate::llm::DEFAULT_BASE_URL;

/// Data directory used when `DATA_DIR` is unset, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Profiles file name inside the data directory.
pub const PROFILES_FILE: &str = "user_profiles.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Responses API key
    pub api_key: String,

    /// Responses API base URL
    pub base_url: String,

    /// Model identifier
    pub default_model: String,

    /// Timeout for one engine request
    pub request_timeout: Duration,

    /// User profiles text file
    pub profiles_path: PathBuf,

    /// Directory finalized plans are written to
    pub plans_dir: PathBuf,

    /// Maximum tool batches before giving up
    pub max_turns: Option<usize>,

    /// What ends the loop when the terminal tool runs
    pub termination_policy: TerminationPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let default_model =
            std::env::var("DEFAULT_MODEL").unwrap_or_else(|_| "gpt-4.1".to_string());

        let request_timeout = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;

        let (profiles_path, plans_dir) = resolve_data_paths(
            std::env::var("DATA_DIR").ok(),
            std::env::var("PROFILES_PATH").ok(),
            std::env::var("PLANS_DIR").ok(),
        );

        let max_turns = std::env::var("MAX_TURNS")
            .ok()
            .map(|v| {
                v.parse::<usize>().map_err(|e| {
                    ConfigError::InvalidValue("MAX_TURNS".to_string(), format!("{}", e))
                })
            })
            .transpose()?;

        let terminate_on_failed_save = std::env::var("TERMINATE_ON_FAILED_SAVE")
            .ok()
            .map(|v| {
                parse_bool(&v).map_err(|e| {
                    ConfigError::InvalidValue("TERMINATE_ON_FAILED_SAVE".to_string(), e)
                })
            })
            .transpose()?
            .unwrap_or(true);

        let termination_policy = if terminate_on_failed_save {
            TerminationPolicy::OnInvocation
        } else {
            TerminationPolicy::OnSuccess
        };

        Ok(Self {
            api_key,
            base_url,
            default_model,
            request_timeout,
            profiles_path,
            plans_dir,
            max_turns,
            termination_policy,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, default_model: String, data_dir: PathBuf) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model,
            request_timeout: Duration::from_secs(120),
            profiles_path: data_dir.join(PROFILES_FILE),
            plans_dir: data_dir,
            max_turns: None,
            termination_policy: TerminationPolicy::default(),
        }
    }
}

/// Profiles file and plans directory, falling back to `DATA_DIR` and then `data/`.
fn resolve_data_paths(
    data_dir: Option<String>,
    profiles_path: Option<String>,
    plans_dir: Option<String>,
) -> (PathBuf, PathBuf) {
    let data_dir = PathBuf::from(data_dir.unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()));
    let profiles_path = profiles_path
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join(PROFILES_FILE));
    let plans_dir = plans_dir.map(PathBuf::from).unwrap_or(data_dir);
    (profiles_path, plans_dir)
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        other => Err(format!("expected boolean-like value, got: {}", other)),
    }
}
