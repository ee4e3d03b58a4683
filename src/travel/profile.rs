//! User profile records and their text-file format.
//!
//! The file is a sequence of blank-line-separated blocks:
//!
//! ```text
//! Name: Ana
//! Current Location: Lima
//! Prefer: beaches
//! Budget: 2000 USD
//! Available Time: 1 week
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileParseError {
    #[error("Profile block {block} is missing required field '{field}'")]
    MissingField { block: usize, field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub current_location: String,
    pub preferences: String,
    pub budget: Option<String>,
    pub available_time: Option<String>,
}

/// Parse every profile block in `raw`. Blocks are 1-indexed in errors.
pub fn parse_profiles(raw: &str) -> Result<Vec<UserProfile>, ProfileParseError> {
    raw.trim()
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .enumerate()
        .map(|(i, block)| parse_block(block, i + 1))
        .collect()
}

fn parse_block(block: &str, index: usize) -> Result<UserProfile, ProfileParseError> {
    let mut name = None;
    let mut current_location = None;
    let mut preferences = None;
    let mut budget = None;
    let mut available_time = None;

    for line in block.trim().lines() {
        let Some((key, value)) = line.split_once(": ") else {
            continue;
        };
        let value = Some(value.trim().to_string());
        match key.trim() {
            "Name" => name = value,
            "Current Location" => current_location = value,
            "Prefer" => preferences = value,
            "Budget" => budget = value,
            "Available Time" => available_time = value,
            _ => {}
        }
    }

    let missing = |field| ProfileParseError::MissingField {
        block: index,
        field,
    };

    Ok(UserProfile {
        name: name.ok_or_else(|| missing("Name"))?,
        current_location: current_location.ok_or_else(|| missing("Current Location"))?,
        preferences: preferences.ok_or_else(|| missing("Prefer"))?,
        budget,
        available_time,
    })
}
