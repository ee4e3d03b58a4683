//! Finalized travel plan record.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelPlan {
    pub user_name: String,
    pub destination: String,
    pub activities: Vec<String>,
    pub accommodation: String,
    pub transportation: String,
    pub estimated_budget: String,
    pub travel_dates: Option<String>,
    pub notes: Option<String>,
}

impl TravelPlan {
    /// Check domain constraints the schema cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.user_name.trim().is_empty() {
            return Err("user_name must not be empty".to_string());
        }
        if self.destination.trim().is_empty() {
            return Err("destination must not be empty".to_string());
        }
        Ok(())
    }

    /// File name the plan is persisted under; depends only on `user_name`.
    pub fn file_name(&self) -> String {
        let slug: String = self
            .user_name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("travel_plan_{}.json", slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(user_name: &str) -> TravelPlan {
        TravelPlan {
            user_name: user_name.to_string(),
            destination: "Máncora".to_string(),
            activities: vec!["surfing".to_string()],
            accommodation: "beach hostel".to_string(),
            transportation: "bus".to_string(),
            estimated_budget: "800 USD".to_string(),
            travel_dates: None,
            notes: None,
        }
    }

    #[test]
    fn file_name_is_lowercased_and_sanitized() {
        assert_eq!(plan("Ana").file_name(), "travel_plan_ana.json");
        assert_eq!(plan("Ana María").file_name(), "travel_plan_ana_mar_a.json");
        assert_eq!(plan("../etc").file_name(), "travel_plan____etc.json");
    }

    #[test]
    fn blank_required_strings_fail_validation() {
        assert!(plan("Ana").validate().is_ok());
        assert!(plan("  ").validate().is_err());

        let mut p = plan("Ana");
        p.destination = String::new();
        assert_eq!(p.validate(), Err("destination must not be empty".to_string()));
    }
}
