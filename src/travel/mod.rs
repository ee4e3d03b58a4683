//! Travel domain records: user profiles and finalized plans.

mod plan;
mod profile;

pub use plan::TravelPlan;
pub use profile::{parse_profiles, ProfileParseError, UserProfile};
