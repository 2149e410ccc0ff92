//! Request / Response types for this service.

use serde::{Deserialize, Serialize};
use wordquest_progression::{LevelRequirement, ProgressResult};

use crate::services::users::UserID;

/// Response payload for fetching a user's progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchProgressResponse
{
	/// The user this breakdown belongs to.
	pub user_id: UserID,

	/// The level the user is currently at.
	pub level: u32,

	/// A fresh evaluation of the user's counters.
	pub progress: ProgressResult,

	/// What it takes to reach the next level, or `null` at the highest level.
	pub next_level: Option<LevelRequirement>,
}
