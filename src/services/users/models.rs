//! Request / Response types for this service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wordquest_progression::UserCounters;

use crate::macros::make_id;
use crate::params::{Limit, Offset};

make_id! {
	/// A unique identifier for users.
	UserID
}

/// Request payload for registering a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserRequest
{
	/// The name other users will see.
	pub username: String,

	/// The user's email address.
	pub email: String,
}

/// Response payload for registering a new user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegisterUserResponse
{
	/// The new user's ID.
	pub user_id: UserID,
}

/// A user together with their progression state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile
{
	/// The user's ID.
	pub id: UserID,

	/// The user's name.
	pub username: String,

	/// The user's raw progression counters.
	#[serde(flatten)]
	pub counters: UserCounters,

	/// ID of the rank the user was last evaluated at.
	pub rank_id: String,

	/// Name of that rank.
	pub rank_name: String,

	/// Progress towards the next rank, in percent.
	pub rank_progress: u8,

	/// When the user registered.
	pub created_on: DateTime<Utc>,
}

/// Request payload for fetching the leaderboard.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct FetchLeaderboardRequest
{
	/// Maximum number of entries to return.
	#[serde(default)]
	pub limit: Limit,

	/// Pagination offset.
	#[serde(default)]
	pub offset: Offset,
}

/// A single leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry
{
	/// 1-based position on the leaderboard.
	pub position: u64,

	/// The user's ID.
	pub user_id: UserID,

	/// The user's name.
	pub username: String,

	/// Total points earned.
	pub points: u64,

	/// Current level.
	pub level: u32,

	/// Current rank.
	pub rank_id: String,
}

/// Response payload for fetching the leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchLeaderboardResponse
{
	/// The requested page.
	pub entries: Vec<LeaderboardEntry>,

	/// How many users there are in total, ignoring pagination.
	pub total: u64,
}
