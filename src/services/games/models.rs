//! Request / Response types for this service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wordquest_progression::ProgressResult;

use crate::macros::make_id;
use crate::params::{Limit, Offset};
use crate::services::achievements::UnlockedAchievement;
use crate::services::users::UserID;

make_id! {
	/// A unique identifier for recorded games.
	GameID
}

/// The kinds of games users can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "snake_case")]
pub enum GameKind
{
	/// Match words to their translations.
	WordMatch,

	/// Spell words that are read out loud.
	Spelling,

	/// Fill in the grammatically correct form.
	Grammar,

	/// Answer questions about a spoken text.
	Listening,

	/// Answer questions about a written text.
	Reading,
}

/// Request payload for recording a finished game.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RecordGameRequest
{
	/// What kind of game was played.
	pub kind: GameKind,

	/// Points the game reported.
	///
	/// Negative values are rejected. Values above the configured maximum are
	/// capped.
	pub points: i64,

	/// Whether the user won.
	pub won: bool,
}

/// Response payload for recording a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordGameResponse
{
	/// The new game's ID.
	pub game_id: GameID,

	/// Points that were actually added to the user's total.
	pub points_awarded: u64,

	/// The user's progression after this game.
	pub progress: ProgressResult,

	/// Whether the user moved up to a higher rank.
	pub ranked_up: bool,

	/// Whether the user advanced a level.
	pub leveled_up: bool,

	/// Achievements this game unlocked.
	pub unlocked_achievements: Vec<UnlockedAchievement>,
}

/// Request payload for fetching a user's game history.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct FetchGamesRequest
{
	/// Maximum number of games to return.
	#[serde(default)]
	pub limit: Limit,

	/// Pagination offset.
	#[serde(default)]
	pub offset: Offset,
}

/// A recorded game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Game
{
	/// The game's ID.
	pub id: GameID,

	/// What kind of game was played.
	pub kind: GameKind,

	/// Points awarded for it.
	pub points: i64,

	/// Whether the user won.
	pub won: bool,

	/// When the game was recorded.
	pub created_on: DateTime<Utc>,
}

/// Response payload for fetching a user's game history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchGamesResponse
{
	/// The user the games belong to.
	pub user_id: UserID,

	/// The requested page, newest first.
	pub games: Vec<Game>,

	/// How many games the user has played in total.
	pub total: u64,
}
