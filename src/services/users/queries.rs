//! Shared query fragments and row types.

use chrono::{DateTime, Utc};
use wordquest_progression::{non_negative, ProgressionCalculator, UserCounters, ValidationError};

use super::{LeaderboardEntry, UserID, UserProfile};

/// Selects every column of [`UserRow`].
pub(super) const SELECT: &str = r"
	SELECT
	  u.id,
	  u.username,
	  u.points,
	  u.games_played,
	  u.games_won,
	  u.level,
	  u.achievements_xp,
	  (
	    SELECT
	      COUNT(*)
	    FROM
	      UnlockedAchievements a
	    WHERE
	      a.user_id = u.id
	  ) completed_achievements,
	  u.rank_id,
	  u.rank_progress,
	  u.created_on
	FROM
	  Users u
";

/// A row of the `Users` table, as it comes out of the database.
#[derive(Debug, sqlx::FromRow)]
#[allow(clippy::missing_docs_in_private_items)]
pub(super) struct UserRow
{
	pub id: UserID,
	pub username: String,
	pub points: i64,
	pub games_played: i64,
	pub games_won: i64,
	pub level: i64,
	pub achievements_xp: i64,
	pub completed_achievements: i64,
	pub rank_id: String,
	pub rank_progress: i64,
	pub created_on: DateTime<Utc>,
}

impl UserRow
{
	/// Validates the counters and attaches the rank's display name.
	pub(super) fn into_profile(
		self,
		calculator: &ProgressionCalculator,
	) -> Result<UserProfile, ValidationError>
	{
		let counters = UserCounters::from_signed(
			self.points,
			self.games_played,
			self.games_won,
			self.level,
			self.completed_achievements,
			self.achievements_xp,
		)?;

		let rank_name = calculator
			.ranks()
			.get(&self.rank_id)
			.map_or_else(|| self.rank_id.clone(), |tier| tier.name.clone());

		let rank_progress = non_negative("rank_progress", self.rank_progress)?;

		Ok(UserProfile {
			id: self.id,
			username: self.username,
			counters,
			rank_id: self.rank_id,
			rank_name,
			rank_progress: u8::try_from(rank_progress.min(100)).unwrap_or(100),
			created_on: self.created_on,
		})
	}
}

/// A row of the leaderboard query.
#[derive(Debug, sqlx::FromRow)]
#[allow(clippy::missing_docs_in_private_items)]
pub(super) struct LeaderboardRow
{
	pub user_id: UserID,
	pub username: String,
	pub points: i64,
	pub level: i64,
	pub rank_id: String,
}

impl LeaderboardRow
{
	/// Turns the row into an entry at `position`.
	pub(super) fn into_entry(self, position: u64) -> Result<LeaderboardEntry, ValidationError>
	{
		let level = non_negative("level", self.level)?;

		Ok(LeaderboardEntry {
			position,
			user_id: self.user_id,
			username: self.username,
			points: non_negative("points", self.points)?,
			level: u32::try_from(level).map_err(|_| ValidationError::LevelOutOfRange { level })?,
			rank_id: self.rank_id,
		})
	}
}
