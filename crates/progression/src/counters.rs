use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A snapshot of a user's raw progression counters.
///
/// These are read fresh from storage right before every evaluation; the calculator never holds on
/// to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCounters
{
	/// Total points earned across all games.
	pub points: u64,

	/// How many games the user has finished.
	pub games_played: u64,

	/// How many of those games the user has won.
	pub games_won: u64,

	/// The user's current level. Starts at 1.
	pub level: u32,

	/// How many achievements the user has unlocked.
	pub completed_achievements: u64,

	/// XP collected from unlocked achievements.
	pub achievements_xp: u64,
}

impl Default for UserCounters
{
	fn default() -> Self
	{
		Self {
			points: 0,
			games_played: 0,
			games_won: 0,
			level: 1,
			completed_achievements: 0,
			achievements_xp: 0,
		}
	}
}

impl UserCounters
{
	/// Checks the invariants between the individual counters.
	pub const fn validate(&self) -> Result<(), ValidationError>
	{
		if self.level == 0 {
			return Err(ValidationError::LevelZero);
		}

		if self.games_won > self.games_played {
			return Err(ValidationError::WinsExceedGames {
				games_played: self.games_played,
				games_won: self.games_won,
			});
		}

		Ok(())
	}

	/// Builds counters from signed values, as they come out of a database row.
	///
	/// Negative values are rejected instead of clamped, and the result is validated.
	pub fn from_signed(
		points: i64,
		games_played: i64,
		games_won: i64,
		level: i64,
		completed_achievements: i64,
		achievements_xp: i64,
	) -> Result<Self, ValidationError>
	{
		let level = non_negative("level", level)?;
		let counters = Self {
			points: non_negative("points", points)?,
			games_played: non_negative("games_played", games_played)?,
			games_won: non_negative("games_won", games_won)?,
			level: u32::try_from(level).map_err(|_| ValidationError::LevelOutOfRange { level })?,
			completed_achievements: non_negative("completed_achievements", completed_achievements)?,
			achievements_xp: non_negative("achievements_xp", achievements_xp)?,
		};

		counters.validate()?;

		Ok(counters)
	}
}

/// Converts a signed counter into an unsigned one, rejecting negative values.
pub fn non_negative(field: &'static str, value: i64) -> Result<u64, ValidationError>
{
	u64::try_from(value).map_err(|_| ValidationError::NegativeCounter { field, value })
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn default_is_valid()
	{
		assert_eq!(UserCounters::default().validate(), Ok(()));
		assert_eq!(UserCounters::default().level, 1);
	}

	#[test]
	fn more_wins_than_games()
	{
		let counters = UserCounters { games_played: 2, games_won: 3, ..Default::default() };

		assert_eq!(
			counters.validate(),
			Err(ValidationError::WinsExceedGames { games_played: 2, games_won: 3 }),
		);
	}

	#[test]
	fn level_zero()
	{
		let counters = UserCounters { level: 0, ..Default::default() };

		assert_eq!(counters.validate(), Err(ValidationError::LevelZero));
	}

	#[test]
	fn from_signed_rejects_negatives()
	{
		assert_eq!(
			UserCounters::from_signed(-5, 0, 0, 1, 0, 0),
			Err(ValidationError::NegativeCounter { field: "points", value: -5 }),
		);

		assert_eq!(
			UserCounters::from_signed(0, 0, 0, 1, 0, -1),
			Err(ValidationError::NegativeCounter { field: "achievements_xp", value: -1 }),
		);
	}

	#[test]
	fn from_signed_rejects_huge_levels()
	{
		let level = i64::from(u32::MAX) + 1;

		assert_eq!(
			UserCounters::from_signed(0, 0, 0, level, 0, 0),
			Err(ValidationError::LevelOutOfRange { level: level.unsigned_abs() }),
		);
	}

	#[test]
	fn from_signed_validates()
	{
		assert_eq!(
			UserCounters::from_signed(10, 1, 2, 1, 0, 0),
			Err(ValidationError::WinsExceedGames { games_played: 1, games_won: 2 }),
		);

		let counters = UserCounters::from_signed(10, 4, 2, 3, 1, 50).expect("counters are valid");

		assert_eq!(counters.games_won, 2);
		assert_eq!(counters.level, 3);
		assert_eq!(counters.achievements_xp, 50);
	}
}
