//! The achievement catalog and request / response types for this service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wordquest_progression::UserCounters;

use crate::services::users::UserID;

/// The counter an achievement tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric
{
	/// Games finished.
	GamesPlayed,

	/// Games won.
	GamesWon,

	/// Total points.
	Points,

	/// Current level.
	Level,
}

impl Metric
{
	/// Reads this metric off of a user's counters.
	pub fn current(self, counters: &UserCounters) -> u64
	{
		match self {
			Self::GamesPlayed => counters.games_played,
			Self::GamesWon => counters.games_won,
			Self::Points => counters.points,
			Self::Level => counters.level.into(),
		}
	}
}

/// An achievement users can unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement
{
	/// Unique, stable identifier.
	pub id: &'static str,

	/// Display name.
	pub name: &'static str,

	/// What it takes to unlock it.
	pub description: &'static str,

	/// The counter that is tracked.
	pub metric: Metric,

	/// The value [`Achievement::metric`] has to reach.
	pub target: u64,

	/// Experience awarded on unlock.
	pub xp: u32,
}

impl Achievement
{
	/// Whether `counters` satisfy this achievement.
	pub fn is_satisfied_by(&self, counters: &UserCounters) -> bool
	{
		self.metric.current(counters) >= self.target
	}

	/// Progress towards this achievement, in percent.
	pub fn percent(&self, counters: &UserCounters) -> u8
	{
		if self.target == 0 {
			return 100;
		}

		let current = self.metric.current(counters).min(self.target);
		let percent = u128::from(current) * 100 / u128::from(self.target);

		u8::try_from(percent).unwrap_or(100)
	}
}

/// Every achievement there is.
pub static CATALOG: &[Achievement] = &[
	Achievement {
		id: "first-steps",
		name: "First Steps",
		description: "Finish your first game.",
		metric: Metric::GamesPlayed,
		target: 1,
		xp: 10,
	},
	Achievement {
		id: "regular",
		name: "Regular",
		description: "Finish 10 games.",
		metric: Metric::GamesPlayed,
		target: 10,
		xp: 25,
	},
	Achievement {
		id: "dedicated",
		name: "Dedicated Learner",
		description: "Finish 50 games.",
		metric: Metric::GamesPlayed,
		target: 50,
		xp: 75,
	},
	Achievement {
		id: "first-victory",
		name: "First Victory",
		description: "Win a game.",
		metric: Metric::GamesWon,
		target: 1,
		xp: 10,
	},
	Achievement {
		id: "champion",
		name: "Champion",
		description: "Win 25 games.",
		metric: Metric::GamesWon,
		target: 25,
		xp: 100,
	},
	Achievement {
		id: "point-collector",
		name: "Point Collector",
		description: "Earn 1,000 points.",
		metric: Metric::Points,
		target: 1_000,
		xp: 50,
	},
	Achievement {
		id: "point-hoarder",
		name: "Point Hoarder",
		description: "Earn 10,000 points.",
		metric: Metric::Points,
		target: 10_000,
		xp: 200,
	},
	Achievement {
		id: "rising-star",
		name: "Rising Star",
		description: "Reach level 3.",
		metric: Metric::Level,
		target: 3,
		xp: 50,
	},
	Achievement {
		id: "veteran",
		name: "Veteran",
		description: "Reach level 10.",
		metric: Metric::Level,
		target: 10,
		xp: 250,
	},
];

/// Looks up an achievement by its ID.
pub fn find(id: &str) -> Option<&'static Achievement>
{
	CATALOG.iter().find(|achievement| achievement.id == id)
}

/// An achievement that was just unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockedAchievement
{
	/// The achievement's ID.
	pub id: String,

	/// The achievement's name.
	pub name: String,

	/// Experience awarded.
	pub xp: u32,
}

impl From<&Achievement> for UnlockedAchievement
{
	fn from(achievement: &Achievement) -> Self
	{
		Self {
			id: achievement.id.to_owned(),
			name: achievement.name.to_owned(),
			xp: achievement.xp,
		}
	}
}

/// A user's progress towards a single achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementProgress
{
	/// The achievement's ID.
	pub id: String,

	/// The achievement's name.
	pub name: String,

	/// The counter that is tracked.
	pub metric: Metric,

	/// The counter's current value.
	pub current: u64,

	/// The value the counter has to reach.
	pub target: u64,

	/// `current / target`, in percent.
	pub percent: u8,

	/// When the achievement was unlocked, if it was.
	pub unlocked_on: Option<DateTime<Utc>>,
}

/// Response payload for fetching a user's achievements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchAchievementsResponse
{
	/// The user the progress belongs to.
	pub user_id: UserID,

	/// How many achievements the user has unlocked.
	pub unlocked: u64,

	/// Progress for every achievement in the catalog.
	pub achievements: Vec<AchievementProgress>,
}
