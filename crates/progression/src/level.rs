//! Level requirements and level-up decisions.
//!
//! Every level has four requirements (points, games played, games won, achievements unlocked),
//! each growing geometrically with the level. A user levels up only once **all** of the next
//! level's requirements are met.

use serde::{Deserialize, Serialize};

use crate::rank::percent;
use crate::{ConfigurationError, UserCounters};

/// Points required for level 1.
pub const BASE_POINTS: u64 = 100;

/// Games played required for level 1.
pub const BASE_GAMES: u64 = 5;

/// Games won required for level 1.
pub const BASE_WINS: u64 = 3;

/// Achievements required for level 1.
pub const BASE_ACHIEVEMENTS: u64 = 2;

/// How much every requirement grows per level.
pub const GROWTH: f64 = 1.5;

/// Parameters of the level curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LevelCurve
{
	/// Points required for level 1.
	pub base_points: u64,

	/// Games played required for level 1.
	pub base_games: u64,

	/// Games won required for level 1.
	pub base_wins: u64,

	/// Achievements required for level 1.
	pub base_achievements: u64,

	/// Per-level growth factor.
	pub growth: f64,
}

impl Default for LevelCurve
{
	fn default() -> Self
	{
		Self {
			base_points: BASE_POINTS,
			base_games: BASE_GAMES,
			base_wins: BASE_WINS,
			base_achievements: BASE_ACHIEVEMENTS,
			growth: GROWTH,
		}
	}
}

/// What it takes to reach a specific level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRequirement
{
	/// Total points.
	pub points_needed: u64,

	/// Total games played.
	pub games_needed: u64,

	/// Total games won.
	pub wins_needed: u64,

	/// Total achievements unlocked.
	pub achievements_needed: u64,
}

/// How close a user is to their next level, per requirement, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress
{
	/// Progress towards the points requirement.
	pub points: u8,

	/// Progress towards the games played requirement.
	pub games: u8,

	/// Progress towards the games won requirement.
	pub wins: u8,

	/// Progress towards the achievements requirement.
	pub achievements: u8,

	/// The arithmetic mean of the four values above, rounded down.
	pub overall: u8,
}

impl LevelCurve
{
	/// Makes sure the curve produces strictly increasing requirements.
	///
	/// With `base * (growth - 1) >= 1`, consecutive requirements differ by at least 1 before
	/// flooring, so they still differ after. The curve must also allow at least one level-up
	/// before its requirements stop fitting into a `u64`.
	#[allow(clippy::as_conversions, clippy::cast_precision_loss)]
	pub fn validate(&self) -> Result<(), ConfigurationError>
	{
		if !self.growth.is_finite() || self.growth <= 1.0 {
			return Err(ConfigurationError::InvalidGrowth { growth: self.growth });
		}

		for (dimension, base) in [
			("points", self.base_points),
			("games", self.base_games),
			("wins", self.base_wins),
			("achievements", self.base_achievements),
		] {
			if base == 0 || (base as f64) * (self.growth - 1.0) < 1.0 {
				return Err(ConfigurationError::BaseTooSmall { dimension, base, growth: self.growth });
			}
		}

		if self.max_level() < 2 {
			return Err(ConfigurationError::CurveOverflows { growth: self.growth });
		}

		Ok(())
	}

	/// Calculates the requirements for reaching `level`.
	///
	/// Level 0 is treated like level 1. Returns `None` for levels beyond
	/// [`LevelCurve::max_level()`], whose requirements do not fit into a `u64`.
	pub fn requirements(&self, level: u32) -> Option<LevelRequirement>
	{
		let exponent = i32::try_from(level.saturating_sub(1)).ok()?;
		let factor = self.growth.powi(exponent);

		Some(LevelRequirement {
			points_needed: scale(self.base_points, factor)?,
			games_needed: scale(self.base_games, factor)?,
			wins_needed: scale(self.base_wins, factor)?,
			achievements_needed: scale(self.base_achievements, factor)?,
		})
	}

	/// The highest level that can be reached.
	///
	/// Requirements grow monotonically, so this is a binary search for the last level whose
	/// requirements still fit.
	pub fn max_level(&self) -> u32
	{
		if self.requirements(1).is_none() {
			return 0;
		}

		// `low` always fits, `high` never does
		let (mut low, mut high) = (1_u32, u32::MAX);

		if self.requirements(high).is_some() {
			return high;
		}

		while high - low > 1 {
			let mid = low + (high - low) / 2;

			if self.requirements(mid).is_some() {
				low = mid;
			} else {
				high = mid;
			}
		}

		low
	}

	/// Whether `counters` satisfy every requirement of the next level.
	///
	/// Always `false` at [`LevelCurve::max_level()`].
	pub fn can_level_up(&self, counters: &UserCounters) -> bool
	{
		let Some(req) = self.requirements(counters.level.saturating_add(1)) else {
			return false;
		};

		counters.points >= req.points_needed
			&& counters.games_played >= req.games_needed
			&& counters.games_won >= req.wins_needed
			&& counters.completed_achievements >= req.achievements_needed
	}

	/// Breaks down how close `counters` are to the next level.
	///
	/// Users at the highest level are reported as complete.
	pub fn progress(&self, counters: &UserCounters) -> LevelProgress
	{
		let Some(req) = self.requirements(counters.level.saturating_add(1)) else {
			return LevelProgress { points: 100, games: 100, wins: 100, achievements: 100, overall: 100 };
		};

		let dimension = |current: u64, needed: u64| match needed {
			0 => 100,
			needed => percent(current, needed),
		};

		let points = dimension(counters.points, req.points_needed);
		let games = dimension(counters.games_played, req.games_needed);
		let wins = dimension(counters.games_won, req.wins_needed);
		let achievements = dimension(counters.completed_achievements, req.achievements_needed);
		let sum = u16::from(points) + u16::from(games) + u16::from(wins) + u16::from(achievements);
		let overall = u8::try_from(sum / 4).unwrap_or(100);

		LevelProgress { points, games, wins, achievements, overall }
	}
}

/// `2^64`, the first value that does not fit into a `u64`.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// `floor(base * factor)`, if the result fits into a `u64`.
#[allow(
	clippy::as_conversions,
	clippy::cast_possible_truncation,
	clippy::cast_precision_loss,
	clippy::cast_sign_loss
)]
fn scale(base: u64, factor: f64) -> Option<u64>
{
	let scaled = ((base as f64) * factor).floor();

	(scaled.is_finite() && scaled < U64_LIMIT).then_some(scaled as u64)
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn level_two()
	{
		let req = LevelCurve::default().requirements(2);

		assert_eq!(
			req,
			Some(LevelRequirement {
				points_needed: 150,
				games_needed: 7,
				wins_needed: 4,
				achievements_needed: 3,
			}),
		);
	}

	#[test]
	fn level_one_is_the_base()
	{
		let curve = LevelCurve::default();
		let req = curve.requirements(1).expect("level 1 fits");

		assert_eq!(req.points_needed, BASE_POINTS);
		assert_eq!(req.games_needed, BASE_GAMES);
		assert_eq!(req.wins_needed, BASE_WINS);
		assert_eq!(req.achievements_needed, BASE_ACHIEVEMENTS);
		assert_eq!(curve.requirements(0), Some(req));
	}

	#[test]
	fn strictly_increasing()
	{
		let curve = LevelCurve::default();

		for level in 1..curve.max_level() {
			let current = curve.requirements(level).expect("below max level");
			let next = curve.requirements(level + 1).expect("at most max level");

			assert!(current.points_needed < next.points_needed, "points @ {level}");
			assert!(current.games_needed < next.games_needed, "games @ {level}");
			assert!(current.wins_needed < next.wins_needed, "wins @ {level}");
			assert!(current.achievements_needed < next.achievements_needed, "achievements @ {level}");
		}
	}

	#[test]
	fn exact_requirements_level_up()
	{
		let curve = LevelCurve::default();

		for level in 1..20 {
			let req = curve.requirements(level + 1).expect("level fits");
			let counters = UserCounters {
				points: req.points_needed,
				games_played: req.games_needed,
				games_won: req.wins_needed,
				completed_achievements: req.achievements_needed,
				level,
				..Default::default()
			};

			assert!(curve.can_level_up(&counters), "exact requirements @ {level}");
		}
	}

	#[test]
	fn level_up_is_conjunctive()
	{
		let curve = LevelCurve::default();
		let counters = UserCounters {
			points: 150,
			games_played: 7,
			games_won: 4,
			completed_achievements: 3,
			level: 1,
			achievements_xp: 0,
		};

		assert!(curve.can_level_up(&counters), "all requirements are met");
		assert!(
			!curve.can_level_up(&UserCounters { games_won: 3, ..counters }),
			"one win short",
		);

		let plenty = UserCounters {
			points: 1_000_000,
			games_played: 1_000,
			games_won: 1_000,
			completed_achievements: 2,
			level: 1,
			achievements_xp: 0,
		};

		assert!(!curve.can_level_up(&plenty), "one achievement short");
	}

	#[test]
	fn progress_breakdown()
	{
		let curve = LevelCurve::default();
		let counters = UserCounters {
			points: 75,
			games_played: 7,
			games_won: 1,
			completed_achievements: 0,
			level: 1,
			achievements_xp: 0,
		};

		assert_eq!(
			curve.progress(&counters),
			LevelProgress { points: 50, games: 100, wins: 25, achievements: 0, overall: 43 },
		);
	}

	#[test]
	fn progress_is_clamped()
	{
		let counters = UserCounters {
			points: u64::MAX,
			games_played: u64::MAX,
			games_won: u64::MAX,
			completed_achievements: u64::MAX,
			level: 1,
			achievements_xp: 0,
		};

		let progress = LevelCurve::default().progress(&counters);

		assert_eq!(progress.overall, 100);
		assert_eq!(progress.points, 100);
	}

	#[test]
	fn max_level_boundary()
	{
		let curve = LevelCurve::default();
		let max_level = curve.max_level();

		// 100 * 1.5^98 still fits into a u64, 100 * 1.5^99 does not
		assert_eq!(max_level, 99);
		assert!(curve.requirements(max_level).is_some(), "max level has requirements");
		assert_eq!(curve.requirements(max_level + 1), None);
		assert_eq!(curve.requirements(u32::MAX), None);

		let counters = UserCounters {
			points: u64::MAX,
			games_played: u64::MAX,
			games_won: u64::MAX,
			completed_achievements: u64::MAX,
			level: max_level,
			achievements_xp: 0,
		};

		assert!(!curve.can_level_up(&counters), "cannot level past the max level");
		assert!(
			curve.can_level_up(&UserCounters { level: max_level - 1, ..counters }),
			"the last level can still be reached",
		);
		assert_eq!(curve.progress(&counters).overall, 100);
	}

	#[test]
	fn validation()
	{
		assert_eq!(LevelCurve::default().validate(), Ok(()));

		let curve = LevelCurve { growth: 1.0, ..Default::default() };
		assert_eq!(curve.validate(), Err(ConfigurationError::InvalidGrowth { growth: 1.0 }));

		let curve = LevelCurve { growth: f64::NAN, ..Default::default() };
		assert!(curve.validate().is_err(), "NaN growth should be rejected");

		let curve = LevelCurve { base_achievements: 1, ..Default::default() };
		assert_eq!(
			curve.validate(),
			Err(ConfigurationError::BaseTooSmall { dimension: "achievements", base: 1, growth: 1.5 }),
		);

		let curve = LevelCurve { base_points: u64::MAX / 4 * 3, ..Default::default() };
		assert_eq!(curve.validate(), Err(ConfigurationError::CurveOverflows { growth: 1.5 }));
	}
}
