//! The errors that can occur when configuring or using the calculator.

use thiserror::Error;

/// The calculator was configured with values it cannot work with.
///
/// These are fatal; a process should refuse to start with an invalid configuration rather than
/// handle them per call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError
{
	/// The rank table has no tiers.
	#[error("rank table cannot be empty")]
	EmptyRankTable,

	/// The lowest tier does not start at a score of 0.
	#[error("first rank tier `{id}` must start at 0, but starts at {min_score}")]
	FirstThresholdNotZero
	{
		/// The ID of the first tier.
		id: String,

		/// Its threshold.
		min_score: u64,
	},

	/// Two adjacent tiers are out of order, or share a threshold.
	#[error("rank tier `{id}` ({min_score}) must have a higher threshold than `{previous_id}` ({previous_min_score})")]
	UnsortedRankTable
	{
		/// The tier preceding the offending one.
		previous_id: String,

		/// The threshold of the preceding tier.
		previous_min_score: u64,

		/// The offending tier.
		id: String,

		/// The threshold of the offending tier.
		min_score: u64,
	},

	/// Two tiers share the same ID.
	#[error("rank tier id `{id}` appears more than once")]
	DuplicateRankId
	{
		/// The duplicated ID.
		id: String,
	},

	/// The level growth factor is not a finite number greater than 1.
	#[error("level growth factor must be a finite number greater than 1, got {growth}")]
	InvalidGrowth
	{
		/// The configured growth factor.
		growth: f64,
	},

	/// A level requirement base would not produce strictly increasing thresholds.
	#[error("base {dimension} requirement {base} is too small for growth factor {growth}")]
	BaseTooSmall
	{
		/// Which requirement dimension.
		dimension: &'static str,

		/// The configured base value.
		base: u64,

		/// The configured growth factor.
		growth: f64,
	},

	/// The level requirements stop fitting into a `u64` before level 2.
	#[error("level requirements with growth factor {growth} overflow before level 2")]
	CurveOverflows
	{
		/// The configured growth factor.
		growth: f64,
	},

	/// The win-rate bonus could make the score drop after playing another game.
	#[error("win rate scale {win_rate_scale} must not exceed twice the play bonus {play_bonus}")]
	WinRateOutweighsPlayBonus
	{
		/// The configured play bonus.
		play_bonus: u64,

		/// The configured win-rate scale.
		win_rate_scale: u64,
	},
}

/// A caller passed counters that violate their invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError
{
	/// More games were won than played.
	#[error("games won ({games_won}) cannot exceed games played ({games_played})")]
	WinsExceedGames
	{
		/// Games played.
		games_played: u64,

		/// Games won.
		games_won: u64,
	},

	/// Levels start at 1.
	#[error("level must be at least 1")]
	LevelZero,

	/// A stored level does not fit into a `u32`.
	#[error("level {level} is out of range")]
	LevelOutOfRange
	{
		/// The value that was rejected.
		level: u64,
	},

	/// A counter coming from an untyped source was negative.
	#[error("`{field}` cannot be negative (got {value})")]
	NegativeCounter
	{
		/// The name of the counter.
		field: &'static str,

		/// The value that was rejected.
		value: i64,
	},
}
