use serde::{Deserialize, Serialize};

use crate::level::{LevelCurve, LevelProgress, LevelRequirement};
use crate::rank::{RankTable, RankTier};
use crate::score::{self, ScoreWeights};
use crate::{ConfigurationError, ProgressionConfig, UserCounters, ValidationError};

/// The progression calculator.
///
/// This is a validated bundle of a [`RankTable`], [`ScoreWeights`] and a [`LevelCurve`]. It is
/// constructed once at startup and shared; it holds no per-user state.
#[derive(Debug, Clone, Default)]
pub struct ProgressionCalculator
{
	/// Rank tiers, lowest first.
	ranks: RankTable,

	/// Composite score weights.
	weights: ScoreWeights,

	/// Level requirement curve.
	levels: LevelCurve,
}

/// The outcome of [`ProgressionCalculator::evaluate()`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressResult
{
	/// ID of the rank the user qualifies for.
	pub rank_id: String,

	/// Name of the rank the user qualifies for.
	pub rank_name: String,

	/// The composite score the rank was derived from.
	pub score: u64,

	/// Progress towards the next rank.
	pub rank_progress_percent: u8,

	/// Whether the user should advance to the next level.
	pub level_up: bool,

	/// The level the user should be at after this evaluation.
	pub new_level: u32,

	/// Progress towards the next level, per requirement.
	///
	/// This is relative to the level the user was at *before* the evaluation.
	pub per_dimension_progress: LevelProgress,
}

impl ProgressionCalculator
{
	/// Validates `config` and creates a new calculator.
	pub fn new(config: ProgressionConfig) -> Result<Self, ConfigurationError>
	{
		let ProgressionConfig { ranks, score: weights, levels } = config;
		let ranks = RankTable::new(ranks)?;

		weights.validate()?;
		levels.validate()?;

		tracing::debug!(tiers = ranks.tiers().len(), ?weights, ?levels, "initialized progression calculator");

		Ok(Self { ranks, weights, levels })
	}

	/// The rank table.
	pub fn ranks(&self) -> &RankTable
	{
		&self.ranks
	}

	/// The score weights.
	pub fn weights(&self) -> &ScoreWeights
	{
		&self.weights
	}

	/// The level curve.
	pub fn levels(&self) -> &LevelCurve
	{
		&self.levels
	}

	/// See [`score::compute()`].
	pub fn score(&self, counters: &UserCounters) -> u64
	{
		score::compute(counters, &self.weights)
	}

	/// The rank tier for `score`.
	pub fn rank(&self, score: u64) -> &RankTier
	{
		self.ranks.resolve(score)
	}

	/// Progress from the tier for `score` to the next one.
	pub fn rank_progress(&self, score: u64) -> u8
	{
		self.ranks.progress(score)
	}

	/// See [`LevelCurve::requirements()`].
	pub fn level_requirements(&self, level: u32) -> Option<LevelRequirement>
	{
		self.levels.requirements(level)
	}

	/// See [`LevelCurve::can_level_up()`].
	pub fn can_level_up(&self, counters: &UserCounters) -> bool
	{
		self.levels.can_level_up(counters)
	}

	/// See [`LevelCurve::progress()`].
	pub fn level_progress(&self, counters: &UserCounters) -> LevelProgress
	{
		self.levels.progress(counters)
	}

	/// Runs every calculation for a user at once.
	///
	/// This advances at most one level; callers who want to chain level-ups evaluate again with
	/// the updated level.
	pub fn evaluate(&self, counters: &UserCounters) -> Result<ProgressResult, ValidationError>
	{
		counters.validate()?;

		let score = self.score(counters);
		let rank = self.rank(score);
		let level_up = self.can_level_up(counters);
		let new_level = if level_up { counters.level.saturating_add(1) } else { counters.level };

		if level_up {
			tracing::debug!(from = counters.level, to = new_level, "level up");
		}

		Ok(ProgressResult {
			rank_id: rank.id.clone(),
			rank_name: rank.name.clone(),
			score,
			rank_progress_percent: self.rank_progress(score),
			level_up,
			new_level,
			per_dimension_progress: self.level_progress(counters),
		})
	}
}
