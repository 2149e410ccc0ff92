use serde::Deserialize;

use crate::level::LevelCurve;
use crate::rank::{default_tiers, RankTier};
use crate::score::ScoreWeights;

/// Everything that can be tuned about the calculator.
///
/// Missing sections fall back to their defaults. Pass this to
/// [`ProgressionCalculator::new()`] to have it validated.
///
/// [`ProgressionCalculator::new()`]: crate::ProgressionCalculator::new
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProgressionConfig
{
	/// Rank tiers, lowest first.
	pub ranks: Vec<RankTier>,

	/// Composite score weights.
	pub score: ScoreWeights,

	/// Level requirement curve.
	pub levels: LevelCurve,
}

impl Default for ProgressionConfig
{
	fn default() -> Self
	{
		Self {
			ranks: default_tiers(),
			score: ScoreWeights::default(),
			levels: LevelCurve::default(),
		}
	}
}
