//! The composite score used for ranking users.

use serde::{Deserialize, Serialize};

use crate::{ConfigurationError, UserCounters};

/// Bonus score for every game won.
pub const WIN_BONUS: u64 = 25;

/// Bonus score for every game played.
pub const PLAY_BONUS: u64 = 10;

/// The score a user with a 100% win rate gets on top of everything else.
pub const WIN_RATE_SCALE: u64 = 20;

/// The weights that go into [`compute()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ScoreWeights
{
	/// Score per game won.
	pub win_bonus: u64,

	/// Score per game played.
	pub play_bonus: u64,

	/// Score for a perfect win rate; scaled linearly below that.
	pub win_rate_scale: u64,
}

impl Default for ScoreWeights
{
	fn default() -> Self
	{
		Self { win_bonus: WIN_BONUS, play_bonus: PLAY_BONUS, win_rate_scale: WIN_RATE_SCALE }
	}
}

impl ScoreWeights
{
	/// Makes sure playing another game can never lower a user's score.
	///
	/// Going from `n` to `n + 1` games played lowers the win-rate term by at most
	/// `ceil(win_rate_scale / 2)`, which the play bonus has to cover.
	pub fn validate(&self) -> Result<(), ConfigurationError>
	{
		if self.win_rate_scale > self.play_bonus.saturating_mul(2) {
			return Err(ConfigurationError::WinRateOutweighsPlayBonus {
				play_bonus: self.play_bonus,
				win_rate_scale: self.win_rate_scale,
			});
		}

		Ok(())
	}
}

/// Combines a user's counters into a single score.
///
/// `level`, `completed_achievements` and `achievements_xp` do not contribute.
pub fn compute(counters: &UserCounters, weights: &ScoreWeights) -> u64
{
	let win_rate = win_rate_bonus(counters.games_won, counters.games_played, weights.win_rate_scale);

	counters
		.points
		.saturating_add(counters.games_won.saturating_mul(weights.win_bonus))
		.saturating_add(counters.games_played.saturating_mul(weights.play_bonus))
		.saturating_add(win_rate)
}

/// `floor(won / played * scale)`, or 0 if nothing was played yet.
fn win_rate_bonus(games_won: u64, games_played: u64, scale: u64) -> u64
{
	if games_played == 0 {
		return 0;
	}

	let bonus = u128::from(games_won) * u128::from(scale) / u128::from(games_played);

	u64::try_from(bonus).unwrap_or(u64::MAX)
}
