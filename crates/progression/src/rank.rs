//! Rank tiers and how scores map onto them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

/// A single rank tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RankTier
{
	/// Stable identifier, stored alongside users.
	pub id: String,

	/// Human-readable name.
	pub name: String,

	/// The minimum composite score required for this tier.
	pub min_score: u64,
}

impl RankTier
{
	/// Creates a new [`RankTier`].
	pub fn new<I, N>(id: I, name: N, min_score: u64) -> Self
	where
		I: Into<String>,
		N: Into<String>,
	{
		Self { id: id.into(), name: name.into(), min_score }
	}
}

/// The tiers used if nothing else is configured.
pub fn default_tiers() -> Vec<RankTier>
{
	[
		("novice", "Novice", 0),
		("apprentice", "Apprentice", 500),
		("explorer", "Explorer", 1_500),
		("scholar", "Scholar", 3_500),
		("linguist", "Linguist", 7_000),
		("wordsmith", "Wordsmith", 12_000),
		("polyglot", "Polyglot", 20_000),
	]
	.into_iter()
	.map(|(id, name, min_score)| RankTier::new(id, name, min_score))
	.collect()
}

/// Returns the highest tier whose threshold is `<= score`.
///
/// `tiers` must be sorted by threshold. If `score` is below every threshold, the first tier is
/// returned.
pub fn resolve(score: u64, tiers: &[RankTier]) -> Result<&RankTier, ConfigurationError>
{
	position(score, tiers)
		.and_then(|idx| tiers.get(idx))
		.ok_or(ConfigurationError::EmptyRankTable)
}

/// Returns how far `score` has come from the current tier to the next one, in percent.
///
/// Users in the top tier are always at 100%.
pub fn progress(score: u64, tiers: &[RankTier]) -> Result<u8, ConfigurationError>
{
	let idx = position(score, tiers).ok_or(ConfigurationError::EmptyRankTable)?;
	let (Some(current), Some(next)) = (tiers.get(idx), tiers.get(idx + 1)) else {
		return Ok(100);
	};

	let span = next.min_score.saturating_sub(current.min_score);

	if span == 0 {
		return Ok(100);
	}

	let gained = score.saturating_sub(current.min_score);

	Ok(percent(gained, span))
}

/// `clamp(floor(part / whole * 100), 0, 100)` with `whole > 0`.
pub(crate) fn percent(part: u64, whole: u64) -> u8
{
	let percent = (u128::from(part) * 100 / u128::from(whole)).min(100);

	u8::try_from(percent).unwrap_or(100)
}

/// Index of the highest qualifying tier, falling back to 0; `None` if `tiers` is empty.
fn position(score: u64, tiers: &[RankTier]) -> Option<usize>
{
	if tiers.is_empty() {
		return None;
	}

	Some(tiers.partition_point(|tier| tier.min_score <= score).saturating_sub(1))
}

/// A validated, non-empty rank table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankTable
{
	/// Sorted by threshold, starting at 0.
	tiers: Vec<RankTier>,
}

impl Default for RankTable
{
	fn default() -> Self
	{
		Self { tiers: default_tiers() }
	}
}

impl RankTable
{
	/// Validates `tiers` and wraps them in a [`RankTable`].
	///
	/// The table must start at 0, strictly increase, and use every ID only once.
	pub fn new(tiers: Vec<RankTier>) -> Result<Self, ConfigurationError>
	{
		let first = tiers.first().ok_or(ConfigurationError::EmptyRankTable)?;

		if first.min_score != 0 {
			return Err(ConfigurationError::FirstThresholdNotZero {
				id: first.id.clone(),
				min_score: first.min_score,
			});
		}

		for pair in tiers.windows(2) {
			let [previous, tier] = pair else {
				continue;
			};

			if tier.min_score <= previous.min_score {
				return Err(ConfigurationError::UnsortedRankTable {
					previous_id: previous.id.clone(),
					previous_min_score: previous.min_score,
					id: tier.id.clone(),
					min_score: tier.min_score,
				});
			}
		}

		let mut seen = HashSet::with_capacity(tiers.len());

		if let Some(duplicate) = tiers.iter().find(|tier| !seen.insert(tier.id.as_str())) {
			return Err(ConfigurationError::DuplicateRankId { id: duplicate.id.clone() });
		}

		Ok(Self { tiers })
	}

	/// All tiers, lowest first.
	pub fn tiers(&self) -> &[RankTier]
	{
		&self.tiers
	}

	/// Looks up a tier by its ID.
	pub fn get(&self, id: &str) -> Option<&RankTier>
	{
		self.tiers.iter().find(|tier| tier.id == id)
	}

	/// See [`resolve()`].
	pub fn resolve(&self, score: u64) -> &RankTier
	{
		let idx = self
			.tiers
			.partition_point(|tier| tier.min_score <= score)
			.saturating_sub(1);

		match self.tiers.get(idx) {
			Some(tier) => tier,
			None => unreachable!("rank tables are never empty"),
		}
	}

	/// See [`progress()`].
	pub fn progress(&self, score: u64) -> u8
	{
		progress(score, &self.tiers).unwrap_or(100)
	}

	/// Whether `new` is a higher tier than `old`.
	///
	/// Unknown IDs rank below everything.
	pub fn is_promotion(&self, old: &str, new: &str) -> bool
	{
		let idx = |id: &str| self.tiers.iter().position(|tier| tier.id == id);

		match (idx(old), idx(new)) {
			(Some(old), Some(new)) => new > old,
			(None, Some(_)) => true,
			(_, None) => false,
		}
	}
}
