//! A service exposing the progression calculator.
//!
//! It does not store anything itself. Evaluations always run against the
//! counters the user service hands out.

use std::sync::Arc;

use derive_more::Debug;
use wordquest_progression::{ProgressResult, ProgressionCalculator, RankTier, UserCounters};

use crate::services::users::{UserID, UserService};

pub(crate) mod http;

mod error;
pub use error::{Error, Result};

mod models;
pub use models::FetchProgressResponse;

/// A service exposing the progression calculator.
#[derive(Debug, Clone)]
pub struct ProgressionService
{
	/// The calculator every evaluation goes through.
	#[debug(skip)]
	calculator: Arc<ProgressionCalculator>,

	/// Used for reading counters.
	user_svc: UserService,
}

impl ProgressionService
{
	/// Create a new [`ProgressionService`].
	#[tracing::instrument(skip(calculator))]
	pub fn new(calculator: Arc<ProgressionCalculator>, user_svc: UserService) -> Self
	{
		Self { calculator, user_svc }
	}

	/// The configured rank tiers, lowest first.
	pub fn rank_table(&self) -> &[RankTier]
	{
		self.calculator.ranks().tiers()
	}

	/// Whether moving from `old` to `new` is a promotion.
	pub fn is_promotion(&self, old: &str, new: &str) -> bool
	{
		self.calculator.ranks().is_promotion(old, new)
	}

	/// Evaluates a set of counters.
	pub fn evaluate(&self, counters: &UserCounters) -> Result<ProgressResult>
	{
		let result = self.calculator.evaluate(counters)?;

		Ok(result)
	}

	/// Evaluates a user's current counters.
	///
	/// Nothing is persisted; this is a read-only view of where the user stands.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn fetch_progress(&self, user_id: UserID) -> Result<FetchProgressResponse>
	{
		let profile = self.user_svc.fetch_user(user_id).await?.ok_or(Error::UserDoesNotExist)?;
		let counters = profile.counters;
		let progress = self.evaluate(&counters)?;
		let next_level = self.calculator.level_requirements(counters.level.saturating_add(1));

		Ok(FetchProgressResponse { user_id, level: counters.level, progress, next_level })
	}
}

#[cfg(test)]
mod tests
{
	use color_eyre::eyre::OptionExt;
	use sqlx::SqlitePool;

	use super::*;
	use crate::testing;

	#[sqlx::test(migrations = "database/migrations")]
	async fn fresh_user(database: SqlitePool) -> color_eyre::Result<()>
	{
		let user_svc = testing::user_svc(database.clone());
		let svc = testing::progression_svc(database);
		let user_id = testing::register(&user_svc, "alice").await?;
		let res = svc.fetch_progress(user_id).await?;

		testing::assert_eq!(res.level, 1);
		testing::assert_eq!(res.progress.rank_id, "novice");
		testing::assert_eq!(res.progress.score, 0);
		testing::assert_eq!(res.progress.rank_progress_percent, 0);
		testing::assert!(!res.progress.level_up);

		let next_level = res.next_level.ok_or_eyre("level 2 has requirements")?;

		testing::assert_eq!(next_level.points_needed, 150);
		testing::assert_eq!(next_level.games_needed, 7);

		Ok(())
	}

	#[sqlx::test(migrations = "database/migrations")]
	async fn does_not_persist(database: SqlitePool) -> color_eyre::Result<()>
	{
		let user_svc = testing::user_svc(database.clone());
		let svc = testing::progression_svc(database.clone());
		let user_id = testing::register(&user_svc, "alice").await?;

		sqlx::query("UPDATE Users SET points = 600 WHERE id = ?")
			.bind(user_id)
			.execute(&database)
			.await?;

		let res = svc.fetch_progress(user_id).await?;

		testing::assert_eq!(res.progress.rank_id, "apprentice");

		let stored = sqlx::query_scalar::<_, String>("SELECT rank_id FROM Users WHERE id = ?")
			.bind(user_id)
			.fetch_one(&database)
			.await?;

		testing::assert_eq!(stored, "novice");

		Ok(())
	}

	#[sqlx::test(migrations = "database/migrations")]
	async fn unknown_user(database: SqlitePool) -> color_eyre::Result<()>
	{
		let svc = testing::progression_svc(database);
		let res = svc.fetch_progress(UserID(9)).await;

		testing::assert_matches!(res, Err(Error::UserDoesNotExist));

		Ok(())
	}

	#[test]
	fn rank_table_is_sorted()
	{
		let calculator = testing::calculator();
		let thresholds =
			calculator.ranks().tiers().iter().map(|tier| tier.min_score).collect::<Vec<_>>();

		assert!(thresholds.windows(2).all(|pair| pair[0] < pair[1]), "{thresholds:?}");
	}
}
