//! A service for tracking achievements.
//!
//! The catalog is static. Unlocks are recorded in the database while a game is
//! being recorded, in the same transaction that updates the user's counters.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use derive_more::Debug;
use sqlx::{SqliteConnection, SqlitePool};
use wordquest_progression::UserCounters;

use crate::services::users::{UserID, UserService};

pub(crate) mod http;

mod error;
pub use error::{Error, Result};

mod models;
pub use models::{
	find,
	Achievement,
	AchievementProgress,
	FetchAchievementsResponse,
	Metric,
	UnlockedAchievement,
	CATALOG,
};

/// A service for tracking achievements.
#[derive(Debug, Clone)]
pub struct AchievementService
{
	/// Connection pool to the database.
	#[debug(skip)]
	database: SqlitePool,

	/// Used for reading counters.
	user_svc: UserService,
}

impl AchievementService
{
	/// Create a new [`AchievementService`].
	#[tracing::instrument(skip(database))]
	pub fn new(database: SqlitePool, user_svc: UserService) -> Self
	{
		Self { database, user_svc }
	}

	/// Every achievement there is.
	pub fn catalog(&self) -> &'static [Achievement]
	{
		CATALOG
	}

	/// Fetches a user's progress towards every achievement.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn fetch_progress(&self, user_id: UserID) -> Result<FetchAchievementsResponse>
	{
		let profile = self.user_svc.fetch_user(user_id).await?.ok_or(Error::UserDoesNotExist)?;

		let unlocked_on = sqlx::query_as::<_, (String, DateTime<Utc>)>(
			r"
			SELECT
			  achievement_id,
			  unlocked_on
			FROM
			  UnlockedAchievements
			WHERE
			  user_id = ?
			",
		)
		.bind(user_id)
		.fetch_all(&self.database)
		.await?
		.into_iter()
		.collect::<HashMap<_, _>>();

		let achievements = CATALOG
			.iter()
			.map(|achievement| AchievementProgress {
				id: achievement.id.to_owned(),
				name: achievement.name.to_owned(),
				metric: achievement.metric,
				current: achievement.metric.current(&profile.counters),
				target: achievement.target,
				percent: achievement.percent(&profile.counters),
				unlocked_on: unlocked_on.get(achievement.id).copied(),
			})
			.collect();

		Ok(FetchAchievementsResponse {
			user_id,
			unlocked: profile.counters.completed_achievements,
			achievements,
		})
	}

	/// Records every achievement `counters` satisfy that the user has not
	/// unlocked yet, and returns them.
	///
	/// `conn` is expected to be inside the transaction that produced
	/// `counters`.
	#[tracing::instrument(level = "debug", skip(self, conn), err(Debug, level = "debug"))]
	pub async fn unlock_new(
		&self,
		conn: &mut SqliteConnection,
		user_id: UserID,
		counters: &UserCounters,
	) -> sqlx::Result<Vec<UnlockedAchievement>>
	{
		let already_unlocked = sqlx::query_scalar::<_, String>(
			r"
			SELECT
			  achievement_id
			FROM
			  UnlockedAchievements
			WHERE
			  user_id = ?
			",
		)
		.bind(user_id)
		.fetch_all(&mut *conn)
		.await?;

		let now = Utc::now();
		let mut unlocked = Vec::new();

		for achievement in CATALOG.iter().filter(|achievement| {
			achievement.is_satisfied_by(counters)
				&& !already_unlocked.iter().any(|id| id == achievement.id)
		}) {
			let result = sqlx::query(
				r"
				INSERT INTO
				  UnlockedAchievements (user_id, achievement_id, xp, unlocked_on)
				VALUES
				  (?, ?, ?, ?)
				ON CONFLICT DO NOTHING
				",
			)
			.bind(user_id)
			.bind(achievement.id)
			.bind(achievement.xp)
			.bind(now)
			.execute(&mut *conn)
			.await?;

			if result.rows_affected() == 0 {
				continue;
			}

			tracing::info!(
				target: "wordquest_api::audit_log",
				%user_id,
				achievement = achievement.id,
				"unlocked achievement"
			);

			unlocked.push(UnlockedAchievement::from(achievement));
		}

		Ok(unlocked)
	}
}
