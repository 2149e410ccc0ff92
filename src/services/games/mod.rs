//! A service for recording finished games.
//!
//! Recording a game is the only operation that changes a user's progression.
//! Everything happens in a single transaction: the counters are incremented
//! atomically, newly satisfied achievements are unlocked, and the result of
//! the progression evaluation is written back before the game row itself is
//! inserted.

use chrono::Utc;
use derive_more::Debug;
use sqlx::SqlitePool;
use wordquest_progression::{non_negative, UserCounters};

use crate::services::achievements::UnlockedAchievement;
use crate::services::users::UserID;
use crate::services::{AchievementService, ProgressionService, UserService};

pub(crate) mod http;

mod error;
pub use error::{Error, Result};

mod models;
pub use models::{
	FetchGamesRequest,
	FetchGamesResponse,
	Game,
	GameID,
	GameKind,
	RecordGameRequest,
	RecordGameResponse,
};

/// A service for recording finished games.
#[derive(Debug, Clone)]
pub struct GameService
{
	/// Connection pool to the database.
	#[debug(skip)]
	database: SqlitePool,

	/// Owns the profile cache.
	user_svc: UserService,

	/// Unlocks achievements.
	achievement_svc: AchievementService,

	/// Evaluates progression.
	progression_svc: ProgressionService,

	/// The most points a single game can award.
	max_points_per_game: u64,
}

/// The counters as they are right after the increment.
#[derive(Debug, sqlx::FromRow)]
#[allow(clippy::missing_docs_in_private_items)]
struct CountersRow
{
	points: i64,
	games_played: i64,
	games_won: i64,
	level: i64,
	achievements_xp: i64,
	rank_id: String,
}

impl GameService
{
	/// Create a new [`GameService`].
	#[tracing::instrument(skip(database))]
	pub fn new(
		database: SqlitePool,
		user_svc: UserService,
		achievement_svc: AchievementService,
		progression_svc: ProgressionService,
		max_points_per_game: u64,
	) -> Self
	{
		Self { database, user_svc, achievement_svc, progression_svc, max_points_per_game }
	}

	/// Records a finished game and updates the user's progression.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn record_game(
		&self,
		user_id: UserID,
		req: RecordGameRequest,
	) -> Result<RecordGameResponse>
	{
		let points = non_negative("points", req.points)
			.map_err(|_| Error::NegativePoints { points: req.points })?;

		let points_awarded = points.min(self.max_points_per_game);
		let points_bound = i64::try_from(points_awarded).unwrap_or(i64::MAX);

		if points_awarded < points {
			tracing::debug!(points, points_awarded, "capped points");
		}

		let mut txn = self.database.begin().await?;

		let row = sqlx::query_as::<_, CountersRow>(
			r"
			UPDATE
			  Users
			SET
			  points = points + ?,
			  games_played = games_played + 1,
			  games_won = games_won + ?
			WHERE
			  id = ?
			RETURNING
			  points,
			  games_played,
			  games_won,
			  level,
			  achievements_xp,
			  rank_id
			",
		)
		.bind(points_bound)
		.bind(req.won)
		.bind(user_id)
		.fetch_optional(&mut *txn)
		.await?
		.ok_or(Error::UserDoesNotExist)?;

		let completed_achievements = sqlx::query_scalar::<_, i64>(
			r"
			SELECT
			  COUNT(*)
			FROM
			  UnlockedAchievements
			WHERE
			  user_id = ?
			",
		)
		.bind(user_id)
		.fetch_one(&mut *txn)
		.await?;

		let mut counters = UserCounters::from_signed(
			row.points,
			row.games_played,
			row.games_won,
			row.level,
			completed_achievements,
			row.achievements_xp,
		)?;

		let mut unlocked_achievements =
			self.achievement_svc.unlock_new(&mut txn, user_id, &counters).await?;

		credit_achievements(&mut counters, &unlocked_achievements);

		let progress = self.progression_svc.evaluate(&counters)?;

		// level achievements depend on the level we just reached
		if progress.level_up {
			counters.level = progress.new_level;

			let unlocked_by_level =
				self.achievement_svc.unlock_new(&mut txn, user_id, &counters).await?;

			credit_achievements(&mut counters, &unlocked_by_level);
			unlocked_achievements.extend(unlocked_by_level);
		}

		sqlx::query(
			r"
			UPDATE
			  Users
			SET
			  achievements_xp = ?,
			  level = ?,
			  rank_id = ?,
			  rank_progress = ?
			WHERE
			  id = ?
			",
		)
		.bind(i64::try_from(counters.achievements_xp).unwrap_or(i64::MAX))
		.bind(progress.new_level)
		.bind(&progress.rank_id)
		.bind(progress.rank_progress_percent)
		.bind(user_id)
		.execute(&mut *txn)
		.await?;

		let game_id = sqlx::query_scalar::<_, GameID>(
			r"
			INSERT INTO
			  Games (user_id, kind, points, won, created_on)
			VALUES
			  (?, ?, ?, ?, ?)
			RETURNING
			  id
			",
		)
		.bind(user_id)
		.bind(req.kind)
		.bind(points_bound)
		.bind(req.won)
		.bind(Utc::now())
		.fetch_one(&mut *txn)
		.await?;

		txn.commit().await?;

		self.user_svc.invalidate(user_id);

		let ranked_up = self.progression_svc.is_promotion(&row.rank_id, &progress.rank_id);
		let leveled_up = progress.level_up;

		tracing::info!(
			target: "wordquest_api::audit_log",
			%user_id,
			%game_id,
			points_awarded,
			rank = %progress.rank_id,
			level = progress.new_level,
			ranked_up,
			leveled_up,
			unlocked = unlocked_achievements.len(),
			"recorded game"
		);

		Ok(RecordGameResponse {
			game_id,
			points_awarded,
			progress,
			ranked_up,
			leveled_up,
			unlocked_achievements,
		})
	}

	/// Fetches a user's game history, newest first.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn fetch_games(
		&self,
		user_id: UserID,
		req: FetchGamesRequest,
	) -> Result<FetchGamesResponse>
	{
		let mut txn = self.database.begin().await?;

		let total = sqlx::query_scalar::<_, i64>(
			r"
			SELECT
			  games_played
			FROM
			  Users
			WHERE
			  id = ?
			",
		)
		.bind(user_id)
		.fetch_optional(&mut *txn)
		.await?
		.ok_or(Error::UserDoesNotExist)?;

		let games = sqlx::query_as::<_, Game>(
			r"
			SELECT
			  id,
			  kind,
			  points,
			  won,
			  created_on
			FROM
			  Games
			WHERE
			  user_id = ?
			ORDER BY
			  id DESC
			LIMIT
			  ? OFFSET ?
			",
		)
		.bind(user_id)
		.bind(req.limit.0)
		.bind(req.offset.0)
		.fetch_all(&mut *txn)
		.await?;

		txn.commit().await?;

		Ok(FetchGamesResponse { user_id, games, total: non_negative("games_played", total)? })
	}
}

/// Adds freshly unlocked achievements to `counters`.
fn credit_achievements(counters: &mut UserCounters, unlocked: &[UnlockedAchievement])
{
	let xp = unlocked.iter().map(|achievement| u64::from(achievement.xp)).sum::<u64>();
	let count = u64::try_from(unlocked.len()).unwrap_or(u64::MAX);

	counters.completed_achievements = counters.completed_achievements.saturating_add(count);
	counters.achievements_xp = counters.achievements_xp.saturating_add(xp);
}
