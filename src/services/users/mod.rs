//! A service for managing users.
//!
//! Users are the subjects of progression: every counter the calculator looks
//! at lives on the user's row. Profiles are served through a [`TtlCache`],
//! which the game service invalidates whenever it changes a user's counters.

use std::sync::Arc;

use chrono::Utc;
use derive_more::Debug;
use itertools::Itertools;
use sqlx::SqlitePool;
use wordquest_progression::ProgressionCalculator;

use crate::cache::TtlCache;
use crate::database::SqlErrorExt;

pub(crate) mod http;
mod queries;

mod error;
pub use error::{Error, Result};

mod models;
pub use models::{
	FetchLeaderboardRequest,
	FetchLeaderboardResponse,
	LeaderboardEntry,
	RegisterUserRequest,
	RegisterUserResponse,
	UserID,
	UserProfile,
};

/// Usernames may not be longer than this.
const MAX_USERNAME_LEN: usize = 32;

/// Usernames may not be shorter than this.
const MIN_USERNAME_LEN: usize = 3;

/// A service for managing users.
#[derive(Debug, Clone)]
pub struct UserService
{
	/// Connection pool to the database.
	#[debug(skip)]
	database: SqlitePool,

	/// Used to determine the rank of freshly registered users.
	#[debug(skip)]
	calculator: Arc<ProgressionCalculator>,

	/// Recently fetched profiles.
	cache: TtlCache<UserID, UserProfile>,
}

impl UserService
{
	/// Create a new [`UserService`].
	#[tracing::instrument(skip(database, calculator))]
	pub fn new(
		database: SqlitePool,
		calculator: Arc<ProgressionCalculator>,
		cache: TtlCache<UserID, UserProfile>,
	) -> Self
	{
		Self { database, calculator, cache }
	}

	/// Registers a new user.
	///
	/// New users start at level 1, with the rank a score of 0 resolves to.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn register_user(&self, req: RegisterUserRequest) -> Result<RegisterUserResponse>
	{
		let username = validate_username(&req.username)?;
		let email = validate_email(&req.email)?;
		let rank = self.calculator.rank(0);
		let rank_progress = self.calculator.rank_progress(0);

		let user_id = sqlx::query_scalar::<_, UserID>(
			r"
			INSERT INTO
			  Users (username, email, level, rank_id, rank_progress, created_on)
			VALUES
			  (?, ?, 1, ?, ?, ?)
			RETURNING
			  id
			",
		)
		.bind(username)
		.bind(email)
		.bind(&rank.id)
		.bind(rank_progress)
		.bind(Utc::now())
		.fetch_one(&self.database)
		.await
		.map_err(|error| {
			if error.is_unique_violation_on("username") {
				Error::UsernameTaken
			} else if error.is_unique_violation_on("email") {
				Error::EmailTaken
			} else {
				Error::Database(error)
			}
		})?;

		tracing::info!(target: "wordquest_api::audit_log", %user_id, username, "registered user");

		Ok(RegisterUserResponse { user_id })
	}

	/// Fetches a user's profile.
	///
	/// This will return `Ok(None)` if the user was not found, but everything
	/// else went fine.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn fetch_user(&self, user_id: UserID) -> Result<Option<UserProfile>>
	{
		if let Some(profile) = self.cache.get(&user_id) {
			tracing::trace!("cache hit");
			return Ok(Some(profile));
		}

		let generation = self.cache.generation();
		let Some(row) = sqlx::query_as::<_, queries::UserRow>(&format!(
			r"
			{}
			WHERE
			  u.id = ?
			",
			queries::SELECT,
		))
		.bind(user_id)
		.fetch_optional(&self.database)
		.await?
		else {
			return Ok(None);
		};

		let profile = row.into_profile(&self.calculator)?;

		if !self.cache.insert(user_id, profile.clone(), generation) {
			tracing::debug!("profile changed while loading; not caching it");
		}

		Ok(Some(profile))
	}

	/// Fetches the leaderboard.
	///
	/// Users are ordered by points, highest first. Ties are broken by
	/// registration order.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn fetch_leaderboard(
		&self,
		req: FetchLeaderboardRequest,
	) -> Result<FetchLeaderboardResponse>
	{
		let mut txn = self.database.begin().await?;

		let rows = sqlx::query_as::<_, queries::LeaderboardRow>(
			r"
			SELECT
			  id user_id,
			  username,
			  points,
			  level,
			  rank_id
			FROM
			  Users
			ORDER BY
			  points DESC,
			  id ASC
			LIMIT
			  ? OFFSET ?
			",
		)
		.bind(req.limit.0)
		.bind(req.offset.0)
		.fetch_all(&mut *txn)
		.await?;

		let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM Users")
			.fetch_one(&mut *txn)
			.await?;

		txn.commit().await?;

		let first_position = u64::from(req.offset.0) + 1;
		let entries = rows
			.into_iter()
			.zip(first_position..)
			.map(|(row, position)| row.into_entry(position))
			.try_collect()?;

		Ok(FetchLeaderboardResponse { entries, total: total.unsigned_abs() })
	}

	/// Drops a user's cached profile.
	///
	/// Must be called after every change to the user's row.
	pub fn invalidate(&self, user_id: UserID)
	{
		self.cache.invalidate(&user_id);
	}
}

/// Checks a requested username and returns it without surrounding whitespace.
fn validate_username(username: &str) -> Result<&str>
{
	let username = username.trim();
	let len = username.chars().count();

	if len < MIN_USERNAME_LEN {
		return Err(Error::InvalidUsername { reason: "must be at least 3 characters long" });
	}

	if len > MAX_USERNAME_LEN {
		return Err(Error::InvalidUsername { reason: "must be at most 32 characters long" });
	}

	if !username.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
		return Err(Error::InvalidUsername {
			reason: "may only contain letters, digits, `_` and `-`",
		});
	}

	Ok(username)
}

/// Checks that an email address at least looks like one.
fn validate_email(email: &str) -> Result<&str>
{
	let email = email.trim();

	let Some((local, domain)) = email.split_once('@') else {
		return Err(Error::InvalidEmail);
	};

	let well_formed = !local.is_empty()
		&& !domain.contains('@')
		&& domain.contains('.')
		&& !domain.starts_with('.')
		&& !domain.ends_with('.')
		&& !email.chars().any(char::is_whitespace);

	if !well_formed {
		return Err(Error::InvalidEmail);
	}

	Ok(email)
}

#[cfg(test)]
mod tests
{
	use color_eyre::eyre::OptionExt;
	use sqlx::SqlitePool;
	use wordquest_progression::ValidationError;

	use super::*;
	use crate::testing;

	#[test]
	fn username_validation()
	{
		assert_eq!(validate_username("  alice  ").ok(), Some("alice"), "trimmed");
		assert!(validate_username("al").is_err(), "too short");
		assert!(validate_username(&"a".repeat(33)).is_err(), "too long");
		assert!(validate_username("bob smith").is_err(), "whitespace");
		assert!(validate_username("bob_smith-2").is_ok(), "allowed punctuation");
	}

	#[test]
	fn email_validation()
	{
		assert!(validate_email("alice@example.org").is_ok(), "plain address");
		assert!(validate_email("alice").is_err(), "missing @");
		assert!(validate_email("@example.org").is_err(), "missing local part");
		assert!(validate_email("alice@localhost").is_err(), "missing dot");
		assert!(validate_email("alice@@example.org").is_err(), "double @");
		assert!(validate_email("al ice@example.org").is_err(), "whitespace");
	}

	#[sqlx::test(migrations = "database/migrations")]
	async fn register_and_fetch(database: SqlitePool) -> color_eyre::Result<()>
	{
		let svc = testing::user_svc(database);
		let req = RegisterUserRequest {
			username: String::from("alice"),
			email: String::from("alice@example.org"),
		};

		let RegisterUserResponse { user_id } = svc.register_user(req).await?;
		let profile = svc.fetch_user(user_id).await?.ok_or_eyre("user should exist")?;

		testing::assert_eq!(profile.username, "alice");
		testing::assert_eq!(profile.counters.level, 1);
		testing::assert_eq!(profile.counters.points, 0);
		testing::assert_eq!(profile.rank_id, "novice");
		testing::assert_eq!(profile.rank_name, "Novice");
		testing::assert_eq!(profile.rank_progress, 0);

		Ok(())
	}

	#[sqlx::test(migrations = "database/migrations")]
	async fn duplicate_registration(database: SqlitePool) -> color_eyre::Result<()>
	{
		let svc = testing::user_svc(database);

		testing::register(&svc, "alice").await?;

		let same_name = svc
			.register_user(RegisterUserRequest {
				username: String::from("ALICE"),
				email: String::from("someone@example.org"),
			})
			.await;

		testing::assert_matches!(same_name, Err(Error::UsernameTaken));

		let same_email = svc
			.register_user(RegisterUserRequest {
				username: String::from("bob"),
				email: String::from("alice@example.org"),
			})
			.await;

		testing::assert_matches!(same_email, Err(Error::EmailTaken));

		Ok(())
	}

	#[sqlx::test(migrations = "database/migrations")]
	async fn fetch_unknown_user(database: SqlitePool) -> color_eyre::Result<()>
	{
		let svc = testing::user_svc(database);
		let profile = svc.fetch_user(UserID(404)).await?;

		testing::assert!(profile.is_none());

		Ok(())
	}

	#[sqlx::test(migrations = "database/migrations")]
	async fn cached_profiles_are_invalidated(database: SqlitePool) -> color_eyre::Result<()>
	{
		let svc = testing::user_svc(database.clone());
		let user_id = testing::register(&svc, "alice").await?;

		testing::assert!(svc.fetch_user(user_id).await?.is_some());

		sqlx::query("UPDATE Users SET points = 42 WHERE id = ?")
			.bind(user_id)
			.execute(&database)
			.await?;

		let stale = svc.fetch_user(user_id).await?.map(|profile| profile.counters.points);

		testing::assert_eq!(stale, Some(0), "profile should be served from the cache");

		svc.invalidate(user_id);

		let fresh = svc.fetch_user(user_id).await?.map(|profile| profile.counters.points);

		testing::assert_eq!(fresh, Some(42));

		Ok(())
	}

	#[sqlx::test(migrations = "database/migrations")]
	async fn leaderboard_order(database: SqlitePool) -> color_eyre::Result<()>
	{
		let svc = testing::user_svc(database.clone());
		let alice = testing::register(&svc, "alice").await?;
		let bob = testing::register(&svc, "bob").await?;
		let carol = testing::register(&svc, "carol").await?;

		for (user_id, points) in [(alice, 100), (bob, 300), (carol, 100)] {
			sqlx::query("UPDATE Users SET points = ? WHERE id = ?")
				.bind(points)
				.bind(user_id)
				.execute(&database)
				.await?;
		}

		let res = svc.fetch_leaderboard(FetchLeaderboardRequest::default()).await?;
		let order = res.entries.iter().map(|entry| entry.user_id).collect_vec();

		testing::assert_eq!(res.total, 3);
		testing::assert_eq!(order, [bob, alice, carol]);
		testing::assert_eq!(res.entries[0].position, 1);

		let req = FetchLeaderboardRequest { offset: crate::params::Offset(1), ..Default::default() };
		let res = svc.fetch_leaderboard(req).await?;

		testing::assert_eq!(res.entries.len(), 2);
		testing::assert_eq!(res.entries[0].user_id, alice);
		testing::assert_eq!(res.entries[0].position, 2);

		Ok(())
	}

	#[sqlx::test(migrations = "database/migrations")]
	async fn out_of_range_level_is_not_clamped(database: SqlitePool) -> color_eyre::Result<()>
	{
		let svc = testing::user_svc(database.clone());
		let user_id = testing::register(&svc, "alice").await?;
		let level = i64::from(u32::MAX) + 1;

		sqlx::query("UPDATE Users SET level = ? WHERE id = ?")
			.bind(level)
			.bind(user_id)
			.execute(&database)
			.await?;

		let leaderboard = svc.fetch_leaderboard(FetchLeaderboardRequest::default()).await;

		testing::assert_matches!(
			leaderboard,
			Err(Error::CorruptCounters(ValidationError::LevelOutOfRange { level: 4_294_967_296 }))
		);

		let profile = svc.fetch_user(user_id).await;

		testing::assert_matches!(
			profile,
			Err(Error::CorruptCounters(ValidationError::LevelOutOfRange { .. }))
		);

		Ok(())
	}
}
