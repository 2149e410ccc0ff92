//! This module contains helpers for unit/integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use color_eyre::eyre::WrapErr;
use serde::de::DeserializeOwned;
use sqlx::SqlitePool;
use wordquest_progression::ProgressionCalculator;

use crate::cache::TtlCache;
use crate::services::users::{RegisterUserRequest, UserID};
use crate::services::{
	AchievementService,
	GameService,
	ProgressionService,
	UserService,
};
use crate::State;

/// The per-game point cap used in tests.
pub const MAX_POINTS_PER_GAME: u64 = 1_000;

/// A calculator with the default configuration.
pub fn calculator() -> Arc<ProgressionCalculator>
{
	Arc::new(ProgressionCalculator::default())
}

pub fn user_svc(database: SqlitePool) -> UserService
{
	UserService::new(database, calculator(), TtlCache::new(Duration::from_secs(60), 64))
}

pub fn achievement_svc(database: SqlitePool) -> AchievementService
{
	AchievementService::new(database.clone(), user_svc(database))
}

pub fn progression_svc(database: SqlitePool) -> ProgressionService
{
	ProgressionService::new(calculator(), user_svc(database))
}

/// Builds a [`GameService`] whose dependencies share a single user service.
pub fn game_svc(database: SqlitePool) -> GameService
{
	let calculator = calculator();
	let user_svc = UserService::new(
		database.clone(),
		Arc::clone(&calculator),
		TtlCache::new(Duration::from_secs(60), 64),
	);

	let achievement_svc = AchievementService::new(database.clone(), user_svc.clone());
	let progression_svc = ProgressionService::new(calculator, user_svc.clone());

	GameService::new(database, user_svc, achievement_svc, progression_svc, MAX_POINTS_PER_GAME)
}

/// Builds the full application state.
pub fn state(database: SqlitePool) -> State
{
	use clap::Parser;

	let config = crate::Config::try_parse_from([
		"wordquest-api",
		"--database-url",
		"sqlite::memory:",
		"--max-points-per-game",
		"1000",
	])
	.expect("valid test config");

	State::from_parts(database, calculator(), &config)
}

/// Registers a user called `username` with a matching email address.
pub async fn register(svc: &UserService, username: &str) -> color_eyre::Result<UserID>
{
	let req = RegisterUserRequest {
		username: username.to_owned(),
		email: format!("{username}@example.org"),
	};

	let res = svc.register_user(req).await.wrap_err("register user")?;

	Ok(res.user_id)
}

/// Reads an HTTP body as JSON.
pub async fn parse_body<T>(body: Body) -> color_eyre::Result<T>
where
	T: DeserializeOwned,
{
	let bytes = axum::body::to_bytes(body, usize::MAX).await?;
	let value = serde_json::from_slice(&bytes)
		.wrap_err_with(|| format!("invalid body: {:?}", String::from_utf8_lossy(&bytes)))?;

	Ok(value)
}

/// Global constructor that will run before tests.
#[ctor::ctor]
fn ctor()
{
	use tracing_subscriber::fmt::format::FmtSpan;
	use tracing_subscriber::EnvFilter;

	color_eyre::install().expect("failed to install color-eyre");
	tracing_subscriber::fmt()
		.compact()
		.with_ansi(true)
		.with_file(true)
		.with_level(true)
		.with_line_number(true)
		.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
		.with_target(true)
		.with_test_writer()
		.with_thread_ids(true)
		.with_env_filter(EnvFilter::from_default_env())
		.init();
}

macro_rules! assert {
	($expr:expr $(, $($msg:tt)*)?) => {
		::color_eyre::eyre::ensure!($expr $(, $($msg)*)?)
	};
}

macro_rules! assert_eq {
	($lhs:expr, $rhs:expr $(, $($msg:tt)*)?) => {
		match (&$lhs, &$rhs) {
			(lhs, rhs) => {
				if lhs != rhs {
					::color_eyre::eyre::bail!(
						"assertion `{} == {}` failed{}\n  lhs: {:?}\n  rhs: {:?}",
						stringify!($lhs),
						stringify!($rhs),
						$crate::testing::context!($($($msg)*)?),
						lhs,
						rhs,
					);
				}
			}
		}
	};
}

/// Formats an optional assertion message.
macro_rules! context {
	() => {
		""
	};
	($($msg:tt)+) => {
		format_args!(": {}", format_args!($($msg)+))
	};
}

macro_rules! assert_matches {
	($expr:expr, $pat:pat $(if $cond:expr)? $(, $($msg:tt)*)?) => {
		::color_eyre::eyre::ensure!(matches!($expr, $pat $(if $cond)?) $(, $($msg)*)?)
	};
}

pub(crate) use {assert, assert_eq, assert_matches, context};
