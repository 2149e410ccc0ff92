//! Database setup and helpers.

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use url::Url;

/// The migrations in `database/migrations`, embedded into the binary.
pub static MIGRATOR: Migrator = sqlx::migrate!("./database/migrations");

/// Errors that can occur while setting up the database.
#[derive(Debug, Error)]
pub enum InitializeDatabaseError
{
	/// We could not connect to the database.
	#[error("failed to connect to database: {0}")]
	Connect(#[from] sqlx::Error),

	/// We could not run migrations.
	#[error("failed to run migrations: {0}")]
	Migrate(#[from] MigrateError),
}

/// Connects to the database at `url` and runs any pending migrations.
#[tracing::instrument(skip(url), fields(url = %url), err(Debug))]
pub async fn connect(url: &Url, max_connections: u32) -> Result<SqlitePool, InitializeDatabaseError>
{
	let options = SqliteConnectOptions::from_str(url.as_str())?
		.create_if_missing(true)
		.foreign_keys(true)
		.journal_mode(SqliteJournalMode::Wal)
		.busy_timeout(Duration::from_secs(5));

	let pool = SqlitePoolOptions::new()
		.max_connections(max_connections.max(1))
		.connect_with(options)
		.await?;

	tracing::debug!("running migrations");

	MIGRATOR.run(&pool).await?;

	tracing::info!("connected to database");

	Ok(pool)
}

/// Extension trait for [`sqlx::Error`].
pub trait SqlErrorExt
{
	/// Checks whether this error is a unique constraint violation on `column`.
	///
	/// `column` is matched against SQLite's error message, which reads
	/// `UNIQUE constraint failed: <table>.<column>`.
	fn is_unique_violation_on(&self, column: &str) -> bool;
}

impl SqlErrorExt for sqlx::Error
{
	fn is_unique_violation_on(&self, column: &str) -> bool
	{
		self.as_database_error().is_some_and(|error| {
			error.is_unique_violation() && error.message().ends_with(&format!(".{column}"))
		})
	}
}
