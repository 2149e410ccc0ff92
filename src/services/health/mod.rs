//! A very basic service that acts as a healthcheck.

use derive_more::Debug;
use sqlx::SqlitePool;

pub(crate) mod http;

/// A service that responds if the API is healthy.
#[derive(Debug, Clone)]
pub struct HealthService
{
	/// Connection pool to the database.
	#[debug(skip)]
	database: SqlitePool,
}

impl HealthService
{
	/// Create a new [`HealthService`].
	#[tracing::instrument(skip(database))]
	pub fn new(database: SqlitePool) -> Self
	{
		Self { database }
	}

	/// Makes sure the database is reachable.
	#[tracing::instrument(level = "debug", err(Debug, level = "debug"))]
	pub async fn check(&self) -> sqlx::Result<()>
	{
		sqlx::query("SELECT 1").execute(&self.database).await?;

		Ok(())
	}
}
