//! The API's application state.
//!
//! Everything in here is constructed once on startup and then handed to the
//! HTTP router.

use std::sync::Arc;

use derive_more::Debug;
use sqlx::SqlitePool;
use thiserror::Error;
use wordquest_progression::{ConfigurationError, ProgressionCalculator};

use crate::cache::TtlCache;
use crate::config::LoadProgressionConfigError;
use crate::database::{self, InitializeDatabaseError};
use crate::services::{
	AchievementService,
	GameService,
	HealthService,
	ProgressionService,
	UserService,
};
use crate::Config;

/// Errors that can occur while initializing the [`State`].
#[derive(Debug, Error)]
pub enum InitializeStateError
{
	/// We could not set up the database.
	#[error(transparent)]
	Database(#[from] InitializeDatabaseError),

	/// We could not load the progression configuration.
	#[error(transparent)]
	LoadProgressionConfig(#[from] LoadProgressionConfigError),

	/// The progression configuration is invalid.
	#[error("invalid progression configuration: {0}")]
	InvalidProgressionConfig(#[from] ConfigurationError),
}

/// The API's application state.
#[derive(Debug, Clone)]
pub struct State
{
	/// Connection pool to the database.
	#[debug(skip)]
	pub database: SqlitePool,

	/// The progression calculator shared by every service.
	pub calculator: Arc<ProgressionCalculator>,

	/// Healthchecks.
	pub health_svc: HealthService,

	/// Users.
	pub user_svc: UserService,

	/// Achievements.
	pub achievement_svc: AchievementService,

	/// Ranks and levels.
	pub progression_svc: ProgressionService,

	/// Game recording.
	pub game_svc: GameService,
}

impl State
{
	/// Connects to the database and builds every service.
	#[tracing::instrument(skip(config), err(Debug))]
	pub async fn new(config: &Config) -> Result<Self, InitializeStateError>
	{
		let calculator = ProgressionCalculator::new(config.progression()?).map(Arc::new)?;
		let database = database::connect(&config.database_url, config.max_connections).await?;

		Ok(Self::from_parts(database, calculator, config))
	}

	/// Builds every service on top of an existing pool and calculator.
	pub fn from_parts(
		database: SqlitePool,
		calculator: Arc<ProgressionCalculator>,
		config: &Config,
	) -> Self
	{
		let cache = TtlCache::new(config.cache_ttl, config.cache_capacity);
		let health_svc = HealthService::new(database.clone());
		let user_svc = UserService::new(database.clone(), Arc::clone(&calculator), cache);
		let achievement_svc = AchievementService::new(database.clone(), user_svc.clone());
		let progression_svc = ProgressionService::new(Arc::clone(&calculator), user_svc.clone());
		let game_svc = GameService::new(
			database.clone(),
			user_svc.clone(),
			achievement_svc.clone(),
			progression_svc.clone(),
			config.max_points_per_game,
		);

		Self {
			database,
			calculator,
			health_svc,
			user_svc,
			achievement_svc,
			progression_svc,
			game_svc,
		}
	}
}
