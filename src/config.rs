//! This module contains the [`Config`] struct, the set of options the API
//! reads on startup.
//!
//! Every option can be passed as a CLI flag or through the environment. See the
//! `.env.example` file in the root of the repository for all the relevant
//! variables and example values.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fmt, fs, io};

use thiserror::Error;
use url::Url;
use wordquest_progression::ProgressionConfig;

/// The API's runtime configuration.
#[derive(Clone, clap::Parser)]
pub struct Config
{
	/// The address the HTTP server will listen on.
	#[arg(long, env = "WORDQUEST_API_ADDR", default_value = "127.0.0.1:42069")]
	pub addr: SocketAddr,

	/// Database connection URL.
	#[arg(long, env)]
	pub database_url: Url,

	/// Maximum amount of pooled database connections.
	#[arg(long, env = "WORDQUEST_DATABASE_MAX_CONNECTIONS", default_value_t = 8)]
	pub max_connections: u32,

	/// Path to a TOML file describing ranks, score weights and the level curve.
	///
	/// Built-in defaults are used if this is not specified.
	#[arg(long, env = "WORDQUEST_PROGRESSION_CONFIG")]
	pub progression_config: Option<PathBuf>,

	/// How long user profiles stay cached, in seconds.
	#[arg(long, env = "WORDQUEST_CACHE_TTL", default_value = "30", value_parser = parse_seconds)]
	pub cache_ttl: Duration,

	/// Maximum amount of cached user profiles. `0` disables the cache.
	#[arg(long, env = "WORDQUEST_CACHE_CAPACITY", default_value_t = 1024)]
	pub cache_capacity: usize,

	/// The most points a single game can award.
	#[arg(long, env = "WORDQUEST_MAX_POINTS_PER_GAME", default_value_t = 1000)]
	pub max_points_per_game: u64,

	/// Directory to write rolling log files into.
	#[arg(long, env = "WORDQUEST_LOG_DIR")]
	pub log_dir: Option<PathBuf>,
}

impl Config
{
	/// Loads the progression configuration.
	///
	/// Returns the defaults if no file was specified.
	#[tracing::instrument(level = "debug", skip(self), err(Debug))]
	pub fn progression(&self) -> Result<ProgressionConfig, LoadProgressionConfigError>
	{
		match self.progression_config.as_deref() {
			None => Ok(ProgressionConfig::default()),
			Some(path) => load_progression_config(path),
		}
	}
}

impl fmt::Debug for Config
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_struct("Config")
			.field("addr", &format_args!("{}", self.addr))
			.field("database_url", &format_args!("{:?}", self.database_url.as_str()))
			.field("max_connections", &self.max_connections)
			.field("progression_config", &self.progression_config)
			.field("cache_ttl", &self.cache_ttl)
			.field("cache_capacity", &self.cache_capacity)
			.field("max_points_per_game", &self.max_points_per_game)
			.field("log_dir", &self.log_dir)
			.finish()
	}
}

/// Errors that can occur while loading the progression configuration.
#[derive(Debug, Error)]
pub enum LoadProgressionConfigError
{
	/// The file could not be read.
	#[error("failed to read `{}`: {source}", path.display())]
	Read
	{
		/// The file we tried to read.
		path: PathBuf,

		/// The underlying I/O error.
		source: io::Error,
	},

	/// The file did not contain a valid configuration.
	#[error("failed to parse `{}`: {source}", path.display())]
	Parse
	{
		/// The file we tried to parse.
		path: PathBuf,

		/// The underlying TOML error.
		source: toml::de::Error,
	},
}

/// Reads and parses a progression configuration file.
fn load_progression_config(path: &Path) -> Result<ProgressionConfig, LoadProgressionConfigError>
{
	let text = fs::read_to_string(path)
		.map_err(|source| LoadProgressionConfigError::Read { path: path.to_owned(), source })?;

	toml::from_str(&text)
		.map_err(|source| LoadProgressionConfigError::Parse { path: path.to_owned(), source })
}

/// Parses a whole number of seconds.
fn parse_seconds(value: &str) -> Result<Duration, std::num::ParseIntError>
{
	value.parse().map(Duration::from_secs)
}
