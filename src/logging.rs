//! Trace capturing facilities.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used if `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "wordquest_api=info,wordquest_progression=info,tower_http=info,warn";

/// Keeps the file logger's background thread alive.
#[derive(Debug)]
pub struct Guard
{
	/// The guard returned by [`tracing_appender`]'s logging thread.
	#[allow(dead_code)]
	appender_guard: WorkerGuard,
}

/// Initializes [`tracing_subscriber`].
///
/// Logs are always emitted to stderr. If `log_dir` is specified, they are also
/// written to daily rotated files in that directory, and the returned
/// [`Guard`] has to stay alive until the program exits.
pub fn init(log_dir: Option<&Path>) -> anyhow::Result<Option<Guard>>
{
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

	let stderr = tracing_subscriber::fmt::layer()
		.pretty()
		.with_file(true)
		.with_level(true)
		.with_line_number(true)
		.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
		.with_target(true)
		.with_thread_ids(true)
		.with_writer(std::io::stderr);

	let (files, guard) = match log_dir {
		None => (None, None),
		Some(log_dir) => {
			fs::create_dir_all(log_dir).context("create log dir")?;

			let (writer, appender_guard) = tracing_appender::rolling::Builder::new()
				.rotation(Rotation::DAILY)
				.filename_prefix("wordquest-api")
				.filename_suffix("log")
				.build(log_dir)
				.map(tracing_appender::non_blocking)
				.context("initialize file logger")?;

			let layer = tracing_subscriber::fmt::layer()
				.compact()
				.with_ansi(false)
				.with_file(true)
				.with_level(true)
				.with_line_number(true)
				.with_span_events(FmtSpan::FULL)
				.with_target(true)
				.with_writer(writer);

			(Some(layer), Some(Guard { appender_guard }))
		},
	};

	tracing_subscriber::registry()
		.with(filter)
		.with(stderr)
		.with(files)
		.try_init()
		.context("initialize tracing")?;

	tracing::info!(files = guard.is_some(), "initialized tracing");

	Ok(guard)
}
