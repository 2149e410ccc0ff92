#![doc = include_str!("../README.md")]

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod macros;

pub mod cache;
pub mod config;
pub use config::Config;

pub mod database;
pub mod http;
pub mod params;
pub mod services;

mod state;
pub use state::{InitializeStateError, State};

#[cfg(test)]
mod testing;

/// Runs the API until a SIGINT signal is received.
pub async fn run(config: Config) -> anyhow::Result<()>
{
	let state = State::new(&config).await.context("initialize state")?;

	tracing::debug!(addr = %config.addr, "binding TCP socket");

	let tcp_listener = TcpListener::bind(config.addr).await.context("bind tcp socket")?;
	let addr = tcp_listener.local_addr().context("get tcp addr")?;

	tracing::info!(%addr, "listening for requests");

	axum::serve(tcp_listener, router(state))
		.with_graceful_shutdown(sigint())
		.await
		.context("run http server")
}

/// Builds the API's HTTP router.
pub fn router(state: State) -> Router
{
	Router::new()
		.merge(state.health_svc)
		.merge(state.user_svc)
		.merge(state.achievement_svc)
		.merge(state.progression_svc)
		.merge(state.game_svc)
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
}

/// Waits for a SIGINT signal from the operating system.
#[tracing::instrument(name = "runtime::signals")]
async fn sigint()
{
	match signal::ctrl_c().await {
		Ok(()) => {
			tracing::warn!(target: "wordquest_api::audit_log", "received SIGINT, shutting down");
		},
		Err(error) => {
			tracing::error!(target: "wordquest_api::audit_log", %error, "failed to receive SIGINT");
		},
	}
}
