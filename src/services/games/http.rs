//! HTTP handlers for this service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing, Router};

use super::{
	FetchGamesRequest,
	FetchGamesResponse,
	GameService,
	RecordGameRequest,
	RecordGameResponse,
};
use crate::http::extract::{Json, Path, Query};
use crate::http::ProblemDetails;
use crate::services::users::UserID;

impl From<GameService> for Router
{
	fn from(svc: GameService) -> Self
	{
		Router::new()
			.route("/users/:user/games", routing::post(record_game).get(get_history))
			.with_state(svc)
	}
}

#[tracing::instrument(err(Debug, level = "debug"))]
async fn record_game(
	State(svc): State<GameService>,
	Path(user_id): Path<UserID>,
	Json(req): Json<RecordGameRequest>,
) -> Result<(StatusCode, Json<RecordGameResponse>), ProblemDetails>
{
	let res = svc.record_game(user_id, req).await?;

	Ok((StatusCode::CREATED, Json(res)))
}

#[tracing::instrument(err(Debug, level = "debug"))]
async fn get_history(
	State(svc): State<GameService>,
	Path(user_id): Path<UserID>,
	Query(req): Query<FetchGamesRequest>,
) -> Result<Json<FetchGamesResponse>, ProblemDetails>
{
	let res = svc.fetch_games(user_id, req).await?;

	Ok(Json(res))
}
