//! HTTP handlers for this service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing, Router};

use super::{
	Error,
	FetchLeaderboardRequest,
	FetchLeaderboardResponse,
	RegisterUserRequest,
	RegisterUserResponse,
	UserID,
	UserProfile,
	UserService,
};
use crate::http::extract::{Json, Path, Query};
use crate::http::ProblemDetails;

impl From<UserService> for Router
{
	fn from(svc: UserService) -> Self
	{
		Router::new()
			.route("/users", routing::post(register_user))
			.route("/users/:user", routing::get(get_single))
			.route("/leaderboard", routing::get(get_leaderboard))
			.with_state(svc)
	}
}

#[tracing::instrument(err(Debug, level = "debug"))]
async fn register_user(
	State(svc): State<UserService>,
	Json(req): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<RegisterUserResponse>), ProblemDetails>
{
	let res = svc.register_user(req).await?;

	Ok((StatusCode::CREATED, Json(res)))
}

#[tracing::instrument(err(Debug, level = "debug"))]
async fn get_single(
	State(svc): State<UserService>,
	Path(user_id): Path<UserID>,
) -> Result<Json<UserProfile>, ProblemDetails>
{
	let profile = svc.fetch_user(user_id).await?.ok_or(Error::UserDoesNotExist)?;

	Ok(Json(profile))
}

#[tracing::instrument(err(Debug, level = "debug"))]
async fn get_leaderboard(
	State(svc): State<UserService>,
	Query(req): Query<FetchLeaderboardRequest>,
) -> Result<Json<FetchLeaderboardResponse>, ProblemDetails>
{
	let res = svc.fetch_leaderboard(req).await?;

	Ok(Json(res))
}
