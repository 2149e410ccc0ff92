//! HTTP handlers for this service.

use axum::extract::State;
use axum::{routing, Router};

use super::{Achievement, AchievementService, FetchAchievementsResponse};
use crate::http::extract::{Json, Path};
use crate::http::ProblemDetails;
use crate::services::users::UserID;

impl From<AchievementService> for Router
{
	fn from(svc: AchievementService) -> Self
	{
		Router::new()
			.route("/achievements", routing::get(get_catalog))
			.route("/users/:user/achievements", routing::get(get_progress))
			.with_state(svc)
	}
}

#[tracing::instrument]
async fn get_catalog(State(svc): State<AchievementService>) -> Json<&'static [Achievement]>
{
	Json(svc.catalog())
}

#[tracing::instrument(err(Debug, level = "debug"))]
async fn get_progress(
	State(svc): State<AchievementService>,
	Path(user_id): Path<UserID>,
) -> Result<Json<FetchAchievementsResponse>, ProblemDetails>
{
	let res = svc.fetch_progress(user_id).await?;

	Ok(Json(res))
}

#[cfg(test)]
mod tests
{
	use axum::body::Body;
	use axum::extract::Request;
	use axum::http::StatusCode;
	use sqlx::SqlitePool;
	use tower::ServiceExt;

	use super::*;
	use crate::services::achievements::CATALOG;
	use crate::testing;

	#[sqlx::test(migrations = "database/migrations")]
	async fn catalog(database: SqlitePool) -> color_eyre::Result<()>
	{
		let router = Router::from(testing::achievement_svc(database));
		let req = Request::builder().uri("/achievements").body(Body::empty())?;
		let res = router.oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::OK);

		let catalog = testing::parse_body::<Vec<serde_json::Value>>(res.into_body()).await?;

		testing::assert_eq!(catalog.len(), CATALOG.len());
		testing::assert_eq!(catalog[0]["metric"], "games-played");

		Ok(())
	}

	#[sqlx::test(migrations = "database/migrations")]
	async fn progress_for_unknown_user(database: SqlitePool) -> color_eyre::Result<()>
	{
		let router = Router::from(testing::achievement_svc(database));
		let req = Request::builder().uri("/users/7/achievements").body(Body::empty())?;
		let res = router.oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::NOT_FOUND);

		Ok(())
	}
}
