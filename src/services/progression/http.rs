//! HTTP handlers for this service.

use axum::extract::State;
use axum::{routing, Router};
use wordquest_progression::RankTier;

use super::{FetchProgressResponse, ProgressionService};
use crate::http::extract::{Json, Path};
use crate::http::ProblemDetails;
use crate::services::users::UserID;

impl From<ProgressionService> for Router
{
	fn from(svc: ProgressionService) -> Self
	{
		Router::new()
			.route("/ranks", routing::get(get_ranks))
			.route("/users/:user/progress", routing::get(get_progress))
			.with_state(svc)
	}
}

#[tracing::instrument]
async fn get_ranks(State(svc): State<ProgressionService>) -> Json<Vec<RankTier>>
{
	Json(svc.rank_table().to_vec())
}

#[tracing::instrument(err(Debug, level = "debug"))]
async fn get_progress(
	State(svc): State<ProgressionService>,
	Path(user_id): Path<UserID>,
) -> Result<Json<FetchProgressResponse>, ProblemDetails>
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
	use crate::testing;

	#[sqlx::test(migrations = "database/migrations")]
	async fn ranks(database: SqlitePool) -> color_eyre::Result<()>
	{
		let router = Router::from(testing::progression_svc(database));
		let req = Request::builder().uri("/ranks").body(Body::empty())?;
		let res = router.oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::OK);

		let ranks = testing::parse_body::<Vec<RankTier>>(res.into_body()).await?;

		testing::assert_eq!(ranks.len(), 7);
		testing::assert_eq!(ranks[0].min_score, 0);
		testing::assert_eq!(ranks[6].id, "polyglot");

		Ok(())
	}

	#[sqlx::test(migrations = "database/migrations")]
	async fn progress(database: SqlitePool) -> color_eyre::Result<()>
	{
		let user_id = testing::register(&testing::user_svc(database.clone()), "alice").await?;
		let router = Router::from(testing::progression_svc(database));
		let req = Request::builder()
			.uri(format!("/users/{user_id}/progress"))
			.body(Body::empty())?;

		let res = router.oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::OK);

		let res = testing::parse_body::<FetchProgressResponse>(res.into_body()).await?;

		testing::assert_eq!(res.user_id, user_id);
		testing::assert_eq!(res.progress.per_dimension_progress.overall, 0);

		Ok(())
	}
}
