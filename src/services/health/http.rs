//! HTTP handlers for this service.

use axum::extract::State;
use axum::{routing, Router};

use super::HealthService;
use crate::http::ProblemDetails;

impl From<HealthService> for Router
{
	fn from(svc: HealthService) -> Self
	{
		Router::new().route("/health", routing::get(get)).with_state(svc)
	}
}

#[tracing::instrument(err(Debug, level = "debug"))]
async fn get(State(svc): State<HealthService>) -> Result<&'static str, ProblemDetails>
{
	svc.check().await?;

	Ok("healthy")
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
	async fn healthy(database: SqlitePool) -> color_eyre::Result<()>
	{
		let router = Router::from(HealthService::new(database));
		let req = Request::builder().uri("/health").body(Body::empty())?;
		let res = router.oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::OK);

		Ok(())
	}
}
