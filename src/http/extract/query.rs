//! The [`Query`] extractor used by the paginated routes (`/leaderboard` and
//! `/users/:user/games`).

use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::problem_details::{ExtensionMembers, IntoProblemDetails, ProblemType};
use crate::http::ProblemDetails;

#[allow(clippy::missing_docs_in_private_items)]
mod base
{
	pub use axum::extract::rejection::QueryRejection;
	pub use axum::extract::Query;
}

/// Parses pagination parameters such as `?limit=10&offset=20`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(base::Query), rejection(QueryRejection))]
pub struct Query<T>(pub T);

/// A query string that could not be parsed, e.g. a `limit` above the maximum.
///
/// The deserializer's message is returned as the `reason` extension member.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct QueryRejection(#[from] pub base::QueryRejection);

impl IntoResponse for QueryRejection
{
	fn into_response(self) -> Response
	{
		ProblemDetails::from(self).into_response()
	}
}

impl IntoProblemDetails for QueryRejection
{
	fn problem_type(&self) -> ProblemType
	{
		ProblemType::InvalidQueryString
	}

	fn add_extension_members(&self, ext: &mut ExtensionMembers)
	{
		ext.add("reason", &self.0.body_text());
	}
}

#[cfg(test)]
mod tests
{
	use axum::body::Body;
	use axum::extract::Request;
	use axum::http::StatusCode;
	use axum::routing::get;
	use axum::Router;
	use tower::ServiceExt;

	use super::*;
	use crate::services::users::FetchLeaderboardRequest;
	use crate::testing;

	fn router() -> Router
	{
		Router::new().route(
			"/leaderboard",
			get(|Query(req): Query<FetchLeaderboardRequest>| async move {
				format!("{} {}", req.limit.0, req.offset.0)
			}),
		)
	}

	#[tokio::test]
	async fn defaults() -> color_eyre::Result<()>
	{
		let req = Request::builder().uri("/leaderboard").body(Body::empty())?;
		let res = router().oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::OK);

		let body = axum::body::to_bytes(res.into_body(), usize::MAX).await?;

		testing::assert_eq!(body.as_ref(), b"50 0");

		Ok(())
	}

	#[tokio::test]
	async fn limit_above_maximum() -> color_eyre::Result<()>
	{
		let req = Request::builder().uri("/leaderboard?limit=100000").body(Body::empty())?;
		let res = router().oneshot(req).await?;

		testing::assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

		let problem = testing::parse_body::<serde_json::Value>(res.into_body()).await?;

		testing::assert_eq!(problem["type"], "/docs/problem-types#invalid-query-string");
		testing::assert!(problem["reason"].is_string(), "rejection should carry a reason");

		Ok(())
	}
}
