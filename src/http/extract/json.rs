//! This module contains the [`Json`] extractor, a wrapper around [`axum::Json`]
//! with a custom error response.

use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::problem_details::{ExtensionMembers, IntoProblemDetails, ProblemType};
use crate::http::ProblemDetails;

#[allow(clippy::missing_docs_in_private_items)]
mod base
{
	pub use axum::extract::rejection::JsonRejection;
	pub use axum::Json;
}

/// JSON request and response bodies.
///
/// Behaves like [`axum::Json`], except that rejections are reported as
/// problem details.
#[derive(Debug, FromRequest)]
#[from_request(via(base::Json), rejection(JsonRejection))]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
	base::Json<T>: IntoResponse,
{
	fn into_response(self) -> Response
	{
		base::Json(self.0).into_response()
	}
}

/// Rejection for the [`Json`] extractor.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct JsonRejection(#[from] pub base::JsonRejection);

impl IntoResponse for JsonRejection
{
	fn into_response(self) -> Response
	{
		ProblemDetails::from(self).into_response()
	}
}

impl IntoProblemDetails for JsonRejection
{
	fn problem_type(&self) -> ProblemType
	{
		match self.0 {
			base::JsonRejection::MissingJsonContentType(_) => ProblemType::MissingContentType,
			_ => ProblemType::InvalidRequestBody,
		}
	}

	fn add_extension_members(&self, ext: &mut ExtensionMembers)
	{
		if let base::JsonRejection::JsonDataError(_) | base::JsonRejection::JsonSyntaxError(_) =
			self.0
		{
			ext.add("reason", &self.0.body_text());
		}
	}
}
