//! The [`Path`] extractor used by every `/users/:user/...` route.
//!
//! A malformed `:user` segment (e.g. `/users/alice`) is reported as an
//! `invalid-path-parameters` problem that echoes the offending value.

use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::problem_details::{self, IntoProblemDetails, ProblemType};
use crate::http::ProblemDetails;

#[allow(clippy::missing_docs_in_private_items)]
mod base
{
	pub use axum::extract::path::ErrorKind;
	pub use axum::extract::rejection::PathRejection;
	pub use axum::extract::Path;
}

/// Parses route captures, usually a [`UserID`].
///
/// [`UserID`]: crate::services::users::UserID
#[derive(Debug, FromRequestParts)]
#[from_request(via(base::Path), rejection(PathRejection))]
pub struct Path<T>(pub T);

/// A `:user` segment that could not be parsed.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct PathRejection(#[from] pub base::PathRejection);

impl IntoResponse for PathRejection
{
	fn into_response(self) -> Response
	{
		ProblemDetails::from(self).into_response()
	}
}

impl IntoProblemDetails for PathRejection
{
	fn problem_type(&self) -> ProblemType
	{
		match self.0 {
			base::PathRejection::MissingPathParams(_) => ProblemType::MissingPathParameters,
			_ => ProblemType::InvalidPathParameters,
		}
	}

	fn add_extension_members(&self, ext: &mut problem_details::ExtensionMembers)
	{
		let base::PathRejection::FailedToDeserializePathParams(source) = &self.0 else {
			return;
		};

		let (parameter, value, expected_type) = match source.kind() {
			base::ErrorKind::ParseErrorAtKey { key, value, expected_type } => {
				(Some(key.as_str()), value, *expected_type)
			},
			base::ErrorKind::ParseErrorAtIndex { value, expected_type, .. }
			| base::ErrorKind::ParseError { value, expected_type } => (None, value, *expected_type),
			base::ErrorKind::InvalidUtf8InPathParam { key } => {
				ext.add("parameter", key);
				return;
			},
			_ => return,
		};

		if let Some(parameter) = parameter {
			ext.add("parameter", parameter);
		}

		ext.add("value", value);
		ext.add("expected_type", expected_type);
	}
}
