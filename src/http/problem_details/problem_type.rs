//! This module contains the [`ProblemType`] enum.
//!
//! It represents an exhaustive list of all the possible error conditions the
//! API might return.

use axum::http::StatusCode;
use serde::{Serialize, Serializer};

/// Prefix for the URI identifying a problem type.
const BASE_PATH: &str = "/docs/problem-types#";

/// A problem type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemType
{
	/// You failed to provide a required path parameter.
	MissingPathParameters,

	/// A requested resource could not be found.
	ResourceNotFound,

	/// A request for creating a resource was made, but rejected because the
	/// resource already exists.
	ResourceAlreadyExists,

	/// Your request did not have a `Content-Type: application/json` header.
	MissingContentType,

	/// You provided path parameters which could not be deserialized.
	InvalidPathParameters,

	/// You provided a query string which could not be deserialized.
	InvalidQueryString,

	/// You provided a request body which could not be deserialized.
	InvalidRequestBody,

	/// Your request was well-formed, but contained values that do not make
	/// sense, like a negative score.
	InvalidInput,

	/// An internal failure occurred.
	///
	/// Any occurrence of this problem type is considered a bug!
	Internal,
}

impl ProblemType
{
	/// The HTTP status code responses of this type have.
	pub const fn status(self) -> StatusCode
	{
		match self {
			Self::MissingPathParameters => StatusCode::BAD_REQUEST,
			Self::ResourceNotFound => StatusCode::NOT_FOUND,
			Self::ResourceAlreadyExists => StatusCode::CONFLICT,
			Self::MissingContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
			Self::InvalidPathParameters
			| Self::InvalidQueryString
			| Self::InvalidRequestBody
			| Self::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
			Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// A short, human-readable description of the problem.
	pub const fn title(self) -> &'static str
	{
		match self {
			Self::MissingPathParameters => "missing path parameters",
			Self::ResourceNotFound => "resource not found",
			Self::ResourceAlreadyExists => "resource already exists",
			Self::MissingContentType => "missing content type",
			Self::InvalidPathParameters => "invalid path parameters",
			Self::InvalidQueryString => "invalid query string",
			Self::InvalidRequestBody => "invalid request body",
			Self::InvalidInput => "invalid input",
			Self::Internal => "internal server error",
		}
	}

	/// The fragment identifying this problem type in the documentation.
	pub const fn slug(self) -> &'static str
	{
		match self {
			Self::MissingPathParameters => "missing-path-parameters",
			Self::ResourceNotFound => "resource-not-found",
			Self::ResourceAlreadyExists => "resource-already-exists",
			Self::MissingContentType => "missing-content-type",
			Self::InvalidPathParameters => "invalid-path-parameters",
			Self::InvalidQueryString => "invalid-query-string",
			Self::InvalidRequestBody => "invalid-request-body",
			Self::InvalidInput => "invalid-input",
			Self::Internal => "internal",
		}
	}
}

impl Serialize for ProblemType
{
	// Serialize as a URI reference as specified by the RFC.
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(&format_args!("{BASE_PATH}{}", self.slug()))
	}
}
