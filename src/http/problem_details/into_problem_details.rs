//! This module contains the [`IntoProblemDetails`] trait.
//!
//! It defines the contract for how an error type can be turned into an HTTP
//! error response.

use std::convert;

use wordquest_progression::ValidationError;

use super::{ExtensionMembers, ProblemType};

/// A trait for creating [`ProblemDetails`] from error types.
///
/// [`ProblemDetails`]: super::ProblemDetails
pub trait IntoProblemDetails: std::error::Error
{
	/// Returns the problem type for this error.
	fn problem_type(&self) -> ProblemType;

	/// Adds [extension members] to the HTTP response.
	///
	/// [extension members]: https://www.rfc-editor.org/rfc/rfc9457.html#name-extension-members
	fn add_extension_members(&self, ext: &mut ExtensionMembers)
	{
		_ = ext;
	}
}

impl IntoProblemDetails for convert::Infallible
{
	fn problem_type(&self) -> ProblemType
	{
		match *self {}
	}
}

impl IntoProblemDetails for sqlx::Error
{
	fn problem_type(&self) -> ProblemType
	{
		ProblemType::Internal
	}
}

impl IntoProblemDetails for ValidationError
{
	fn problem_type(&self) -> ProblemType
	{
		ProblemType::InvalidInput
	}

	fn add_extension_members(&self, ext: &mut ExtensionMembers)
	{
		match *self {
			Self::WinsExceedGames { games_played, games_won } => {
				ext.add("games_played", &games_played);
				ext.add("games_won", &games_won);
			},
			Self::LevelZero => {},
			Self::LevelOutOfRange { level } => {
				ext.add("level", &level);
			},
			Self::NegativeCounter { field, value } => {
				ext.add("field", field);
				ext.add("value", &value);
			},
		}
	}
}
