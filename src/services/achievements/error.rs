//! The errors that can occur when interacting with this service.

use thiserror::Error;

use crate::http::problem_details::{IntoProblemDetails, ProblemType};
use crate::services::users;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the achievement service.
#[derive(Debug, Error)]
pub enum Error
{
	/// A request targeted at a specific user was made, but the user could not
	/// be found in the database.
	#[error("user does not exist")]
	UserDoesNotExist,

	/// The user service failed.
	#[error(transparent)]
	Users(#[from] users::Error),

	/// Something went wrong communicating with the database.
	#[error("something went wrong")]
	Database(#[from] sqlx::Error),
}

impl IntoProblemDetails for Error
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::UserDoesNotExist => ProblemType::ResourceNotFound,
			Self::Users(source) => source.problem_type(),
			Self::Database(source) => source.problem_type(),
		}
	}
}
