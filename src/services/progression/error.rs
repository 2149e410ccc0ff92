//! The errors that can occur when interacting with this service.

use thiserror::Error;
use wordquest_progression::ValidationError;

use crate::http::problem_details::{ExtensionMembers, IntoProblemDetails, ProblemType};
use crate::services::users;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the progression service.
#[derive(Debug, Error)]
pub enum Error
{
	/// A request targeted at a specific user was made, but the user could not
	/// be found in the database.
	#[error("user does not exist")]
	UserDoesNotExist,

	/// The counters handed to the calculator were inconsistent.
	#[error(transparent)]
	InvalidCounters(#[from] ValidationError),

	/// The user service failed.
	#[error(transparent)]
	Users(#[from] users::Error),
}

impl IntoProblemDetails for Error
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::UserDoesNotExist => ProblemType::ResourceNotFound,
			Self::InvalidCounters(source) => source.problem_type(),
			Self::Users(source) => source.problem_type(),
		}
	}

	fn add_extension_members(&self, ext: &mut ExtensionMembers)
	{
		match self {
			Self::InvalidCounters(source) => source.add_extension_members(ext),
			Self::Users(source) => source.add_extension_members(ext),
			Self::UserDoesNotExist => {},
		}
	}
}
