//! The errors that can occur when interacting with this service.

use thiserror::Error;
use wordquest_progression::ValidationError;

use crate::http::problem_details::{ExtensionMembers, IntoProblemDetails, ProblemType};

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the user service.
#[derive(Debug, Error)]
pub enum Error
{
	/// A user with the requested name already exists.
	#[error("username is already taken")]
	UsernameTaken,

	/// A user with the requested email address already exists.
	#[error("email address is already registered")]
	EmailTaken,

	/// The requested username is not acceptable.
	#[error("invalid username: {reason}")]
	InvalidUsername
	{
		/// What is wrong with it.
		reason: &'static str,
	},

	/// The provided email address is malformed.
	#[error("invalid email address")]
	InvalidEmail,

	/// A request targeted at a specific user was made, but the user could not
	/// be found in the database.
	#[error("user does not exist")]
	UserDoesNotExist,

	/// A user row contained counters that violate the progression invariants.
	#[error("stored progression counters are invalid: {0}")]
	CorruptCounters(#[from] ValidationError),

	/// Something went wrong communicating with the database.
	#[error("something went wrong")]
	Database(#[from] sqlx::Error),
}

impl IntoProblemDetails for Error
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::UsernameTaken | Self::EmailTaken => ProblemType::ResourceAlreadyExists,
			Self::InvalidUsername { .. } | Self::InvalidEmail => ProblemType::InvalidInput,
			Self::UserDoesNotExist => ProblemType::ResourceNotFound,
			Self::CorruptCounters(_) => ProblemType::Internal,
			Self::Database(source) => source.problem_type(),
		}
	}

	fn add_extension_members(&self, ext: &mut ExtensionMembers)
	{
		match self {
			Self::UsernameTaken => ext.add("field", "username"),
			Self::EmailTaken | Self::InvalidEmail => ext.add("field", "email"),
			Self::InvalidUsername { .. } => ext.add("field", "username"),
			_ => {},
		}
	}
}
