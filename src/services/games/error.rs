//! The errors that can occur when interacting with this service.

use thiserror::Error;
use wordquest_progression::ValidationError;

use crate::http::problem_details::{ExtensionMembers, IntoProblemDetails, ProblemType};
use crate::services::progression;

/// Type alias with a default `Err` type of [`Error`].
///
/// [`Error`]: enum@Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors that can occur when interacting with the game service.
#[derive(Debug, Error)]
pub enum Error
{
	/// A game reported a negative score.
	#[error("points cannot be negative (got {points})")]
	NegativePoints
	{
		/// The reported points.
		points: i64,
	},

	/// A request targeted at a specific user was made, but the user could not
	/// be found in the database.
	#[error("user does not exist")]
	UserDoesNotExist,

	/// A user row contained counters that violate the progression invariants.
	#[error("stored progression counters are invalid: {0}")]
	CorruptCounters(#[from] ValidationError),

	/// Evaluating the user's progression failed.
	#[error(transparent)]
	Progression(#[from] progression::Error),

	/// Something went wrong communicating with the database.
	#[error("something went wrong")]
	Database(#[from] sqlx::Error),
}

impl IntoProblemDetails for Error
{
	fn problem_type(&self) -> ProblemType
	{
		match self {
			Self::NegativePoints { .. } => ProblemType::InvalidInput,
			Self::UserDoesNotExist => ProblemType::ResourceNotFound,
			Self::CorruptCounters(_) => ProblemType::Internal,
			Self::Progression(source) => source.problem_type(),
			Self::Database(source) => source.problem_type(),
		}
	}

	fn add_extension_members(&self, ext: &mut ExtensionMembers)
	{
		if let Self::NegativePoints { points } = self {
			ext.add("field", "points");
			ext.add("value", points);
		}
	}
}
