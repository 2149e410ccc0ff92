//! HTTP plumbing shared by every service.

pub mod extract;

pub mod problem_details;
pub use problem_details::ProblemDetails;
