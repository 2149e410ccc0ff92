//! Wrappers around [`axum`]'s extractors that reject requests with
//! [`ProblemDetails`](crate::http::ProblemDetails) responses.

mod path;
pub use path::{Path, PathRejection};

mod query;
pub use query::{Query, QueryRejection};

mod json;
pub use json::{Json, JsonRejection};
