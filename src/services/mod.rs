//! API services.
//!
//! These contain the core business logic.
//!
//! Every service has an `http` module containing the handlers and an
//! `Into<axum::Router>` implementation.

pub mod health;
pub use health::HealthService;

pub mod users;
pub use users::UserService;

pub mod achievements;
pub use achievements::AchievementService;

pub mod progression;
pub use progression::ProgressionService;

pub mod games;
pub use games::GameService;
