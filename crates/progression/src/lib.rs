//! Rank and level progression for WordQuest users.
//!
//! Everything in here is a pure function of a user's [`UserCounters`]:
//!
//! - a composite [score](score::compute) built from points, wins, games played and win rate
//! - the [rank](rank::resolve) that score qualifies for, and how far along the user is towards
//!   the next one
//! - the [requirements](level::LevelCurve::requirements) for every level, and whether the user
//!   meets all of them for the next one
//!
//! [`ProgressionCalculator`] bundles a validated configuration and runs all of the above at once.

mod error;
pub use error::{ConfigurationError, ValidationError};

mod counters;
pub use counters::{non_negative, UserCounters};

mod config;
pub use config::ProgressionConfig;

pub mod score;
pub use score::ScoreWeights;

pub mod rank;
pub use rank::{RankTable, RankTier};

pub mod level;
pub use level::{LevelCurve, LevelProgress, LevelRequirement};

mod calculator;
pub use calculator::{ProgressResult, ProgressionCalculator};
