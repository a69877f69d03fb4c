//! Rating policy and match history
//!
//! This module provides the per-mode rating deltas applied when a game is
//! played, and an in-memory history of the matches that were resolved.

pub mod history;
pub mod policy;

// Re-export commonly used types
pub use history::{PlayerStats, RatingHistory};
pub use policy::{loser_delta, RANKED_STEP};
