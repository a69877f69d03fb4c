//! Hosted games and the matchmaking algorithm
//!
//! This module handles roster management, eligibility against the host's
//! rating, and resolving a match into rating changes.

pub mod instance;
pub mod matching;

// Re-export commonly used types
pub use instance::{Game, WeakGame};
pub use matching::{resolve, EligibilityBand};
