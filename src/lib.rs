//! MMR Parlor - In-memory matchmaking model for hosted games
//!
//! Players host and join games gated by a rating band around the host, and
//! a host resolves a match by picking a winner, which adjusts the rating of
//! every still-reachable participant. Players strongly own the game they
//! host; every other edge in the player/game graph is weak.

pub mod config;
pub mod error;
pub mod game;
pub mod player;
pub mod rating;
pub mod scenario;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{MatchmakingError, Result};
pub use types::*;

// Re-export key components
pub use game::{Game, WeakGame};
pub use player::{GameKey, Player, WeakPlayer};
pub use scenario::ScenarioRunner;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
