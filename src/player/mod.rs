//! Players and their hosting/joining lifecycle
//!
//! A player strongly owns the single game it hosts and keeps weak references
//! to every game it joined. Roster changes on a game are only possible
//! through the player's join and leave operations.

pub mod instance;
pub mod key;

// Re-export commonly used types
pub use instance::{Player, WeakPlayer};
pub use key::GameKey;
