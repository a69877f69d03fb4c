//! Rating-change policy for hosted games
//!
//! The policy is a closed set: `Ranked` games move ratings by a fixed step,
//! `Unranked` games never move them.

use crate::types::GameMode;

/// Rating step applied by ranked games
pub const RANKED_STEP: i32 = 5;

impl GameMode {
    /// Rating delta for a participant that won (`true`) or lost (`false`)
    pub fn rating_change(self, won: bool) -> i32 {
        match self {
            GameMode::Ranked if won => RANKED_STEP,
            GameMode::Ranked => -RANKED_STEP,
            GameMode::Unranked => 0,
        }
    }

    /// Label used when rendering a game of this mode
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Ranked => "Ranked Game",
            GameMode::Unranked => "Unranked Game",
        }
    }
}

/// Delta for a losing participant
///
/// A loser rated strictly above the winner takes twice the penalty.
pub fn loser_delta(penalty: i32, loser_rating: i32, winner_rating: i32) -> i32 {
    if loser_rating > winner_rating {
        2 * penalty
    } else {
        penalty
    }
}
