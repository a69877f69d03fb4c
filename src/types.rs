//! Common types used throughout the matchmaking model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of a player, used as the roster key
pub type PlayerName = String;

/// Name of a game, used as the joined-games key
pub type GameName = String;

/// Unique identifier for a resolved match
pub type MatchId = Uuid;

/// Lowest rating a player can hold
pub const MMR_MIN: i32 = 0;

/// Highest rating a player can hold
pub const MMR_MAX: i32 = 9999;

/// Rating policy a hosted game is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Ranked,
    Unranked,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Ranked => write!(f, "Ranked"),
            GameMode::Unranked => write!(f, "Unranked"),
        }
    }
}

impl std::str::FromStr for GameMode {
    type Err = crate::error::MatchmakingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ranked" => Ok(GameMode::Ranked),
            "unranked" => Ok(GameMode::Unranked),
            _ => Err(crate::error::MatchmakingError::InvalidArgument {
                reason: format!("Unknown game mode: {}", s),
            }),
        }
    }
}

/// Rating change information for a player after a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub player: PlayerName,
    pub old_rating: i32,
    pub new_rating: i32,
}

impl RatingChange {
    /// Signed difference between the new and the old rating
    pub fn delta(&self) -> i32 {
        self.new_rating - self.old_rating
    }
}

/// Record of a single resolved match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub match_id: MatchId,
    pub game: GameName,
    pub mode: GameMode,
    pub winner: PlayerName,
    /// Changes for every participant, winner included
    pub changes: Vec<RatingChange>,
    pub played_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_mode_parsing() {
        assert_eq!("ranked".parse::<GameMode>().unwrap(), GameMode::Ranked);
        assert_eq!("Unranked".parse::<GameMode>().unwrap(), GameMode::Unranked);
        assert!("casual".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_game_mode_display() {
        assert_eq!(GameMode::Ranked.to_string(), "Ranked");
        assert_eq!(GameMode::Unranked.to_string(), "Unranked");
    }

    #[test]
    fn test_rating_change_delta() {
        let change = RatingChange {
            player: "alice".to_string(),
            old_rating: 1000,
            new_rating: 990,
        };
        assert_eq!(change.delta(), -10);
    }
}
