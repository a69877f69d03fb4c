//! Error types for the matchmaking model
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. Callers that need the specific failure recover it with
//! `downcast_ref::<MatchmakingError>()`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific matchmaking scenarios
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchmakingError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Host of game '{game}' is no longer available")]
    HostUnavailable { game: String },

    #[error("No active player in game '{game}'")]
    NoActivePlayers { game: String },

    #[error("Game '{game}' does not have enough active players: index {index}, available {available}")]
    NotEnoughPlayers {
        game: String,
        index: usize,
        available: usize,
    },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Scenario step {step} failed: {reason}")]
    ScenarioError { step: usize, reason: String },
}

/// Extract the matchmaking error kind from an `anyhow` error, if it carries one
pub fn kind_of(error: &anyhow::Error) -> Option<&MatchmakingError> {
    error.downcast_ref::<MatchmakingError>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_survives_anyhow_conversion() {
        let err: anyhow::Error = MatchmakingError::NoActivePlayers {
            game: "lobby".to_string(),
        }
        .into();

        assert_eq!(
            kind_of(&err),
            Some(&MatchmakingError::NoActivePlayers {
                game: "lobby".to_string()
            })
        );
        assert_eq!(err.to_string(), "No active player in game 'lobby'");
    }

    #[test]
    fn test_kind_of_foreign_error() {
        let err = anyhow::anyhow!("something else");
        assert!(kind_of(&err).is_none());
    }
}
