//! Scenario documents driving the runner
//!
//! A scenario lists the players to create and an ordered list of steps, each
//! tagged by its `action`:
//!
//! ```toml
//! [[players]]
//! name = "alice"
//! rating = 1000
//!
//! [[steps]]
//! action = "host"
//! player = "alice"
//! game = "friday"
//! mode = "Ranked"
//! ```

use crate::types::{GameMode, GameName, PlayerName};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Player created before the first step runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: PlayerName,
    pub rating: i32,
}

/// One operation against the player/game graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Host {
        player: PlayerName,
        game: GameName,
        /// Falls back to the configured default mode
        #[serde(default)]
        mode: Option<GameMode>,
    },
    Join {
        player: PlayerName,
        game: GameName,
    },
    Leave {
        player: PlayerName,
        game: GameName,
    },
    Invite {
        host: PlayerName,
        players: Vec<PlayerName>,
    },
    Play {
        game: GameName,
        winner: usize,
    },
    Close {
        player: PlayerName,
    },
    /// Release the registry's handle, destroying the player
    DropPlayer {
        player: PlayerName,
    },
    ChangeRating {
        player: PlayerName,
        delta: i32,
    },
    BestPlayer {
        game: GameName,
    },
    ShowPlayer {
        player: PlayerName,
    },
    ShowGame {
        game: GameName,
    },
}

impl Step {
    /// The `action` tag of this step
    pub fn action(&self) -> &'static str {
        match self {
            Step::Host { .. } => "host",
            Step::Join { .. } => "join",
            Step::Leave { .. } => "leave",
            Step::Invite { .. } => "invite",
            Step::Play { .. } => "play",
            Step::Close { .. } => "close",
            Step::DropPlayer { .. } => "drop_player",
            Step::ChangeRating { .. } => "change_rating",
            Step::BestPlayer { .. } => "best_player",
            Step::ShowPlayer { .. } => "show_player",
            Step::ShowGame { .. } => "show_game",
        }
    }
}

/// A complete scenario
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub players: Vec<PlayerSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse a scenario from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a scenario from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse scenario file {}", path.display()))
    }
}
