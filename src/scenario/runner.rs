//! Scenario runner
//!
//! Owns the registry of players (the only strong handles outside the model)
//! and applies scenario steps to it one by one.

use crate::config::{MatchmakingSettings, PlayerSpec, Scenario, Step};
use crate::error::{MatchmakingError, Result};
use crate::game::{Game, WeakGame};
use crate::player::{Player, WeakPlayer};
use crate::rating::{PlayerStats, RatingHistory};
use crate::types::{GameName, MatchReport, PlayerName, RatingChange};
use crate::utils::{current_timestamp, generate_match_id};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Result of a single scenario step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: usize,
    pub action: String,
    /// `false` for ordinary negative outcomes and for errors
    pub success: bool,
    pub detail: String,
}

/// State of a registered player at the end of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: PlayerName,
    pub rating: i32,
    pub hosts: Option<GameName>,
    pub games: Vec<GameName>,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name().to_string(),
            rating: player.rating(),
            hosts: player.hosted_game().map(|game| game.name().to_string()),
            games: player
                .joined_games()
                .iter()
                .map(|game| game.name().to_string())
                .collect(),
        }
    }
}

/// Everything a run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub outcomes: Vec<StepOutcome>,
    /// Lines rendered by `show_*` steps
    pub output: Vec<String>,
    pub matches: Vec<MatchReport>,
    pub standings: Vec<PlayerStats>,
    pub players: Vec<PlayerSnapshot>,
}

impl RunSummary {
    pub fn failed_steps(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.success).count()
    }
}

/// Drives the player/game graph through scenario steps
#[derive(Debug)]
pub struct ScenarioRunner {
    settings: MatchmakingSettings,
    players: BTreeMap<PlayerName, Player>,
    /// Games by name; never keeps a game alive
    games: BTreeMap<GameName, WeakGame>,
    history: RatingHistory,
    output: Vec<String>,
    outcomes: Vec<StepOutcome>,
}

impl ScenarioRunner {
    pub fn new(settings: MatchmakingSettings) -> Self {
        Self {
            settings,
            players: BTreeMap::new(),
            games: BTreeMap::new(),
            history: RatingHistory::new(),
            output: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    /// Create and register players; names must be unique
    pub fn add_players(&mut self, specs: &[PlayerSpec]) -> Result<()> {
        for spec in specs {
            if self.players.contains_key(&spec.name) {
                return Err(MatchmakingError::InvalidArgument {
                    reason: format!("Duplicate player '{}'", spec.name),
                }
                .into());
            }
            let player = Player::new(spec.name.clone(), spec.rating)?;
            debug!("Registered player '{}' ({})", spec.name, spec.rating);
            self.players.insert(spec.name.clone(), player);
        }
        Ok(())
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    pub fn game(&self, name: &str) -> Option<Game> {
        self.games.get(name).and_then(WeakGame::upgrade)
    }

    pub fn history(&self) -> &RatingHistory {
        &self.history
    }

    /// Run a whole scenario and summarize it
    pub fn run(mut self, scenario: &Scenario) -> Result<RunSummary> {
        self.add_players(&scenario.players)?;
        info!(
            "Running scenario with {} players and {} steps",
            scenario.players.len(),
            scenario.steps.len()
        );

        for (index, step) in scenario.steps.iter().enumerate() {
            self.execute(index + 1, step)?;
        }

        Ok(self.summarize())
    }

    /// Apply one step and record its outcome
    ///
    /// Errors are recorded as failed outcomes unless `stop_on_error` is set,
    /// in which case they abort with `ScenarioError`.
    pub fn execute(&mut self, index: usize, step: &Step) -> Result<bool> {
        let (success, detail) = match self.apply(step) {
            Ok((success, detail)) => (success, detail),
            Err(e) if self.settings.stop_on_error => {
                return Err(MatchmakingError::ScenarioError {
                    step: index,
                    reason: e.to_string(),
                }
                .into());
            }
            Err(e) => (false, e.to_string()),
        };

        if success {
            debug!("Step {} ({}): {}", index, step.action(), detail);
        } else {
            warn!("Step {} ({}) failed: {}", index, step.action(), detail);
        }

        self.outcomes.push(StepOutcome {
            step: index,
            action: step.action().to_string(),
            success,
            detail,
        });
        Ok(success)
    }

    fn lookup_player(&self, name: &str) -> Result<Player> {
        self.players.get(name).cloned().ok_or_else(|| {
            MatchmakingError::InvalidArgument {
                reason: format!("Unknown player '{}'", name),
            }
            .into()
        })
    }

    fn lookup_game(&self, name: &str) -> Result<Game> {
        self.game(name).ok_or_else(|| {
            MatchmakingError::InvalidArgument {
                reason: format!("Game '{}' does not exist", name),
            }
            .into()
        })
    }

    fn apply(&mut self, step: &Step) -> Result<(bool, String)> {
        match step {
            Step::Host { player, game, mode } => {
                let host = self.lookup_player(player)?;
                let mode = mode.unwrap_or(self.settings.default_mode);
                if let Some(existing) = self.game(game) {
                    if !existing.host().ptr_eq(&host.downgrade()) {
                        return Err(MatchmakingError::InvalidArgument {
                            reason: format!(
                                "Game '{}' is already hosted by another player",
                                game
                            ),
                        }
                        .into());
                    }
                }
                if !host.host_game(game.clone(), mode)? {
                    return Ok((false, format!("'{}' already hosts a game", player)));
                }
                if let Some(hosted) = host.hosted_game() {
                    self.games.insert(game.clone(), hosted.downgrade());
                }
                Ok((true, format!("'{}' hosts {} game '{}'", player, mode, game)))
            }
            Step::Join { player, game } => {
                let joiner = self.lookup_player(player)?;
                let target = self.lookup_game(game)?;
                let joined = joiner.join_game(&target)?;
                Ok((joined, format!("'{}' join '{}'", player, game)))
            }
            Step::Leave { player, game } => {
                let leaver = self.lookup_player(player)?;
                let target = self.lookup_game(game)?;
                let left = leaver.leave_game(&target);
                Ok((left, format!("'{}' leave '{}'", player, game)))
            }
            Step::Invite { host, players } => {
                let inviter = self.lookup_player(host)?;
                // Unknown or dropped names become expired handles
                let candidates: Vec<WeakPlayer> = players
                    .iter()
                    .map(|name| {
                        self.players
                            .get(name)
                            .map(Player::downgrade)
                            .unwrap_or_default()
                    })
                    .collect();
                let failed = inviter.invite_players(&candidates)?;
                let failed_names: Vec<String> = players
                    .iter()
                    .zip(&candidates)
                    .filter(|(_, candidate)| failed.iter().any(|f| f.ptr_eq(candidate)))
                    .map(|(name, _)| name.clone())
                    .collect();
                Ok((
                    failed.is_empty(),
                    format!("could not invite: [{}]", failed_names.join(", ")),
                ))
            }
            Step::Play { game, winner } => {
                let target = self.lookup_game(game)?;
                let report = self.play(&target, *winner)?;
                let detail = format!("'{}' won '{}'", report.winner, game);
                self.history.record(report);
                Ok((true, detail))
            }
            Step::Close { player } => {
                let host = self.lookup_player(player)?;
                let closed = host.close_game();
                Ok((closed, format!("'{}' close", player)))
            }
            Step::DropPlayer { player } => {
                let dropped = self.players.remove(player).is_some();
                Ok((dropped, format!("drop '{}'", player)))
            }
            Step::ChangeRating { player, delta } => {
                let target = self.lookup_player(player)?;
                target.change_rating(*delta);
                Ok((true, format!("'{}' now rated {}", player, target.rating())))
            }
            Step::BestPlayer { game } => {
                let target = self.lookup_game(game)?;
                let best = target
                    .best_player()?
                    .upgrade()
                    .map(|p| p.name().to_string())
                    .unwrap_or_default();
                self.output.push(format!("best in {}: {}", game, best));
                Ok((true, format!("best player of '{}' is '{}'", game, best)))
            }
            Step::ShowPlayer { player } => {
                let target = self.lookup_player(player)?;
                self.output.push(target.to_string());
                Ok((true, format!("show '{}'", player)))
            }
            Step::ShowGame { game } => {
                let target = self.lookup_game(game)?;
                self.output.push(target.render()?);
                Ok((true, format!("show '{}'", game)))
            }
        }
    }

    /// Play `game` and capture the rating changes of every participant
    fn play(&self, game: &Game, winner: usize) -> Result<MatchReport> {
        let before: Vec<(Player, i32)> = game
            .players()
            .into_iter()
            .map(|p| {
                let rating = p.rating();
                (p, rating)
            })
            .collect();

        let won = game
            .play(winner)?
            .upgrade()
            .map(|p| p.name().to_string())
            .unwrap_or_default();

        let changes = before
            .iter()
            .map(|(player, old_rating)| RatingChange {
                player: player.name().to_string(),
                old_rating: *old_rating,
                new_rating: player.rating(),
            })
            .collect();

        Ok(MatchReport {
            match_id: generate_match_id(),
            game: game.name().to_string(),
            mode: game.mode(),
            winner: won,
            changes,
            played_at: current_timestamp(),
        })
    }

    fn summarize(self) -> RunSummary {
        RunSummary {
            standings: self.history.standings(),
            matches: self.history.reports().to_vec(),
            players: self.players.values().map(PlayerSnapshot::from).collect(),
            outcomes: self.outcomes,
            output: self.output,
        }
    }
}
