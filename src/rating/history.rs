//! In-memory ledger of resolved matches
//!
//! Keeps every `MatchReport` in the order it was recorded together with a
//! per-player aggregate, similar to a rating storage entry but without any
//! persistence behind it.

use crate::types::{MatchReport, PlayerName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregated results for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player: PlayerName,
    pub games_played: u64,
    pub wins: u64,
    /// Sum of all rating deltas across recorded matches
    pub net_change: i64,
    pub last_rating: i32,
    pub last_updated: DateTime<Utc>,
}

impl PlayerStats {
    fn new(player: PlayerName, rating: i32, at: DateTime<Utc>) -> Self {
        Self {
            player,
            games_played: 0,
            wins: 0,
            net_change: 0,
            last_rating: rating,
            last_updated: at,
        }
    }
}

/// Append-only match history
#[derive(Debug, Default, Clone)]
pub struct RatingHistory {
    reports: Vec<MatchReport>,
    stats: HashMap<PlayerName, PlayerStats>,
}

impl RatingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved match and fold it into the per-player stats
    pub fn record(&mut self, report: MatchReport) {
        for change in &report.changes {
            let entry = self
                .stats
                .entry(change.player.clone())
                .or_insert_with(|| {
                    PlayerStats::new(change.player.clone(), change.old_rating, report.played_at)
                });
            entry.games_played += 1;
            if change.player == report.winner {
                entry.wins += 1;
            }
            entry.net_change += i64::from(change.delta());
            entry.last_rating = change.new_rating;
            entry.last_updated = report.played_at;
        }

        self.reports.push(report);
    }

    pub fn reports(&self) -> &[MatchReport] {
        &self.reports
    }

    pub fn stats_for(&self, player: &str) -> Option<&PlayerStats> {
        self.stats.get(player)
    }

    /// All players ordered by net change (descending), then by name
    pub fn standings(&self) -> Vec<PlayerStats> {
        let mut standings: Vec<PlayerStats> = self.stats.values().cloned().collect();
        standings.sort_by(|a, b| {
            b.net_change
                .cmp(&a.net_change)
                .then_with(|| a.player.cmp(&b.player))
        });
        standings
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GameMode, RatingChange};
    use crate::utils::{current_timestamp, generate_match_id};

    fn change(player: &str, old_rating: i32, new_rating: i32) -> RatingChange {
        RatingChange {
            player: player.to_string(),
            old_rating,
            new_rating,
        }
    }

    fn report(winner: &str, changes: Vec<RatingChange>) -> MatchReport {
        MatchReport {
            match_id: generate_match_id(),
            game: "arena".to_string(),
            mode: GameMode::Ranked,
            winner: winner.to_string(),
            changes,
            played_at: current_timestamp(),
        }
    }

    #[test]
    fn test_empty_history() {
        let history = RatingHistory::new();
        assert!(history.is_empty());
        assert!(history.standings().is_empty());
        assert!(history.stats_for("alice").is_none());
    }

    #[test]
    fn test_record_aggregates_per_player() {
        let mut history = RatingHistory::new();
        history.record(report(
            "bob",
            vec![change("alice", 1000, 995), change("bob", 1200, 1205)],
        ));
        history.record(report(
            "alice",
            vec![change("alice", 995, 1000), change("bob", 1205, 1195)],
        ));

        assert_eq!(history.len(), 2);

        let alice = history.stats_for("alice").unwrap();
        assert_eq!(alice.games_played, 2);
        assert_eq!(alice.wins, 1);
        assert_eq!(alice.net_change, 0);
        assert_eq!(alice.last_rating, 1000);

        let bob = history.stats_for("bob").unwrap();
        assert_eq!(bob.wins, 1);
        assert_eq!(bob.net_change, -5);
        assert_eq!(bob.last_rating, 1195);
    }

    #[test]
    fn test_standings_order() {
        let mut history = RatingHistory::new();
        history.record(report(
            "carol",
            vec![
                change("alice", 1000, 995),
                change("bob", 1000, 995),
                change("carol", 1000, 1005),
            ],
        ));

        let names: Vec<_> = history
            .standings()
            .into_iter()
            .map(|s| s.player)
            .collect();
        assert_eq!(names, vec!["carol", "alice", "bob"]);
    }
}
