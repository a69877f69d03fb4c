//! Eligibility band and match resolution
//!
//! This module holds the two rules that drive a hosted game: which ratings
//! may join relative to the host, and how ratings move once a winner is
//! picked.

use crate::error::{MatchmakingError, Result};
use crate::player::Player;
use crate::rating::loser_delta;
use crate::types::GameMode;
use tracing::debug;

/// Ratings admitted by a host: strictly within ±10% of the host's rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityBand {
    host_rating: i32,
}

impl EligibilityBand {
    pub fn around(host_rating: i32) -> Self {
        Self { host_rating }
    }

    /// Whether `9·h < 10·n < 11·h`
    pub fn contains(&self, rating: i32) -> bool {
        let scaled = i64::from(rating) * 10;
        let host = i64::from(self.host_rating);
        scaled > host * 9 && scaled < host * 11
    }

    /// Inclusive integer bounds of the band, or `None` when nothing fits
    pub fn bounds(&self) -> Option<(i32, i32)> {
        let host = i64::from(self.host_rating);
        let lowest = (host * 9).div_euclid(10) + 1;
        let highest = (host * 11 - 1).div_euclid(10);

        if lowest > highest {
            return None;
        }
        // Nothing above i32::MAX can be a rating
        let highest = highest.min(i64::from(i32::MAX));
        Some((i32::try_from(lowest).ok()?, i32::try_from(highest).ok()?))
    }
}

/// Pick the winner at `index` and apply the rating changes
///
/// `active` must already be the reachable roster in roster order. The winner
/// is taken out of the working list only; everyone else pays the mode's
/// penalty, doubled when they were rated above the winner.
pub fn resolve(
    game: &str,
    mode: GameMode,
    mut active: Vec<Player>,
    index: usize,
) -> Result<Player> {
    if index >= active.len() {
        return Err(MatchmakingError::NotEnoughPlayers {
            game: game.to_string(),
            index,
            available: active.len(),
        }
        .into());
    }

    let winner = active.remove(index);
    let penalty = mode.rating_change(false);

    for player in &active {
        let delta = loser_delta(penalty, player.rating(), winner.rating());
        player.change_rating(delta);
    }
    winner.change_rating(mode.rating_change(true));

    debug!(
        "Resolved '{}': winner '{}' against {} opponents",
        game,
        winner.name(),
        active.len()
    );
    Ok(winner)
}
