//! Game instance implementation and roster management
//!
//! A game holds only weak references: to its host and to every joined
//! player. Entries whose player has been destroyed stay in the roster as
//! stale entries until `play` or a same-name `add_player` prunes them.

use crate::error::{MatchmakingError, Result};
use crate::game::matching::{resolve, EligibilityBand};
use crate::player::{GameKey, Player, WeakPlayer};
use crate::types::{GameMode, GameName, PlayerName};
use std::cell::RefCell;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, info};

struct GameInner {
    name: GameName,
    mode: GameMode,
    host: WeakPlayer,
    /// Ordered by player name; this is the roster iteration order
    roster: RefCell<BTreeMap<PlayerName, WeakPlayer>>,
}

/// Strong handle to a hosted game
#[derive(Clone)]
pub struct Game {
    inner: Rc<GameInner>,
}

/// Non-owning handle to a hosted game
#[derive(Clone, Default)]
pub struct WeakGame {
    inner: Weak<GameInner>,
}

impl Game {
    /// Create a game hosted by `host`; only `Player::host_game` calls this
    pub(crate) fn new(name: GameName, mode: GameMode, host: WeakPlayer) -> Self {
        Self {
            inner: Rc::new(GameInner {
                name,
                mode,
                host,
                roster: RefCell::new(BTreeMap::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn mode(&self) -> GameMode {
        self.inner.mode
    }

    pub fn host(&self) -> WeakPlayer {
        self.inner.host.clone()
    }

    pub fn downgrade(&self) -> WeakGame {
        WeakGame {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether both handles refer to the same game object
    pub fn ptr_eq(&self, other: &Game) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Rating delta this game's mode applies to a winner or a loser
    pub fn rating_change(&self, won: bool) -> i32 {
        self.inner.mode.rating_change(won)
    }

    fn upgrade_host(&self) -> Result<Player> {
        self.inner.host.upgrade().ok_or_else(|| {
            MatchmakingError::HostUnavailable {
                game: self.inner.name.clone(),
            }
            .into()
        })
    }

    /// Whether a player rated `rating` may join this game
    ///
    /// Fails with `HostUnavailable` once the host is gone.
    pub fn is_allowed(&self, rating: i32) -> Result<bool> {
        let host = self.upgrade_host()?;
        Ok(EligibilityBand::around(host.rating()).contains(rating))
    }

    /// Insert `player` into the roster
    ///
    /// A stale entry with the same name is pruned first. Returns `Ok(false)`
    /// when the player is not eligible, is the host, or an active entry with
    /// that name already exists.
    pub fn add_player(&self, _key: &GameKey, player: &Player) -> Result<bool> {
        let host = self.upgrade_host()?;
        let band = EligibilityBand::around(host.rating());

        if !band.contains(player.rating()) {
            debug!(
                "'{}' ({}) outside band {:?} of game '{}'",
                player.name(),
                player.rating(),
                band.bounds(),
                self.inner.name
            );
            return Ok(false);
        }

        if host.name() == player.name() {
            debug!("Host '{}' cannot join its own game", host.name());
            return Ok(false);
        }

        let mut roster = self.inner.roster.borrow_mut();
        if roster
            .get(player.name())
            .is_some_and(|entry| !entry.is_reachable())
        {
            roster.remove(player.name());
            debug!(
                "Pruned stale entry '{}' from game '{}'",
                player.name(),
                self.inner.name
            );
        }

        match roster.entry(player.name().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(player.downgrade());
                Ok(true)
            }
            Entry::Occupied(_) => Ok(false),
        }
    }

    /// Erase the roster entry named like `player`; returns whether one existed
    pub fn remove_player(&self, _key: &GameKey, player: &Player) -> bool {
        self.inner
            .roster
            .borrow_mut()
            .remove(player.name())
            .is_some()
    }

    /// Count of roster entries whose player is still alive
    pub fn number_of_players(&self) -> usize {
        self.inner
            .roster
            .borrow()
            .values()
            .filter(|entry| entry.is_reachable())
            .count()
    }

    /// Raw roster size, stale entries included
    pub fn roster_len(&self) -> usize {
        self.inner.roster.borrow().len()
    }

    /// Reachable roster players in roster order
    pub fn players(&self) -> Vec<Player> {
        self.inner
            .roster
            .borrow()
            .values()
            .filter_map(WeakPlayer::upgrade)
            .collect()
    }

    /// Highest-rated reachable player
    ///
    /// Ties go to the first one in roster order, i.e. the smallest name.
    /// Fails with `NoActivePlayers` when nobody is reachable.
    pub fn best_player(&self) -> Result<WeakPlayer> {
        let mut best: Option<Player> = None;
        for player in self.players() {
            if best.as_ref().map_or(true, |b| player.rating() > b.rating()) {
                best = Some(player);
            }
        }

        best.map(|player| player.downgrade()).ok_or_else(|| {
            MatchmakingError::NoActivePlayers {
                game: self.inner.name.clone(),
            }
            .into()
        })
    }

    /// Resolve a match with the reachable player at `index` as the winner
    ///
    /// Stale roster entries are pruned as a side effect, even when the call
    /// fails afterwards. Fails with `HostUnavailable` when the host is gone
    /// and with `NotEnoughPlayers` when `index` is out of bounds; in both
    /// cases no rating is touched.
    pub fn play(&self, index: usize) -> Result<WeakPlayer> {
        let active = self.prune_and_collect();
        self.upgrade_host()?;

        let winner = resolve(&self.inner.name, self.inner.mode, active, index)?;
        info!(
            "Game '{}' ({}) won by '{}', now rated {}",
            self.inner.name,
            self.inner.mode,
            winner.name(),
            winner.rating()
        );
        Ok(winner.downgrade())
    }

    fn prune_and_collect(&self) -> Vec<Player> {
        let mut active = Vec::new();
        let mut roster = self.inner.roster.borrow_mut();
        let before = roster.len();

        roster.retain(|_, entry| match entry.upgrade() {
            Some(player) => {
                active.push(player);
                true
            }
            None => false,
        });

        if roster.len() < before {
            debug!(
                "Pruned {} stale entries from game '{}'",
                before - roster.len(),
                self.inner.name
            );
        }
        active
    }

    /// Write the game's rendering into `out`
    ///
    /// Fails with `HostUnavailable` before writing anything if the host is
    /// gone. Unreachable roster entries are skipped.
    pub fn write_to<W: fmt::Write>(&self, out: &mut W) -> Result<()> {
        let host = self.upgrade_host()?;

        write!(
            out,
            "{}: [{}, {}, {}, player: {{",
            self.inner.mode.label(),
            self.inner.name,
            host.name(),
            host.rating()
        )?;

        let entries: Vec<String> = self
            .players()
            .iter()
            .map(|player| format!("[{}, {}]", player.name(), player.rating()))
            .collect();
        write!(out, "{}}}]", entries.join(", "))?;

        Ok(())
    }

    /// Rendering as an owned string
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.write_to(&mut out)?;
        Ok(out)
    }
}

impl WeakGame {
    pub fn upgrade(&self) -> Option<Game> {
        self.inner.upgrade().map(|inner| Game { inner })
    }

    /// Whether the referenced game still exists
    pub fn is_reachable(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("name", &self.inner.name)
            .field("mode", &self.inner.mode)
            .field("host", &self.inner.host)
            .field("roster_len", &self.roster_len())
            .finish()
    }
}

impl fmt::Debug for WeakGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(game) => write!(f, "WeakGame({})", game.name()),
            None => write!(f, "WeakGame(<expired>)"),
        }
    }
}
