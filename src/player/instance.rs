//! Player entity implementation
//!
//! A `Player` is a cheap, clonable strong handle. Every clone keeps the player
//! alive; once the last one is dropped the player is destroyed, together with
//! the game it hosts (unless someone else still holds that game), and every
//! roster entry pointing at it turns stale.

use crate::error::Result;
use crate::game::{Game, WeakGame};
use crate::player::key::GameKey;
use crate::types::{GameMode, GameName, PlayerName};
use crate::utils::{check_name, check_rating, clamp_rating};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, info};

struct PlayerInner {
    name: PlayerName,
    rating: Cell<i32>,
    /// Sole strong owner of the hosted game
    hosted_game: RefCell<Option<Game>>,
    games: RefCell<BTreeMap<GameName, WeakGame>>,
}

/// Strong handle to a player
#[derive(Clone)]
pub struct Player {
    inner: Rc<PlayerInner>,
}

/// Non-owning handle to a player
#[derive(Clone, Default)]
pub struct WeakPlayer {
    inner: Weak<PlayerInner>,
}

impl Player {
    /// Create a new player
    ///
    /// Fails with `InvalidArgument` if `name` is empty or `rating` lies
    /// outside `[MMR_MIN, MMR_MAX]`.
    pub fn new(name: impl Into<PlayerName>, rating: i32) -> Result<Self> {
        let name = name.into();
        check_name(&name)?;
        let rating = check_rating(rating)?;

        Ok(Self {
            inner: Rc::new(PlayerInner {
                name,
                rating: Cell::new(rating),
                hosted_game: RefCell::new(None),
                games: RefCell::new(BTreeMap::new()),
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn rating(&self) -> i32 {
        self.inner.rating.get()
    }

    /// Strong handle to the hosted game, if any
    pub fn hosted_game(&self) -> Option<Game> {
        self.inner.hosted_game.borrow().clone()
    }

    /// Games this player joined that are still alive, ordered by name
    pub fn joined_games(&self) -> Vec<Game> {
        self.inner
            .games
            .borrow()
            .values()
            .filter_map(WeakGame::upgrade)
            .collect()
    }

    pub fn downgrade(&self) -> WeakPlayer {
        WeakPlayer {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether both handles refer to the same player object
    pub fn ptr_eq(&self, other: &Player) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Add `delta` to the rating, clamping into `[MMR_MIN, MMR_MAX]`
    pub fn change_rating(&self, delta: i32) {
        let old = self.inner.rating.get();
        let new = clamp_rating(old, delta);
        self.inner.rating.set(new);
        debug!("Rating of '{}' changed {} -> {}", self.inner.name, old, new);
    }

    /// Host a new game of the given mode
    ///
    /// Returns `Ok(false)` without touching the current game if this player
    /// already hosts one.
    pub fn host_game(&self, name: impl Into<GameName>, mode: GameMode) -> Result<bool> {
        let name = name.into();
        check_name(&name)?;

        let mut hosted = self.inner.hosted_game.borrow_mut();
        if let Some(current) = hosted.as_ref() {
            debug!(
                "'{}' already hosts '{}', refusing to host '{}'",
                self.inner.name,
                current.name(),
                name
            );
            return Ok(false);
        }

        info!(
            "'{}' is now hosting {} game '{}'",
            self.inner.name, mode, name
        );
        *hosted = Some(Game::new(name, mode, self.downgrade()));
        Ok(true)
    }

    /// Join a game hosted by someone else
    ///
    /// Fails with `HostUnavailable` if the game's host is gone.
    pub fn join_game(&self, game: &Game) -> Result<bool> {
        let joined = game.add_player(&GameKey::new(), self)?;

        if joined {
            self.inner
                .games
                .borrow_mut()
                .insert(game.name().to_string(), game.downgrade());
            info!("'{}' joined game '{}'", self.inner.name, game.name());
        }

        Ok(joined)
    }

    /// Leave a previously joined game
    ///
    /// The local entry is erased first; the game's roster is only asked to
    /// drop this player when that entry existed.
    pub fn leave_game(&self, game: &Game) -> bool {
        let had_entry = self.inner.games.borrow_mut().remove(game.name()).is_some();
        let left = had_entry && game.remove_player(&GameKey::new(), self);

        if left {
            info!("'{}' left game '{}'", self.inner.name, game.name());
        }
        left
    }

    /// Try to join every reachable candidate into the hosted game
    ///
    /// Returns the candidates that could not be joined, in input order. When
    /// this player hosts nothing, every candidate is returned.
    pub fn invite_players(&self, candidates: &[WeakPlayer]) -> Result<Vec<WeakPlayer>> {
        let Some(game) = self.hosted_game() else {
            debug!("'{}' hosts no game, nobody can be invited", self.inner.name);
            return Ok(candidates.to_vec());
        };

        let mut failed = Vec::new();
        for candidate in candidates {
            match candidate.upgrade() {
                Some(player) => {
                    if !player.join_game(&game)? {
                        failed.push(candidate.clone());
                    }
                }
                None => failed.push(candidate.clone()),
            }
        }

        debug!(
            "'{}' invited {} players to '{}', {} failed",
            self.inner.name,
            candidates.len(),
            game.name(),
            failed.len()
        );
        Ok(failed)
    }

    /// Release the hosted game; returns whether there was one
    pub fn close_game(&self) -> bool {
        let released = self.inner.hosted_game.borrow_mut().take();

        match released {
            Some(game) => {
                info!("'{}' closed game '{}'", self.inner.name, game.name());
                true
            }
            None => false,
        }
    }
}

impl WeakPlayer {
    pub fn upgrade(&self) -> Option<Player> {
        self.inner.upgrade().map(|inner| Player { inner })
    }

    /// Whether the referenced player still exists
    pub fn is_reachable(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Whether both handles point at the same player, or are both empty
    pub fn ptr_eq(&self, other: &WeakPlayer) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl From<&Player> for WeakPlayer {
    fn from(player: &Player) -> Self {
        player.downgrade()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hosted = self.inner.hosted_game.borrow();
        let hosts = hosted.as_ref().map(Game::name).unwrap_or("nothing");
        write!(
            f,
            "[{}, {}, hosts: {}, games: {{",
            self.inner.name,
            self.inner.rating.get(),
            hosts
        )?;

        let names: Vec<String> = self
            .joined_games()
            .iter()
            .map(|game| game.name().to_string())
            .collect();
        write!(f, "{}}}]", names.join(", "))
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.inner.name)
            .field("rating", &self.inner.rating.get())
            .field(
                "hosted_game",
                &self.inner.hosted_game.borrow().as_ref().map(Game::name),
            )
            .finish()
    }
}

impl fmt::Debug for WeakPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(player) => write!(f, "WeakPlayer({})", player.name()),
            None => write!(f, "WeakPlayer(<expired>)"),
        }
    }
}
