//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use mmr_parlor::error::{kind_of, MatchmakingError};
use mmr_parlor::{Game, GameMode, Player};

/// Create a player, panicking on invalid input
pub fn player(name: &str, rating: i32) -> Player {
    Player::new(name, rating).unwrap()
}

/// Host a game named `name` for `host` and return a handle to it
pub fn hosted_game(host: &Player, name: &str, mode: GameMode) -> Game {
    assert!(host.host_game(name, mode).unwrap());
    host.hosted_game().unwrap()
}

/// Join every player into `game`, asserting each join succeeds
pub fn join_all(game: &Game, players: &[&Player]) {
    for p in players {
        assert!(p.join_game(game).unwrap(), "{} failed to join", p.name());
    }
}

/// Assert that `result` failed with a matchmaking error accepted by `check`
pub fn assert_kind<T: std::fmt::Debug>(
    result: mmr_parlor::Result<T>,
    check: impl Fn(&MatchmakingError) -> bool,
) {
    let err = result.unwrap_err();
    let kind = kind_of(&err).unwrap_or_else(|| panic!("not a matchmaking error: {err}"));
    assert!(check(kind), "unexpected error kind: {kind:?}");
}
