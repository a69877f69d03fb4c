//! Integration tests for the mmr-parlor matchmaking model
//!
//! These tests exercise the player/game graph end to end:
//! - Hosting, joining, inviting and leaving
//! - Match resolution for Ranked and Unranked games
//! - Stale references after players and games are destroyed

mod fixtures;

use fixtures::{assert_kind, hosted_game, join_all, player};
use mmr_parlor::{GameMode, MatchmakingError};

#[test]
fn test_ranked_match_higher_rated_winner() {
    // Host at 1100 so that 1000..=1200 all fit strictly inside the band
    let host = player("host", 1100);
    let game = hosted_game(&host, "arena", GameMode::Ranked);
    let a = player("a", 1000);
    let b = player("b", 1200);
    let c = player("c", 1001);
    join_all(&game, &[&a, &b, &c]);

    let winner = game.play(1).unwrap().upgrade().unwrap();

    assert!(winner.ptr_eq(&b));
    assert_eq!(a.rating(), 995);
    assert_eq!(b.rating(), 1205);
    assert_eq!(c.rating(), 996);
}

#[test]
fn test_ranked_match_lower_rated_winner() {
    let host = player("host", 1100);
    let game = hosted_game(&host, "arena", GameMode::Ranked);
    let a = player("a", 1000);
    let b = player("b", 1200);
    let c = player("c", 1001);
    join_all(&game, &[&a, &b, &c]);

    // Winner is "a" at 1000; both opponents are rated above
    game.play(0).unwrap();

    assert_eq!(a.rating(), 1005);
    assert_eq!(b.rating(), 1190);
    assert_eq!(c.rating(), 991);
}

#[test]
fn test_unranked_match_changes_nothing() {
    let host = player("host", 1100);
    let game = hosted_game(&host, "casual", GameMode::Unranked);
    let a = player("a", 1000);
    let b = player("b", 1200);
    let c = player("c", 1001);
    join_all(&game, &[&a, &b, &c]);

    for index in 0..3 {
        game.play(index).unwrap();
    }

    assert_eq!(a.rating(), 1000);
    assert_eq!(b.rating(), 1200);
    assert_eq!(c.rating(), 1001);
}

#[test]
fn test_play_out_of_bounds_leaves_ratings() {
    let host = player("host", 1000);
    let game = hosted_game(&host, "arena", GameMode::Ranked);
    let a = player("a", 1000);
    let b = player("b", 1050);
    join_all(&game, &[&a, &b]);

    assert_kind(game.play(2), |k| {
        matches!(
            k,
            MatchmakingError::NotEnoughPlayers {
                index: 2,
                available: 2,
                ..
            }
        )
    });
    assert_eq!(a.rating(), 1000);
    assert_eq!(b.rating(), 1050);
}

#[test]
fn test_ratings_clamp_during_play() {
    let host = player("host", 3);
    let game = hosted_game(&host, "low", GameMode::Ranked);
    let a = player("a", 3);
    let b = player("b", 3);
    join_all(&game, &[&a, &b]);

    game.play(0).unwrap();
    assert_eq!(a.rating(), 8);
    assert_eq!(b.rating(), 0);
}

#[test]
fn test_eligibility_boundaries() {
    let host = player("host", 1000);
    let game = hosted_game(&host, "arena", GameMode::Ranked);

    let at_lower = player("lower", 900);
    let at_upper = player("upper", 1100);
    let inside = player("inside", 901);

    assert!(!at_lower.join_game(&game).unwrap());
    assert!(!at_upper.join_game(&game).unwrap());
    assert!(inside.join_game(&game).unwrap());
    assert_eq!(game.number_of_players(), 1);
}

#[test]
fn test_single_hosted_game() {
    let host = player("host", 1000);
    let first = hosted_game(&host, "first", GameMode::Ranked);

    assert!(!host.host_game("second", GameMode::Unranked).unwrap());
    assert!(host.hosted_game().unwrap().ptr_eq(&first));
}

#[test]
fn test_rejoin_after_stale_entry() {
    let host = player("host", 1000);
    let game = hosted_game(&host, "arena", GameMode::Ranked);

    let original = player("guest", 1000);
    assert!(original.join_game(&game).unwrap());
    drop(original);

    let replacement = player("guest", 1000);
    assert!(replacement.join_game(&game).unwrap());
    assert!(!replacement.join_game(&game).unwrap());
    assert_eq!(game.number_of_players(), 1);
    assert_eq!(game.roster_len(), 1);
}

#[test]
fn test_lazy_pruning_only_in_play() {
    let host = player("host", 1000);
    let game = hosted_game(&host, "arena", GameMode::Ranked);
    let stay = player("stay", 1000);
    let leave = player("leave", 1000);
    join_all(&game, &[&stay, &leave]);
    drop(leave);

    assert_eq!(game.number_of_players(), 1);
    game.best_player().unwrap();
    game.render().unwrap();
    assert_eq!(game.roster_len(), 2);

    game.play(0).unwrap();
    assert_eq!(game.roster_len(), 1);
}

#[test]
fn test_best_player_on_empty_roster() {
    let host = player("host", 1000);
    let game = hosted_game(&host, "arena", GameMode::Ranked);

    assert_kind(game.best_player(), |k| {
        matches!(k, MatchmakingError::NoActivePlayers { .. })
    });
}

#[test]
fn test_closing_destroys_game_and_joined_entries() {
    let host = player("host", 1000);
    let guest = player("guest", 1000);
    let weak = hosted_game(&host, "arena", GameMode::Ranked).downgrade();
    guest.join_game(&weak.upgrade().unwrap()).unwrap();
    assert_eq!(guest.joined_games().len(), 1);

    assert!(host.close_game());
    assert!(!weak.is_reachable());
    assert!(guest.joined_games().is_empty());
    assert_eq!(guest.to_string(), "[guest, 1000, hosts: nothing, games: {}]");
}

#[test]
fn test_game_survives_host_with_external_handle() {
    let host = player("host", 1000);
    let guest = player("guest", 1000);
    let game = hosted_game(&host, "arena", GameMode::Ranked);
    guest.join_game(&game).unwrap();
    drop(host);

    assert_kind(game.is_allowed(1000), |k| {
        matches!(k, MatchmakingError::HostUnavailable { .. })
    });
    assert_kind(game.play(0), |k| {
        matches!(k, MatchmakingError::HostUnavailable { .. })
    });
    assert_kind(game.render(), |k| {
        matches!(k, MatchmakingError::HostUnavailable { .. })
    });
    // Roster queries that do not need the host still work
    assert_eq!(game.number_of_players(), 1);
    assert_eq!(guest.rating(), 1000);
}

#[test]
fn test_invite_then_leave() {
    let host = player("host", 2000);
    let game = hosted_game(&host, "arena", GameMode::Ranked);
    let a = player("a", 2100);
    let b = player("b", 1500);
    let c = player("c", 1900);

    let failed = host
        .invite_players(&[a.downgrade(), b.downgrade(), c.downgrade()])
        .unwrap();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].ptr_eq(&b.downgrade()));
    assert_eq!(game.number_of_players(), 2);

    assert!(a.leave_game(&game));
    assert!(!a.leave_game(&game));
    assert_eq!(game.number_of_players(), 1);
    assert_eq!(
        game.render().unwrap(),
        "Ranked Game: [arena, host, 2000, player: {[c, 1900]}]"
    );
}

#[test]
fn test_player_rendering_lists_reachable_games() {
    let alice = player("alice", 1000);
    let bob = player("bob", 1000);
    let carol = player("carol", 1000);
    hosted_game(&alice, "alpha", GameMode::Ranked);
    hosted_game(&bob, "beta", GameMode::Unranked);

    carol.join_game(&alice.hosted_game().unwrap()).unwrap();
    carol.join_game(&bob.hosted_game().unwrap()).unwrap();
    assert_eq!(
        carol.to_string(),
        "[carol, 1000, hosts: nothing, games: {alpha, beta}]"
    );

    drop(bob);
    assert_eq!(carol.to_string(), "[carol, 1000, hosts: nothing, games: {alpha}]");
    assert_eq!(alice.to_string(), "[alice, 1000, hosts: alpha, games: {}]");
}
