//! Capability token guarding roster mutation

/// Proof that a roster change was requested by a player joining or leaving.
///
/// `Game::add_player` and `Game::remove_player` demand a `GameKey`, and only
/// `Player::join_game` and `Player::leave_game` can mint one. The key carries
/// no data and is never inspected. Code outside the player module cannot
/// construct it:
///
/// ```compile_fail
/// use mmr_parlor::player::GameKey;
///
/// let _key = GameKey::new();
/// ```
///
/// ```compile_fail
/// use mmr_parlor::player::GameKey;
///
/// let _key = GameKey { _seal: () };
/// ```
#[derive(Debug)]
pub struct GameKey {
    _seal: (),
}

impl GameKey {
    pub(super) fn new() -> Self {
        Self { _seal: () }
    }
}
