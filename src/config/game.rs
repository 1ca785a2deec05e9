/// Game configuration constants.
/// 
/// This module defines the gameplay parameters: the bomb interval, the minimum
/// roster size needed to start, and the name given to players who join without one.
pub const BOMB_MIN: i64 = 0; // Lowest possible bomb value (inclusive).

/// Highest possible bomb value (inclusive).
pub const BOMB_MAX: i64 = 200;

/// Minimum number of players required to start a game.
pub const MIN_PLAYERS: usize = 2;

/// Display name used when JOIN carries an empty name.
pub const DEFAULT_PLAYER_NAME: &str = "Player";
