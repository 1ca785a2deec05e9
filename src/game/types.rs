//! Core game types: phases, players, and the outcomes returned by session operations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a game session. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    WaitingForPlayers,
    ReadyToStart,
    Playing,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::WaitingForPlayers => "WAITING_FOR_PLAYERS",
            Phase::ReadyToStart => "READY_TO_START",
            Phase::Playing => "PLAYING",
            Phase::Finished => "FINISHED",
        };
        f.write_str(name)
    }
}

/// A joined player and the connection used to reach them.
#[derive(Debug, Clone)]
pub struct Player<C> {
    pub name: String,
    pub connection: C,
    /// Position in the turn order, assigned when the game starts.
    pub turn_index: Option<usize>,
    pub last_guess: Option<i64>,
}

impl<C> Player<C> {
    pub fn new(name: String, connection: C) -> Self {
        Self {
            name,
            connection,
            turn_index: None,
            last_guess: None,
        }
    }
}

/// Which way the bomb lies relative to a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hint {
    Smaller,
    Larger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinRejection {
    /// The game is already running or over.
    Closed(Phase),
    NameTaken(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined { name: String },
    Rejected(JoinRejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started { order: Vec<String> },
    /// A failure notice was broadcast, nothing changed.
    NotEnoughPlayers { count: usize },
    AlreadyStarted(Phase),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Wrong phase or not this player's turn. Nobody is told.
    Ignored,
    OutOfRange { min: i64, max: i64 },
    Narrowed {
        hint: Hint,
        min: i64,
        max: i64,
        next_player: String,
    },
    Detonated { winner: String },
}

/// Read-only view of a session, used for STATUS replies and debug logging.
/// The bomb value is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub players: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<(i64, i64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_player: Option<String>,
}
