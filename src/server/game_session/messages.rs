use actix::prelude::*;

use crate::game::types::{GuessOutcome, JoinOutcome, StartOutcome};

/// A line to write to one client. Sent by the session for broadcasts and prompts.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct Outbound(pub String);

/// Message: a connection asks to join under `name`.
#[derive(Message)]
#[rtype(result = "JoinOutcome")]
pub struct Join {
    pub name: String,
    pub conn: Recipient<Outbound>,
}

/// Message: a joined player disconnected.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Leave {
    pub name: String,
}

/// Message: someone asked to start the game.
#[derive(Message)]
#[rtype(result = "StartOutcome")]
pub struct Start;

/// Message: a guess on behalf of `name`.
#[derive(Message)]
#[rtype(result = "GuessOutcome")]
pub struct Guess {
    pub name: String,
    pub value: i64,
}

/// Message: read-only status snapshot, returned as reply text.
#[derive(Message)]
#[rtype(result = "String")]
pub struct Status;
