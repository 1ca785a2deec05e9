//! Game session server actor.
//!
//! The single owner of the process-wide `Session`. Every connection talks to it
//! through messages, and actix hands those to `handle` one at a time, so each
//! session operation (and the broadcasts it enqueues) completes before the next
//! one starts.

use std::time::Duration;

use actix::prelude::*;
use log::{debug, info, warn};

use crate::game::connection::Connection;
use crate::game::dealer::Dealer;
use crate::game::state::Session;
use crate::game::types::Phase;
use crate::server::game_session::messages::{Guess, Join, Leave, Outbound, Start, Status};
use crate::server::game_session::turn_timer;

impl Connection for Recipient<Outbound> {
    fn send_line(&self, line: &str) {
        self.do_send(Outbound(line.to_string()));
    }

    fn is_open(&self) -> bool {
        self.connected()
    }
}

pub struct SessionServer {
    pub(crate) session: Session<Recipient<Outbound>>,
    dealer: Box<dyn Dealer>,
    pub(crate) turn_timeout: Option<Duration>,
    pub(crate) turn_timer: Option<SpawnHandle>,
}

impl SessionServer {
    pub fn new(dealer: Box<dyn Dealer>, turn_timeout: Option<Duration>) -> Self {
        Self {
            session: Session::new(),
            dealer,
            turn_timeout,
            turn_timer: None,
        }
    }

    /// Log the current session snapshot at debug level.
    pub(crate) fn log_state(&self) {
        match serde_json::to_string(&self.session.snapshot()) {
            Ok(json) => debug!("[Session] State: {}", json),
            Err(e) => warn!("[Session] Failed to serialize snapshot: {}", e),
        }
    }

    /// A finished game whose last player left makes room for a new game.
    fn recycle_if_empty(&mut self) {
        if self.session.phase() == Phase::Finished && self.session.players().is_empty() {
            self.session = Session::new();
            info!("[Session] Finished game emptied, waiting for players again");
        }
    }
}

impl Actor for SessionServer {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("[Session] Session server started");
    }
}

impl Handler<Join> for SessionServer {
    type Result = MessageResult<Join>;

    fn handle(&mut self, msg: Join, _ctx: &mut Self::Context) -> Self::Result {
        let outcome = self.session.join(&msg.name, msg.conn);
        self.log_state();
        MessageResult(outcome)
    }
}

impl Handler<Leave> for SessionServer {
    type Result = ();

    fn handle(&mut self, msg: Leave, ctx: &mut Self::Context) -> Self::Result {
        let serial = self.session.turn_serial();
        if self.session.leave(&msg.name) {
            info!("[Session] Player {} removed", msg.name);
        }
        turn_timer::sync(self, ctx, serial);
        self.recycle_if_empty();
        self.log_state();
    }
}

impl Handler<Start> for SessionServer {
    type Result = MessageResult<Start>;

    fn handle(&mut self, _msg: Start, ctx: &mut Self::Context) -> Self::Result {
        let serial = self.session.turn_serial();
        let outcome = self.session.start(self.dealer.as_mut());
        turn_timer::sync(self, ctx, serial);
        self.log_state();
        MessageResult(outcome)
    }
}

impl Handler<Guess> for SessionServer {
    type Result = MessageResult<Guess>;

    fn handle(&mut self, msg: Guess, ctx: &mut Self::Context) -> Self::Result {
        let serial = self.session.turn_serial();
        let outcome = self.session.guess(&msg.name, msg.value);
        debug!("[Session] Guess {} from {}: {:?}", msg.value, msg.name, outcome);
        turn_timer::sync(self, ctx, serial);
        self.log_state();
        MessageResult(outcome)
    }
}

impl Handler<Status> for SessionServer {
    type Result = MessageResult<Status>;

    fn handle(&mut self, _msg: Status, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.session.status())
    }
}
