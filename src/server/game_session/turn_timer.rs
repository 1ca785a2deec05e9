//! Turn timer management for the SessionServer.
//! Arms a timer for each new turn and skips the holder when it fires.

use actix::prelude::*;
use log::info;

use crate::game::types::Phase;
use crate::server::game_session::server::SessionServer;

/// Bring the timer in line with the session after an operation.
///
/// `serial_before` is the session's turn serial before the operation ran. A
/// different serial now means a new turn began and gets a fresh timer; a game
/// that is no longer running gets none.
pub fn sync(this: &mut SessionServer, ctx: &mut Context<SessionServer>, serial_before: u64) {
    if this.session.phase() != Phase::Playing {
        cancel(this, ctx);
        return;
    }
    if this.session.turn_serial() != serial_before {
        cancel(this, ctx);
        arm(this, ctx);
    }
}

fn arm(this: &mut SessionServer, ctx: &mut Context<SessionServer>) {
    let Some(timeout) = this.turn_timeout else {
        return;
    };
    let serial = this.session.turn_serial();
    let handle = ctx.run_later(timeout, move |act, ctx| {
        act.turn_timer = None;
        expire(act, ctx, serial);
    });
    this.turn_timer = Some(handle);
}

fn cancel(this: &mut SessionServer, ctx: &mut Context<SessionServer>) {
    if let Some(handle) = this.turn_timer.take() {
        ctx.cancel_future(handle);
    }
}

/// Skip the turn `serial` if it is still running.
fn expire(this: &mut SessionServer, ctx: &mut Context<SessionServer>, serial: u64) {
    if let Some(name) = this.session.expire_turn(serial) {
        info!("[Session] Turn of {} timed out", name);
        sync(this, ctx, serial);
        this.log_state();
    }
}
