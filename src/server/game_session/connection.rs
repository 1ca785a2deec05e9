//! TCP connection actor.
//!
//! One actor per client socket. It reads lines, decodes them into commands,
//! forwards them to the session server and writes replies and broadcasts back
//! through a buffered framed writer. When the socket closes (or a read/write
//! fails) the actor stops and deregisters its player.

use std::net::SocketAddr;

use actix::io::{FramedWrite, WriteHandler};
use actix::prelude::*;
use log::{debug, info, warn};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use uuid::Uuid;

use crate::config::server::MAX_LINE_LENGTH;
use crate::game::notices;
use crate::game::types::{GuessOutcome, JoinOutcome, StartOutcome};
use crate::server::codec::{Command, parse_line};
use crate::server::flood_guard::FloodGuard;
use crate::server::game_session::messages::{Guess, Join, Leave, Outbound, Start, Status};
use crate::server::game_session::server::SessionServer;

pub struct ConnectionActor {
    id: Uuid,
    peer: SocketAddr,
    /// Set once a JOIN succeeds.
    player_name: Option<String>,
    session_addr: Addr<SessionServer>,
    writer: FramedWrite<String, OwnedWriteHalf, LinesCodec>,
    flood_guard: FloodGuard,
}

impl ConnectionActor {
    /// Spawn an actor owning `stream`.
    pub fn open(stream: TcpStream, peer: SocketAddr, session_addr: Addr<SessionServer>) -> Addr<Self> {
        ConnectionActor::create(move |ctx| {
            let (read_half, write_half) = stream.into_split();
            ctx.add_stream(FramedRead::new(
                read_half,
                LinesCodec::new_with_max_length(MAX_LINE_LENGTH),
            ));
            ConnectionActor {
                id: Uuid::new_v4(),
                peer,
                player_name: None,
                session_addr,
                writer: FramedWrite::new(write_half, LinesCodec::new(), ctx),
                flood_guard: FloodGuard::new(),
            }
        })
    }

    /// Write a line straight to this client.
    fn reply(&mut self, line: String) {
        self.writer.write(line);
    }

    fn handle_line(&mut self, line: &str, ctx: &mut Context<Self>) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        match self.flood_guard.record_request(&self.id) {
            // Reading stays paused until the window resets, then the line runs.
            Some(pause) => {
                let line = line.to_string();
                let fut = actix::clock::sleep(pause)
                    .into_actor(self)
                    .map(move |_, act, ctx| act.dispatch(&line, ctx));
                ctx.wait(fut);
            }
            None => self.dispatch(line, ctx),
        }
    }

    fn dispatch(&mut self, line: &str, ctx: &mut Context<Self>) {
        match parse_line(line) {
            Ok(Command::Join { name }) => self.join(name, ctx),
            Ok(Command::Guess { name, value }) => self.guess(name, value, ctx),
            Ok(Command::Start) => self.start_game(ctx),
            Ok(Command::Status) => self.status(ctx),
            Err(e) => warn!("[Connection] {} sent bad input: {}", self.id, e),
        }
    }

    fn join(&mut self, name: String, ctx: &mut Context<Self>) {
        if let Some(current) = &self.player_name {
            let line = notices::already_joined(current);
            self.reply(line);
            return;
        }
        let request = Join {
            name,
            conn: ctx.address().recipient(),
        };
        let fut = self
            .session_addr
            .send(request)
            .into_actor(self)
            .map(|res, act, ctx| match res {
                Ok(JoinOutcome::Joined { name }) => {
                    info!("[Connection] {} joined as {}", act.id, name);
                    act.player_name = Some(name);
                }
                Ok(JoinOutcome::Rejected(reason)) => {
                    debug!("[Connection] {} join rejected: {:?}", act.id, reason);
                    act.reply(notices::join_rejected(&reason));
                }
                Err(e) => act.session_gone(e, ctx),
            });
        ctx.wait(fut);
    }

    fn guess(&mut self, name: String, value: i64, ctx: &mut Context<Self>) {
        let fut = self
            .session_addr
            .send(Guess { name, value })
            .into_actor(self)
            .map(|res, act, ctx| match res {
                Ok(GuessOutcome::OutOfRange { min, max }) => {
                    act.reply(notices::out_of_range(min, max));
                }
                Ok(GuessOutcome::Ignored) => {
                    debug!("[Connection] {} guess ignored", act.id);
                }
                Ok(_) => {}
                Err(e) => act.session_gone(e, ctx),
            });
        ctx.wait(fut);
    }

    fn start_game(&mut self, ctx: &mut Context<Self>) {
        let fut = self
            .session_addr
            .send(Start)
            .into_actor(self)
            .map(|res, act, ctx| match res {
                Ok(StartOutcome::AlreadyStarted(phase)) => {
                    act.reply(notices::start_rejected(phase));
                }
                Ok(StartOutcome::NotEnoughPlayers { count }) => {
                    debug!("[Connection] {} start refused with {} players", act.id, count);
                }
                Ok(StartOutcome::Started { .. }) => {}
                Err(e) => act.session_gone(e, ctx),
            });
        ctx.wait(fut);
    }

    fn status(&mut self, ctx: &mut Context<Self>) {
        let fut = self
            .session_addr
            .send(Status)
            .into_actor(self)
            .map(|res, act, ctx| match res {
                // Queue behind broadcasts already in the mailbox so the
                // snapshot is not written ahead of the events it reflects.
                Ok(text) => ctx.address().do_send(Outbound(text)),
                Err(e) => act.session_gone(e, ctx),
            });
        ctx.wait(fut);
    }

    fn session_gone(&mut self, err: MailboxError, ctx: &mut Context<Self>) {
        warn!("[Connection] {} lost the session server: {}", self.id, err);
        ctx.stop();
    }
}

impl Actor for ConnectionActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("[Connection] New client {} from {}", self.id, self.peer);
    }

    /// Deregister the player, if this connection had one.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(name) = self.player_name.take() {
            self.session_addr.do_send(Leave { name });
        }
        info!("[Connection] Client {} from {} disconnected", self.id, self.peer);
    }
}

impl StreamHandler<Result<String, LinesCodecError>> for ConnectionActor {
    fn handle(&mut self, msg: Result<String, LinesCodecError>, ctx: &mut Self::Context) {
        match msg {
            Ok(line) => self.handle_line(&line, ctx),
            Err(e) => {
                warn!("[Connection] {} read failed: {}", self.id, e);
                ctx.stop();
            }
        }
    }

    fn finished(&mut self, ctx: &mut Self::Context) {
        debug!("[Connection] {} closed by peer", self.id);
        ctx.stop();
    }
}

impl WriteHandler<LinesCodecError> for ConnectionActor {
    fn error(&mut self, err: LinesCodecError, _ctx: &mut Self::Context) -> Running {
        warn!("[Connection] {} write failed: {}", self.id, err);
        Running::Stop
    }
}

impl Handler<Outbound> for ConnectionActor {
    type Result = ();

    fn handle(&mut self, msg: Outbound, _ctx: &mut Self::Context) {
        self.reply(msg.0);
    }
}
