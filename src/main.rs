//! Main entry point for the number bomb server.
//!
//! Initializes logging and the actor system, starts the single game session
//! actor, and accepts TCP clients speaking the line protocol.

use std::io;

use actix::Actor;
use env_logger::Env;

use config::server::ServerConfig;
use game::dealer::RandomDealer;
use server::game_session::SessionServer;

pub mod config;
mod game;
mod server;

#[cfg(test)]
mod tests;

#[actix::main]
async fn main() -> io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_args(std::env::args().skip(1))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // Start the SessionServer actor (owns the one game every client joins).
    let session_addr = SessionServer::new(Box::new(RandomDealer::new()), config.turn_timeout).start();

    let listener = server::listener::bind(&config).await?;
    server::listener::serve(listener, session_addr).await;
    Ok(())
}
