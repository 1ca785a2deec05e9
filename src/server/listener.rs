//! TCP listener.
//!
//! Binds the configured address and hands every accepted socket to its own
//! `ConnectionActor`, all sharing one `SessionServer`.

use std::io;

use actix::Addr;
use log::{info, warn};
use tokio::net::TcpListener;

use crate::config::server::ServerConfig;
use crate::server::game_session::connection::ConnectionActor;
use crate::server::game_session::server::SessionServer;

/// Bind the listening socket. Failure here is fatal for the process.
pub async fn bind(config: &ServerConfig) -> io::Result<TcpListener> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("[Listener] Listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Accept connections forever. Must run inside an actix system.
pub async fn serve(listener: TcpListener, session_addr: Addr<SessionServer>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                if let Err(e) = stream.set_nodelay(true) {
                    warn!("[Listener] Could not set TCP_NODELAY for {}: {}", peer, e);
                }
                ConnectionActor::open(stream, peer, session_addr.clone());
            }
            // Accept errors (e.g. too many open files) only affect the pending client.
            Err(e) => warn!("[Listener] Accept failed: {}", e),
        }
    }
}
