// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the networking side of the game:
//! - Line protocol parsing
//! - TCP listener (accept loop)
//! - Game session orchestration (session actor, per-connection actors, turn timer)
//! - Per-connection flood protection

pub mod codec;
pub mod flood_guard;
pub mod game_session;
pub mod listener;
