//! Game layer.
//!
//! Pure game logic with no networking: the session state machine, the players,
//! the randomness it depends on, and the wording of every notification.

pub mod connection;
pub mod dealer;
pub mod notices;
pub mod state;
pub mod types;
