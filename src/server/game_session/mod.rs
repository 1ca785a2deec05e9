pub mod connection;
pub mod messages;
pub mod server;
pub mod turn_timer;

pub use server::SessionServer;
