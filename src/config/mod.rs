/// Main configuration module.
/// 
/// Re-exports submodules for game, server and flood guard configuration.
pub mod flood_guard;
pub mod game;
pub mod server;
