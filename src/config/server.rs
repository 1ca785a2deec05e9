//! Server configuration.
//!
//! Host and port of the listening socket, plus the optional turn timeout.
//! Values come from command-line arguments:
//!
//! ```text
//! number-bomb [--host <HOST>] [--port <PORT>] [--turn-timeout <SECS>]
//! ```

use std::time::Duration;

use thiserror::Error;

/// Interface the listener binds to by default (all interfaces).
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8889;

/// Longest accepted input line, in bytes. Longer lines close the connection.
pub const MAX_LINE_LENGTH: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Time a player has to guess before their turn is skipped. `None` waits forever.
    pub turn_timeout: Option<Duration>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),
    #[error("invalid value for {flag}: {value}")]
    InvalidValue { flag: &'static str, value: String },
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            turn_timeout: None,
        }
    }
}

impl ServerConfig {
    /// Parse arguments (without the program name) on top of the defaults.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--host" => {
                    config.host = args.next().ok_or(ConfigError::MissingValue("--host"))?;
                }
                "--port" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--port"))?;
                    config.port = value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue { flag: "--port", value })?;
                }
                "--turn-timeout" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--turn-timeout"))?;
                    let secs: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                        flag: "--turn-timeout",
                        value: value.clone(),
                    })?;
                    // Zero disables the timer.
                    config.turn_timeout = (secs > 0).then(|| Duration::from_secs(secs));
                }
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
