//! Line protocol parsing.
//!
//! Each inbound line is `VERB:rest`, split at the first colon. The verb set is
//! fixed and case-sensitive:
//!
//! - `JOIN:<name>`
//! - `GUESS:<name>:<integer>`
//! - `START:`
//! - `STATUS:`
//!
//! Outbound lines are plain text produced by `game::notices`; framing (the
//! trailing `\n`) is left to the `LinesCodec` writer.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join { name: String },
    Guess { name: String, value: i64 },
    Start,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognized command: {0}")]
    Unrecognized(String),
    #[error("malformed GUESS payload: {0}")]
    MalformedGuess(String),
}

/// Split a line at its first colon. A line without a colon is all verb.
fn split_verb(line: &str) -> (&str, &str) {
    line.split_once(':').unwrap_or((line, ""))
}

pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    let (verb, rest) = split_verb(line.trim());
    match verb {
        "JOIN" => Ok(Command::Join { name: rest.trim().to_string() }),
        "GUESS" => parse_guess(rest),
        "START" => Ok(Command::Start),
        "STATUS" => Ok(Command::Status),
        other => Err(ParseError::Unrecognized(other.to_string())),
    }
}

fn parse_guess(rest: &str) -> Result<Command, ParseError> {
    let malformed = || ParseError::MalformedGuess(rest.to_string());
    let (name, value) = rest.split_once(':').ok_or_else(malformed)?;
    let value = value.trim().parse::<i64>().map_err(|_| malformed())?;
    Ok(Command::Guess { name: name.to_string(), value })
}
