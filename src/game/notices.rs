//! Outbound notification lines.
//!
//! Keep all user-facing wording here so the session logic only decides *when* a
//! notice is sent. A returned string may span several lines; the writer
//! terminates it with a final newline.

use crate::game::types::{Hint, JoinRejection, Phase, SessionSnapshot};

pub fn welcome() -> String {
    "Welcome to Number Bomb! Waiting for other players...".to_string()
}

pub fn player_joined(name: &str, count: usize) -> String {
    format!("Player {} joined the game, players: {}", name, count)
}

pub fn player_left(name: &str, count: usize) -> String {
    format!("Player {} left the game, players: {}", name, count)
}

pub fn join_rejected(reason: &JoinRejection) -> String {
    match reason {
        JoinRejection::Closed(phase) => {
            format!("Cannot join right now, the game is {}", phase)
        }
        JoinRejection::NameTaken(name) => {
            format!("Name {} is already taken, please pick another one", name)
        }
    }
}

pub fn already_joined(name: &str) -> String {
    format!("This connection already plays as {}", name)
}

pub fn not_enough_players(min_players: usize) -> String {
    format!("At least {} players are needed to start the game!", min_players)
}

pub fn start_rejected(phase: Phase) -> String {
    format!("Cannot start, the game is {}", phase)
}

pub fn game_started() -> String {
    "=== Game started! ===".to_string()
}

pub fn bomb_armed(min: i64, max: i64) -> String {
    format!("The bomb is set, range: {}-{}", min, max)
}

pub fn turn_order(names: &[String]) -> String {
    let mut msg = String::from("Turn order:");
    for (i, name) in names.iter().enumerate() {
        msg.push_str(&format!("\n{}. {}", i + 1, name));
    }
    msg
}

pub fn your_turn(min: i64, max: i64) -> String {
    format!("Your turn! Enter a number between {} and {}:", min, max)
}

pub fn turn_of(name: &str, min: i64, max: i64) -> String {
    format!("{} is guessing (range: {}-{})", name, min, max)
}

pub fn out_of_range(min: i64, max: i64) -> String {
    format!("The number must be between {} and {}!", min, max)
}

pub fn narrowed(name: &str, guess: i64, hint: Hint, min: i64, max: i64) -> String {
    let direction = match hint {
        Hint::Smaller => "smaller",
        Hint::Larger => "larger",
    };
    format!(
        "{} guessed {} - the bomb is {}\nNew range: {}-{}",
        name, guess, direction, min, max
    )
}

pub fn detonated(name: &str, guess: i64) -> String {
    format!("{} guessed {} - BOOM! The bomb exploded!", name, guess)
}

pub fn winner(name: &str) -> String {
    format!("Winner: {}!", name)
}

pub fn turn_expired(name: &str) -> String {
    format!("{} ran out of time, turn skipped", name)
}

pub fn aborted_no_winner() -> String {
    "A player left during the game, it ends without a winner".to_string()
}

pub fn game_over() -> String {
    "=== Game over ===".to_string()
}

pub fn status(snapshot: &SessionSnapshot) -> String {
    let mut lines = vec![
        "=== Game status ===".to_string(),
        format!("Phase: {}", snapshot.phase),
        format!("Players: {}", snapshot.players.len()),
    ];
    if let Some((min, max)) = snapshot.range {
        lines.push(format!("Current range: {}-{}", min, max));
    }
    if let Some(name) = &snapshot.current_player {
        lines.push(format!("Current player: {}", name));
    }
    lines.join("\n")
}
