//! Game session state machine.
//!
//! Holds the roster, the hidden bomb, the admissible range and the turn
//! pointer. Every operation runs to completion on `&mut self`; callers are
//! responsible for serializing access (see `server::game_session::server`).
//! Broadcasts and direct prompts are pushed to players' connections as a side
//! effect, rejections are returned to the caller as outcomes.

use log::{debug, info};

use crate::config::game::{BOMB_MAX, BOMB_MIN, DEFAULT_PLAYER_NAME, MIN_PLAYERS};
use crate::game::connection::Connection;
use crate::game::dealer::Dealer;
use crate::game::notices;
use crate::game::types::{
    GuessOutcome, Hint, JoinOutcome, JoinRejection, Phase, Player, SessionSnapshot, StartOutcome,
};

pub struct Session<C> {
    phase: Phase,
    players: Vec<Player<C>>,
    bomb: Option<i64>,
    min_range: i64,
    max_range: i64,
    current_turn: usize,
    turn_serial: u64,
}

impl<C: Connection> Session<C> {
    pub fn new() -> Self {
        Session {
            phase: Phase::WaitingForPlayers,
            players: Vec::new(),
            bomb: None,
            min_range: BOMB_MIN,
            max_range: BOMB_MAX,
            current_turn: 0,
            turn_serial: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[Player<C>] {
        &self.players
    }

    pub fn range(&self) -> (i64, i64) {
        (self.min_range, self.max_range)
    }

    /// The hidden value. Only for tests and internal checks; never sent to clients
    /// except through the winning announcement.
    pub fn bomb(&self) -> Option<i64> {
        self.bomb
    }

    /// Bumped each time a new turn begins.
    pub fn turn_serial(&self) -> u64 {
        self.turn_serial
    }

    pub fn current_player(&self) -> Option<&Player<C>> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.players.get(self.current_turn)
    }

    pub fn player(&self, name: &str) -> Option<&Player<C>> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Add a player. An empty name becomes the default placeholder.
    pub fn join(&mut self, name: &str, connection: C) -> JoinOutcome {
        let name = match name.trim() {
            "" => DEFAULT_PLAYER_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        if self.phase != Phase::WaitingForPlayers {
            return JoinOutcome::Rejected(JoinRejection::Closed(self.phase));
        }
        if self.player(&name).is_some() {
            return JoinOutcome::Rejected(JoinRejection::NameTaken(name));
        }

        connection.send_line(&notices::welcome());
        self.players.push(Player::new(name.clone(), connection));
        self.broadcast(&notices::player_joined(&name, self.players.len()));
        debug!("[Session] Player {} joined, roster size {}", name, self.players.len());
        JoinOutcome::Joined { name }
    }

    /// Remove a player. Ends a running game without a winner.
    /// Returns false if no player has this name.
    pub fn leave(&mut self, name: &str) -> bool {
        let Some(idx) = self.players.iter().position(|p| p.name == name) else {
            return false;
        };
        self.players.remove(idx);
        self.broadcast(&notices::player_left(name, self.players.len()));
        debug!("[Session] Player {} left, roster size {}", name, self.players.len());

        if self.phase == Phase::Playing {
            self.broadcast(&notices::aborted_no_winner());
            self.finish();
        }
        true
    }

    /// Deal the bomb and the turn order, then hand the first turn out.
    pub fn start(&mut self, dealer: &mut dyn Dealer) -> StartOutcome {
        if self.phase != Phase::WaitingForPlayers {
            return StartOutcome::AlreadyStarted(self.phase);
        }
        if self.players.len() < MIN_PLAYERS {
            self.broadcast(&notices::not_enough_players(MIN_PLAYERS));
            return StartOutcome::NotEnoughPlayers { count: self.players.len() };
        }

        self.phase = Phase::ReadyToStart;
        self.bomb = Some(dealer.pick_bomb(BOMB_MIN, BOMB_MAX));
        let order = dealer.shuffle_order(self.players.len());
        self.reorder_players(&order);
        for (idx, player) in self.players.iter_mut().enumerate() {
            player.turn_index = Some(idx);
            player.last_guess = None;
        }
        self.current_turn = 0;
        self.min_range = BOMB_MIN;
        self.max_range = BOMB_MAX;

        let names: Vec<String> = self.players.iter().map(|p| p.name.clone()).collect();
        self.broadcast(&notices::game_started());
        self.broadcast(&notices::bomb_armed(self.min_range, self.max_range));
        self.broadcast(&notices::turn_order(&names));
        self.phase = Phase::Playing;
        info!("[Session] Game started with {} players", names.len());
        self.notify_turn();
        StartOutcome::Started { order: names }
    }

    /// Apply a guess on behalf of `name`.
    pub fn guess(&mut self, name: &str, value: i64) -> GuessOutcome {
        if self.phase != Phase::Playing {
            return GuessOutcome::Ignored;
        }
        let Some(bomb) = self.bomb else {
            return GuessOutcome::Ignored;
        };
        match self.players.get(self.current_turn) {
            Some(current) if current.name == name => {}
            _ => return GuessOutcome::Ignored,
        }
        if value < self.min_range || value > self.max_range {
            return GuessOutcome::OutOfRange {
                min: self.min_range,
                max: self.max_range,
            };
        }

        let guesser = &mut self.players[self.current_turn];
        guesser.last_guess = Some(value);
        let guesser_name = guesser.name.clone();

        if value == bomb {
            self.broadcast(&notices::detonated(&guesser_name, value));
            self.broadcast(&notices::winner(&guesser_name));
            self.finish();
            return GuessOutcome::Detonated { winner: guesser_name };
        }

        let hint = if value > bomb {
            self.max_range = value - 1;
            Hint::Smaller
        } else {
            self.min_range = value + 1;
            Hint::Larger
        };
        self.broadcast(&notices::narrowed(
            &guesser_name,
            value,
            hint,
            self.min_range,
            self.max_range,
        ));

        self.advance_turn();
        GuessOutcome::Narrowed {
            hint,
            min: self.min_range,
            max: self.max_range,
            next_player: self.players[self.current_turn].name.clone(),
        }
    }

    /// Skip the turn identified by `serial` if it is still the current one.
    /// Returns the name of the player who lost their turn.
    pub fn expire_turn(&mut self, serial: u64) -> Option<String> {
        if self.phase != Phase::Playing || serial != self.turn_serial {
            return None;
        }
        let name = self.players.get(self.current_turn)?.name.clone();
        self.broadcast(&notices::turn_expired(&name));
        self.advance_turn();
        Some(name)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let playing = self.phase == Phase::Playing;
        SessionSnapshot {
            phase: self.phase,
            players: self.players.iter().map(|p| p.name.clone()).collect(),
            range: playing.then_some((self.min_range, self.max_range)),
            current_player: self.current_player().map(|p| p.name.clone()),
        }
    }

    pub fn status(&self) -> String {
        notices::status(&self.snapshot())
    }

    /// Send a line to every joined player whose connection is still open.
    pub fn broadcast(&self, line: &str) {
        for player in self.players.iter().filter(|p| p.connection.is_open()) {
            player.connection.send_line(line);
        }
    }

    fn advance_turn(&mut self) {
        self.current_turn = (self.current_turn + 1) % self.players.len();
        self.notify_turn();
    }

    fn notify_turn(&mut self) {
        if self.phase != Phase::Playing || self.current_turn >= self.players.len() {
            return;
        }
        self.turn_serial += 1;
        let player = &self.players[self.current_turn];
        player
            .connection
            .send_line(&notices::your_turn(self.min_range, self.max_range));
        let line = notices::turn_of(&player.name, self.min_range, self.max_range);
        self.broadcast(&line);
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        self.broadcast(&notices::game_over());
        info!("[Session] Game finished");
    }

    /// Rearrange the roster by `order`. Falls back to the current order if
    /// `order` is not a permutation of the roster indices.
    fn reorder_players(&mut self, order: &[usize]) {
        let mut seen = vec![false; self.players.len()];
        let valid = order.len() == self.players.len()
            && order
                .iter()
                .all(|&i| i < seen.len() && !std::mem::replace(&mut seen[i], true));
        if !valid {
            return;
        }
        let mut slots: Vec<Option<Player<C>>> = self.players.drain(..).map(Some).collect();
        self.players = order.iter().filter_map(|&i| slots[i].take()).collect();
    }
}

impl<C: Connection> Default for Session<C> {
    fn default() -> Self {
        Self::new()
    }
}
