use std::time::{Duration, Instant};

use log::warn;
use uuid::Uuid;

use crate::config::flood_guard::MAX_REQUESTS_PER_SECOND;

const WINDOW: Duration = Duration::from_secs(1);

/// Tracks inbound line rate for a single connection.
pub struct FloodGuard {
    // Start of the current one-second window
    last_tick: Instant,
    // Lines received in the current window
    requests_this_tick: u32,
    // Whether a warning was already logged for this window
    warned_this_tick: bool,
}

impl FloodGuard {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            requests_this_tick: 0,
            warned_this_tick: false,
        }
    }

    /// Call for every non-empty inbound line.
    /// Returns how long to pause reading before the line may be handled, or
    /// `None` when it is within the limit. A paused line is never dropped.
    pub fn record_request(&mut self, connection: &Uuid) -> Option<Duration> {
        self.record_request_at(connection, Instant::now())
    }

    fn record_request_at(&mut self, connection: &Uuid, now: Instant) -> Option<Duration> {
        self.tick(now);
        if self.requests_this_tick < MAX_REQUESTS_PER_SECOND {
            self.requests_this_tick += 1;
            return None;
        }
        if !self.warned_this_tick {
            warn!(
                "[FloodGuard] Connection {} exceeded {} lines per second, pausing input",
                connection, MAX_REQUESTS_PER_SECOND
            );
            self.warned_this_tick = true;
        }
        // The delayed line opens the next window.
        let pause = WINDOW.saturating_sub(now.duration_since(self.last_tick));
        self.last_tick += WINDOW;
        self.requests_this_tick = 1;
        self.warned_this_tick = false;
        Some(pause)
    }

    /// Reset per-second counters if a new second has started.
    fn tick(&mut self, now: Instant) {
        if now.duration_since(self.last_tick) >= WINDOW {
            self.last_tick = now;
            self.requests_this_tick = 0;
            self.warned_this_tick = false;
        }
    }
}

impl Default for FloodGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pauses_lines_over_the_limit() {
        let id = Uuid::new_v4();
        let mut guard = FloodGuard::new();
        let now = guard.last_tick;
        for _ in 0..MAX_REQUESTS_PER_SECOND {
            assert_eq!(guard.record_request_at(&id, now), None);
        }
        assert_eq!(guard.record_request_at(&id, now), Some(WINDOW));
        assert_eq!(
            guard.record_request_at(&id, now + Duration::from_millis(100)),
            None
        );
    }

    #[test]
    fn test_pause_covers_rest_of_window() {
        let id = Uuid::new_v4();
        let mut guard = FloodGuard::new();
        let now = guard.last_tick;
        for _ in 0..MAX_REQUESTS_PER_SECOND {
            guard.record_request_at(&id, now);
        }
        let later = now + Duration::from_millis(400);
        assert_eq!(
            guard.record_request_at(&id, later),
            Some(Duration::from_millis(600))
        );
    }

    #[test]
    fn test_every_line_of_a_long_burst_is_admitted() {
        let id = Uuid::new_v4();
        let mut guard = FloodGuard::new();
        let mut now = guard.last_tick;
        let mut paused = 0;
        for _ in 0..(3 * MAX_REQUESTS_PER_SECOND) {
            if let Some(pause) = guard.record_request_at(&id, now) {
                paused += 1;
                now += pause;
            }
        }
        assert_eq!(paused, 2);
    }

    #[test]
    fn test_window_resets_after_a_second() {
        let id = Uuid::new_v4();
        let mut guard = FloodGuard::new();
        let now = guard.last_tick;
        for _ in 0..MAX_REQUESTS_PER_SECOND {
            guard.record_request_at(&id, now);
        }
        assert_eq!(guard.record_request_at(&id, now + WINDOW), None);
    }
}
