//! Randomness used when a game starts: the bomb value and the turn order.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub trait Dealer {
    /// Pick the bomb uniformly from the closed interval `[min, max]`.
    fn pick_bomb(&mut self, min: i64, max: i64) -> i64;

    /// Return a permutation of `0..count` giving the turn order.
    fn shuffle_order(&mut self, count: usize) -> Vec<usize>;
}

pub struct RandomDealer {
    rng: StdRng,
}

impl RandomDealer {
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomDealer {
    fn default() -> Self {
        Self::new()
    }
}

impl Dealer for RandomDealer {
    fn pick_bomb(&mut self, min: i64, max: i64) -> i64 {
        self.rng.random_range(min..=max)
    }

    fn shuffle_order(&mut self, count: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..count).collect();
        order.shuffle(&mut self.rng);
        order
    }
}

/// Dealer with a predetermined bomb and turn order.
#[cfg(test)]
pub struct FixedDealer {
    pub bomb: i64,
    pub order: Vec<usize>,
}

#[cfg(test)]
impl FixedDealer {
    /// Keeps join order.
    pub fn in_join_order(bomb: i64) -> Self {
        Self { bomb, order: Vec::new() }
    }
}

#[cfg(test)]
impl Dealer for FixedDealer {
    fn pick_bomb(&mut self, _min: i64, _max: i64) -> i64 {
        self.bomb
    }

    fn shuffle_order(&mut self, count: usize) -> Vec<usize> {
        if self.order.len() == count {
            self.order.clone()
        } else {
            (0..count).collect()
        }
    }
}
