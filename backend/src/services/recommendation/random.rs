//! Random source used for every choice the engine makes
//!
//! Day shuffles, candidate picks and video picks all draw from a
//! [`RandomSource`] so tests can script the sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub trait RandomSource: Send {
    /// Uniform index in `0..bound`. `bound` is always at least 1.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Production source backed by `StdRng`
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound.max(1))
    }
}

/// Replays a fixed sequence of draws (each taken modulo the bound),
/// then returns 0 once exhausted
#[derive(Debug, Default, Clone)]
pub struct ScriptedRandom {
    draws: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = usize>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Always picks the first element and leaves shuffles in a fixed order
    pub fn zeros() -> Self {
        Self::default()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        self.draws.pop_front().unwrap_or(0) % bound.max(1)
    }
}

/// Fisher-Yates shuffle in place
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

/// Uniformly pick one element
pub fn choose<'a, T>(items: &'a [T], rng: &mut dyn RandomSource) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.next_index(items.len()))
    }
}
