//! The random-choice capability the selector draws from.
//!
//! Production sessions use [`RandomChooser`]; tests plug in
//! [`ScriptedChooser`] to get exact, repeatable selections.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniform choice over `0..len`.
pub trait Chooser {
    /// Return a position in `0..len`. Callers never pass `len == 0`.
    fn choose_index(&mut self, len: usize) -> usize;
}

impl<C: Chooser + ?Sized> Chooser for &mut C {
    fn choose_index(&mut self, len: usize) -> usize {
        (**self).choose_index(len)
    }
}

impl<C: Chooser + ?Sized> Chooser for Box<C> {
    fn choose_index(&mut self, len: usize) -> usize {
        (**self).choose_index(len)
    }
}

/// Chooser backed by a small, fast PRNG.
#[derive(Debug, Clone)]
pub struct RandomChooser {
    rng: SmallRng,
}

impl RandomChooser {
    /// Seed from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic chooser; the same seed yields the same quiz.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Chooser for RandomChooser {
    fn choose_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed list of picks, wrapping each into range with `% len`.
///
/// Once the script runs out every pick is `0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChooser {
    picks: VecDeque<usize>,
    calls: usize,
}

impl ScriptedChooser {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            calls: 0,
        }
    }

    /// Number of picks requested so far.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Chooser for ScriptedChooser {
    fn choose_index(&mut self, len: usize) -> usize {
        self.calls += 1;
        self.picks.pop_front().unwrap_or(0) % len
    }
}
