//! Random source for slot assignment.
//!
//! Joining participants get a uniformly random open slot, so arriving
//! first buys no draft position. The draw goes through [`SlotPicker`] so
//! tests (and reproducible demo drafts) can fix the outcome.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses which open slot a joining participant receives.
pub trait SlotPicker: Send + 'static {
    /// Returns an index into the list of `open` slots.
    ///
    /// Only called with `open > 0`. Out-of-range answers are reduced
    /// modulo `open` by the caller.
    fn pick(&mut self, open: usize) -> usize;
}

/// Uniform draw from a `StdRng`.
#[derive(Debug)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    /// Seeded from the thread-local generator.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Fixed seed: the same seed and join order give the same slots.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotPicker for RandomPicker {
    fn pick(&mut self, open: usize) -> usize {
        self.rng.random_range(0..open)
    }
}

/// Replays a fixed list of indexes, then falls back to 0 (the lowest open
/// slot).
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    script: VecDeque<usize>,
}

impl ScriptedPicker {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Always hands out the lowest open slot, so joins fill 1, 2, 3, 4.
    pub fn in_order() -> Self {
        Self::default()
    }
}

impl SlotPicker for ScriptedPicker {
    fn pick(&mut self, _open: usize) -> usize {
        self.script.pop_front().unwrap_or(0)
    }
}
