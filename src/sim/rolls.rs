//! Random draws used by gameplay
//!
//! Everything random in a run (room door locks, drawer contents, where the
//! chaser appears) goes through `RollSource`, so a test can script the draws.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::collections::VecDeque;

/// Source of uniform draws in `[0, 1)`
pub trait RollSource {
    fn roll(&mut self) -> f32;
}

impl RollSource for Pcg32 {
    fn roll(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded generator for a run
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of draws, then repeats the last one.
/// An empty script always yields 0.0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    queue: VecDeque<f32>,
    last: f32,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = f32>) -> Self {
        Self {
            queue: rolls.into_iter().collect(),
            last: 0.0,
        }
    }

    /// Same value forever
    pub fn constant(value: f32) -> Self {
        Self {
            queue: VecDeque::new(),
            last: value,
        }
    }

    pub fn push(&mut self, value: f32) {
        self.queue.push_back(value);
    }
}

impl RollSource for ScriptedRolls {
    fn roll(&mut self) -> f32 {
        if let Some(value) = self.queue.pop_front() {
            self.last = value;
        }
        self.last
    }
}
