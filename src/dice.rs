//! Random source used by enemy attack triggers and the spawner.
//!
//! Game code never talks to `rand` directly; it rolls a [`Dice`], so tests
//! can script every outcome.

use std::collections::VecDeque;

use rand::Rng;

/// An inclusive integer draw.
pub trait Dice {
    fn roll(&mut self, low: i32, high: i32) -> i32;
}

/// Adapter from any `rand` generator.
#[derive(Clone, Debug)]
pub struct RngDice<R>(pub R);

impl<R: Rng> Dice for RngDice<R> {
    fn roll(&mut self, low: i32, high: i32) -> i32 {
        self.0.gen_range(low..=high)
    }
}

/// Replays queued values.  Once the queue runs dry every roll returns the
/// low bound, which never fires an attack.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    queue: VecDeque<i32>,
    calls: usize,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        ScriptedDice {
            queue: rolls.into_iter().collect(),
            calls: 0,
        }
    }

    pub fn push(&mut self, value: i32) {
        self.queue.push_back(value);
    }

    /// Number of rolls requested so far.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, low: i32, high: i32) -> i32 {
        self.calls += 1;
        self.queue
            .pop_front()
            .map(|v| v.clamp(low, high))
            .unwrap_or(low)
    }
}
