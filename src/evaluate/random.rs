use std::collections::VecDeque;

use rand::Rng;

/// Where dice get their values from.
///
/// Every [`rand::Rng`] is a random source, so `thread_rng()` or a seeded
/// `StdRng` can be passed wherever one is needed.
pub trait RandomSource {
    /// A value between `low` and `high`, both inclusive.
    fn randint(&mut self, low: i64, high: i64) -> i64;
}

impl<R: Rng> RandomSource for R {
    fn randint(&mut self, low: i64, high: i64) -> i64 {
        self.gen_range(low..=high)
    }
}

/// Dice that roll a fixed sequence of values, in order.
///
/// The values are handed out as they are, whatever range is asked for.
#[derive(Debug, Clone, Default)]
pub struct LoadedDice {
    rolls: VecDeque<i64>,
}

impl LoadedDice {
    pub fn new(rolls: impl IntoIterator<Item = i64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// How many values have not been rolled yet.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for LoadedDice {
    /// # Panics
    ///
    /// Panics when every loaded value has already been rolled.
    fn randint(&mut self, low: i64, high: i64) -> i64 {
        match self.rolls.pop_front() {
            Some(roll) => roll,
            None => panic!("loaded dice ran out of values rolling between {low} and {high}"),
        }
    }
}
