//! Injectable randomness for photo selection and name-based gender guesses.
//!
//! Production code uses [`ThreadRandom`]; tests pin outcomes with
//! [`SequenceRandom`] or reproduce a run with [`SeededRandom`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random draws.
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` is always non-zero at call sites.
    fn next_index(&mut self, len: usize) -> usize;

    /// Fair coin flip.
    fn next_bool(&mut self) -> bool {
        self.next_index(2) == 1
    }

    /// Uniform integer in `low..=high`.
    fn next_in_range(&mut self, low: i32, high: i32) -> i32 {
        let span = (i64::from(high) - i64::from(low) + 1).max(1);
        let offset = self.next_index(usize::try_from(span).unwrap_or(usize::MAX)) as i64;
        (i64::from(low) + offset) as i32
    }
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }

    fn next_bool(&mut self) -> bool {
        rand::thread_rng().gen_bool(0.5)
    }
}

/// Deterministic generator for reproducible runs.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Replays a fixed sequence of raw values, cycling when exhausted.
///
/// Each value is reduced modulo the requested length, so `SequenceRandom::new(vec![2])`
/// always picks the third candidate of a three-element list.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<usize>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of draws served so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn next_index(&mut self, len: usize) -> usize {
        if self.values.is_empty() || len == 0 {
            self.cursor += 1;
            return 0;
        }
        let raw = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        raw % len
    }
}
