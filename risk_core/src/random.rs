//! Injectable randomness
//!
//! Every roll in the engine goes through a [`RandomSource`]. Production code
//! uses a seeded or entropy-seeded ChaCha generator; tests can script exact
//! draws with [`ScriptedSource`].

use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Uniform integer draws
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `min..=max`. If `max < min` the bounds are swapped.
    fn range(&self, min: i64, max: i64) -> i64;

    /// Roll in 1..=100
    fn percent(&self) -> i64 {
        self.range(1, 100)
    }

    /// True with `chance` percent probability
    fn roll_under(&self, chance: i64) -> bool {
        self.percent() <= chance
    }

    /// Fair coin; true means the first party
    fn coin_flip(&self) -> bool {
        self.range(0, 1) == 0
    }
}

fn ordered(min: i64, max: i64) -> (i64, i64) {
    if max < min {
        (max, min)
    } else {
        (min, max)
    }
}

/// ChaCha8-backed source, safe to share across threads
#[derive(Debug)]
pub struct ChaChaSource {
    rng: Mutex<ChaCha8Rng>,
}

impl ChaChaSource {
    /// Deterministic source for a given seed
    pub fn seeded(seed: u64) -> Self {
        ChaChaSource {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        ChaChaSource {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }
}

impl RandomSource for ChaChaSource {
    fn range(&self, min: i64, max: i64) -> i64 {
        let (lo, hi) = ordered(min, max);
        self.rng.lock().gen_range(lo..=hi)
    }
}

/// Replays a fixed sequence of draws
///
/// Each value is clamped into the requested range. Once the script runs out
/// every draw returns the range minimum.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    values: Mutex<VecDeque<i64>>,
}

impl ScriptedSource {
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        ScriptedSource {
            values: Mutex::new(values.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.lock().len()
    }
}

impl RandomSource for ScriptedSource {
    fn range(&self, min: i64, max: i64) -> i64 {
        let (lo, hi) = ordered(min, max);
        match self.values.lock().pop_front() {
            Some(v) => v.clamp(lo, hi),
            None => lo,
        }
    }
}
