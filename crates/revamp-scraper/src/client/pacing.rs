//! Request pacing and identity rotation behind an injectable source of
//! randomness.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the two non-deterministic choices made before every request:
/// how long to wait, and which user agent to present.
pub trait Pacer: Send + Sync {
    /// Delay to sleep before the next network call.
    fn next_delay(&self) -> Duration;

    /// Uniformly chosen index in `0..len`. Returns `0` when `len` is `0`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform random pacing over `[min, max]` with uniform user-agent choice.
///
/// Seeded construction makes the full sequence of delays and picks
/// reproducible across runs.
#[derive(Debug)]
pub struct RandomPacer {
    min_ms: u64,
    max_ms: u64,
    rng: Mutex<StdRng>,
}

impl RandomPacer {
    /// Bounds are swapped if given in the wrong order.
    #[must_use]
    pub fn new(min: Duration, max: Duration, seed: Option<u64>) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            min_ms: duration_ms(min),
            max_ms: duration_ms(max),
            rng: Mutex::new(rng),
        }
    }

    /// Pacer that never waits. Still rotates user agents.
    #[must_use]
    pub fn immediate(seed: Option<u64>) -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, seed)
    }

    #[must_use]
    pub fn bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.min_ms),
            Duration::from_millis(self.max_ms),
        )
    }
}

impl Pacer for RandomPacer {
    fn next_delay(&self) -> Duration {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Duration::from_millis(rng.random_range(self.min_ms..=self.max_ms))
    }

    fn pick(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..len)
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
