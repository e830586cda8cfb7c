//! Per-worker random-number streams for the parallel transition pass.
//!
//! Each rayon worker draws from its own `StdRng` so concurrent draws never
//! contend on shared generator state and never replay another worker's
//! sequence. The pool is reseeded at the start of every step from OS-backed
//! entropy; no caller-supplied seed exists, so runs are not reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, MutexGuard, PoisonError};

// Odd multiplier (the splitmix64 increment) keeps per-slot seeds distinct
// for any base seed, since slot * GAMMA never collides modulo 2^64.
const SEED_GAMMA: u64 = 0x9E3779B97F4A7C15;

/// Pool of independent RNG streams, one per parallel worker.
///
/// Slots are addressed by `rayon::current_thread_index()`, which maps each
/// pool thread to a stable slot for the duration of a step. The per-slot
/// locks exist to satisfy the borrow checker across the parallel pass;
/// they are uncontended because no two workers share an index.
#[derive(Debug)]
pub struct RngPool {
    streams: Vec<Mutex<StdRng>>,
}

impl RngPool {
    /// Creates a pool with `workers` freshly seeded streams (at least one).
    pub fn new(workers: usize) -> Self {
        let mut pool = Self {
            streams: (0..workers.max(1))
                .map(|_| Mutex::new(StdRng::seed_from_u64(0)))
                .collect(),
        };
        pool.reseed();
        pool
    }

    /// Number of worker slots in the pool.
    pub fn workers(&self) -> usize {
        self.streams.len()
    }

    /// Replaces every stream with a fresh one.
    ///
    /// A single base seed is drawn from the thread-local entropy source and
    /// perturbed per slot, guaranteeing distinct streams across workers
    /// within the same step.
    pub fn reseed(&mut self) {
        let base: u64 = rand::rng().random();
        for (slot, stream) in self.streams.iter_mut().enumerate() {
            let seed = base.wrapping_add((slot as u64).wrapping_mul(SEED_GAMMA));
            *stream.get_mut().unwrap_or_else(PoisonError::into_inner) =
                StdRng::seed_from_u64(seed);
        }
    }

    /// Locks and returns the stream for the given worker slot.
    ///
    /// Out-of-range slots wrap around so a caller outside the rayon pool
    /// still gets a usable stream.
    pub fn stream(&self, worker: usize) -> MutexGuard<'_, StdRng> {
        self.streams[worker % self.streams.len()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
