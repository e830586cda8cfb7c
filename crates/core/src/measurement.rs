//! Wall-clock measurement harness.
//!
//! Benchmarks the engine by timing fixed batches of simulation steps,
//! always processed smallest-first regardless of how the backlog was
//! populated. Batch results are logged through `tracing` and kept in
//! memory for display by the embedding application.

use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Step counts timed by a measurement session started with
/// [`Measurement::start`].
pub const DEFAULT_STEP_BATCHES: [u64; 5] = [1, 10, 100, 1000, 10000];

/// Ordered backlog of batch sizes with pop-minimum semantics.
///
/// Entries are kept sorted ascending; duplicates are allowed and insertion
/// order is irrelevant to the order batches run in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepBacklog {
    entries: Vec<u64>,
}

impl StepBacklog {
    /// Builds a backlog from arbitrary-order batch sizes.
    pub fn from_batches(batches: &[u64]) -> Self {
        let mut entries = batches.to_vec();
        entries.sort_unstable();
        Self { entries }
    }

    /// Inserts a batch size at its sorted position.
    pub fn push(&mut self, steps: u64) {
        let at = self.entries.partition_point(|&entry| entry <= steps);
        self.entries.insert(at, steps);
    }

    /// Removes and returns the smallest remaining batch size.
    pub fn pop_min(&mut self) -> Option<u64> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    /// Number of batches still queued.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no batches remain.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Elapsed wall-clock time for one completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchResult {
    /// Number of steps the batch executed.
    pub steps: u64,
    /// Wall-clock duration from batch start to its final step.
    pub elapsed: Duration,
}

/// State of the benchmarking session.
///
/// At most one session is active at a time; the engine calls
/// [`Measurement::record_step`] once per completed simulation step.
#[derive(Debug)]
pub struct Measurement {
    backlog: StepBacklog,
    target: u64,
    completed: u64,
    active: bool,
    batch_start: Instant,
    results: Vec<BatchResult>,
}

impl Measurement {
    /// Creates an idle session with no backlog.
    pub fn new() -> Self {
        Self {
            backlog: StepBacklog::default(),
            target: 0,
            completed: 0,
            active: false,
            batch_start: Instant::now(),
            results: Vec::new(),
        }
    }

    /// Starts a session over the default batch sizes.
    ///
    /// A warning is logged and nothing changes when a session is already
    /// running.
    pub fn start(&mut self) {
        self.start_with(&DEFAULT_STEP_BATCHES);
    }

    /// Starts a session over caller-chosen batch sizes, smallest first.
    pub fn start_with(&mut self, batches: &[u64]) {
        if self.active {
            warn!("Measurement already started!");
            return;
        }

        self.backlog = StepBacklog::from_batches(batches);
        self.results.clear();
        self.completed = 0;
        if self.next_batch() {
            self.active = true;
            info!("Measurement started!");
        }
    }

    /// Records one completed engine step.
    ///
    /// On reaching the current batch target the elapsed time is logged and
    /// recorded, then the next batch begins or the session finishes.
    pub fn record_step(&mut self) {
        if !self.active {
            return;
        }

        self.completed += 1;
        if self.completed < self.target {
            return;
        }

        let elapsed = self.batch_start.elapsed();
        info!(
            "Time taken for {} steps: {} ms",
            self.target,
            elapsed.as_millis()
        );
        self.results.push(BatchResult {
            steps: self.target,
            elapsed,
        });

        self.completed = 0;
        if !self.next_batch() {
            self.active = false;
            info!("Measurement finished!");
        }
    }

    /// Ends the session immediately, discarding any remaining backlog.
    pub fn abort(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.target = 0;
        self.completed = 0;
        self.backlog.clear();
        warn!("Measurement aborted!");
    }

    /// True while a session is running.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Fraction of the current batch already executed, in `[0, 1]`.
    /// Zero when no session is active.
    pub fn progress(&self) -> f64 {
        if !self.active || self.target == 0 {
            0.0
        } else {
            self.completed as f64 / self.target as f64
        }
    }

    /// Results of every batch finished since the session started.
    pub fn results(&self) -> &[BatchResult] {
        &self.results
    }

    /// Loads the next batch target; false when the backlog is exhausted.
    fn next_batch(&mut self) -> bool {
        match self.backlog.pop_min() {
            Some(target) => {
                self.target = target;
                self.batch_start = Instant::now();
                true
            }
            None => {
                self.target = 0;
                false
            }
        }
    }
}

impl Default for Measurement {
    fn default() -> Self {
        Self::new()
    }
}
