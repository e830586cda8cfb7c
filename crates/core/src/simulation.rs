//! Forest-fire transition engine.
//!
//! [`ForestSimulation`] owns the grid, the per-worker RNG pool, the current
//! parameters and the measurement session, and advances the automaton one
//! synchronized step at a time. Each step computes a full replacement
//! buffer in a rayon row-parallel pass that reads only the previous buffer,
//! then swaps the buffers after the implicit barrier, so no reader ever
//! observes a half-updated grid.

use crate::cell::CellState;
use crate::config::{SimulationConfig, TREE_DENSITY};
use crate::grid::ForestGrid;
use crate::measurement::Measurement;
use crate::rng::RngPool;
use rand::Rng;
use rayon::prelude::*;
use tracing::info;

/// Population counts and step counter for display by the embedding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationStats {
    /// Cells currently holding a tree.
    pub trees: usize,
    /// Cells currently on fire.
    pub burning: usize,
    /// Bare cells.
    pub empty: usize,
    /// Total cell count of the grid.
    pub total_cells: usize,
    /// Steps executed since the simulation was created.
    pub steps_completed: u64,
}

/// The simulation engine: grid, RNG pool, parameters and measurement
/// session behind one explicit context value.
///
/// The embedding event loop owns this by value and drives it once per
/// frame. Everything that mutates the grid outside [`ForestSimulation::step`]
/// (manual ignition, resizing, resetting) must happen between steps; the
/// `&mut self` receivers enforce that sequencing at compile time.
pub struct ForestSimulation {
    config: SimulationConfig,
    grid: ForestGrid,
    back: Vec<CellState>,
    rng: RngPool,
    measurement: Measurement,
    steps_completed: u64,
}

impl ForestSimulation {
    /// Creates a simulation with a freshly randomized grid.
    ///
    /// The configuration is clamped to its valid ranges first; the pool
    /// holds one RNG stream per available rayon worker.
    pub fn new(config: SimulationConfig) -> Self {
        let config = config.clamped();
        let mut grid = ForestGrid::new(config.width, config.height);
        grid.randomize(&mut rand::rng(), TREE_DENSITY);

        let rng = RngPool::new(rayon::current_num_threads());
        info!(
            "Forest initialized: {}x{} grid, {} worker streams",
            grid.width(),
            grid.height(),
            rng.workers()
        );

        Self {
            config,
            grid,
            back: Vec::new(),
            rng,
            measurement: Measurement::new(),
            steps_completed: 0,
        }
    }

    /// Discards the grid contents and randomizes a new population.
    ///
    /// Called on explicit reset and after any geometry change. Prior cell
    /// states are never preserved across a rebuild.
    pub fn reset(&mut self) {
        self.grid = ForestGrid::new(self.config.width, self.config.height);
        self.grid.randomize(&mut rand::rng(), TREE_DENSITY);
        self.back.clear();
    }

    /// Advances the automaton by one step.
    ///
    /// Per cell, reading only the pre-step buffer: fire burns out to empty;
    /// a tree ignites when a neighbor burns or an independent draw falls
    /// below the ignition probability; bare ground grows a tree when a draw
    /// falls below the growth probability. The RNG pool is reseeded before
    /// the pass and the measurement session advances after it.
    pub fn step(&mut self) {
        self.rng.reseed();
        self.back.resize(self.grid.cell_count(), CellState::Empty);
        step_cells(&self.grid, &mut self.back, &self.config, &self.rng);
        self.grid.swap_buffer(&mut self.back);

        self.steps_completed += 1;
        self.measurement.record_step();
    }

    /// Sets the cell at `(x, y)` on fire if it is in bounds and currently a
    /// tree; any other target is silently ignored. Must only be called
    /// between steps, which the `&mut self` receiver guarantees.
    pub fn ignite(&mut self, x: usize, y: usize) {
        if x < self.grid.width()
            && y < self.grid.height()
            && self.grid.get(x, y) == CellState::Tree
        {
            self.grid.set(x, y, CellState::Fire);
        }
    }

    /// Installs new parameters, clamped to their valid ranges.
    ///
    /// A change to the grid geometry (width, height or cell size) rebuilds
    /// and re-randomizes the grid; probability or neighborhood changes take
    /// effect on the next step without touching the population.
    pub fn configure(&mut self, config: SimulationConfig) {
        let config = config.clamped();
        let reinit = self.config.needs_reinit(&config);
        self.config = config;
        if reinit {
            self.reset();
        }
    }

    /// Current (clamped) parameters.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Read access to the grid.
    pub fn grid(&self) -> &ForestGrid {
        &self.grid
    }

    /// Mutable access to the grid for embedders that edit cells directly.
    /// Like [`ForestSimulation::ignite`], only valid between steps.
    pub fn grid_mut(&mut self) -> &mut ForestGrid {
        &mut self.grid
    }

    /// Read-only snapshot over all cells for rendering, yielding
    /// `(x, y, state)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        self.grid.cells()
    }

    /// The benchmarking session.
    pub fn measurement(&self) -> &Measurement {
        &self.measurement
    }

    /// Mutable access to the benchmarking session, used to start or abort
    /// it between steps.
    pub fn measurement_mut(&mut self) -> &mut Measurement {
        &mut self.measurement
    }

    /// Steps executed since creation.
    pub fn steps_completed(&self) -> u64 {
        self.steps_completed
    }

    /// Population counts for the current grid.
    pub fn stats(&self) -> SimulationStats {
        let mut trees = 0;
        let mut burning = 0;
        let mut empty = 0;
        for &cell in self.grid.as_slice() {
            match cell {
                CellState::Tree => trees += 1,
                CellState::Fire => burning += 1,
                CellState::Empty => empty += 1,
            }
        }
        SimulationStats {
            trees,
            burning,
            empty,
            total_cells: self.grid.cell_count(),
            steps_completed: self.steps_completed,
        }
    }
}

/// Computes the next state of every cell into `next`.
///
/// Rows of the output buffer are distributed across the rayon pool; each
/// worker draws from its own pool slot, locked once per row. Cells only
/// read `grid` (the pre-step buffer) and write their own output slot, so
/// the result is independent of scheduling order.
fn step_cells(
    grid: &ForestGrid,
    next: &mut [CellState],
    config: &SimulationConfig,
    rng: &RngPool,
) {
    let width = grid.width();
    let current = grid.as_slice();

    next.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let worker = rayon::current_thread_index().unwrap_or(0);
            let mut stream = rng.stream(worker);

            for (x, cell) in row.iter_mut().enumerate() {
                *cell = match current[y * width + x] {
                    // A burning cell always burns out in exactly one step.
                    CellState::Fire => CellState::Empty,
                    CellState::Tree => {
                        if grid.fire_nearby(x, y, config.neighborhood)
                            || stream.random::<f64>() < config.ignition_probability
                        {
                            CellState::Fire
                        } else {
                            CellState::Tree
                        }
                    }
                    CellState::Empty => {
                        if stream.random::<f64>() < config.growth_probability {
                            CellState::Tree
                        } else {
                            CellState::Empty
                        }
                    }
                };
            }
        });
}
