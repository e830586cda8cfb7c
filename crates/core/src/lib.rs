//! Forest Fire Core Library
//!
//! A stochastic forest-fire cellular automaton on a 2-D grid: cells are
//! trees, fire or empty ground, and each discrete step applies
//! probabilistic ignition, growth and burn-out rules in parallel across
//! all cells.
//!
//! ## Engine layout
//!
//! - Flat row-major [`ForestGrid`] with double-buffered updates
//! - Rayon row-parallel transition pass fed by a per-worker [`RngPool`]
//! - Explicit [`SimulationConfig`] context value, clamped instead of failing
//! - Wall-clock [`Measurement`] harness timing batches of steps in
//!   ascending size order
//!
//! Rendering, input handling and settings UI are external collaborators;
//! they consume the snapshot iterator and stats and feed back parameter
//! edits and manual ignitions between steps.

pub mod cell;
pub mod config;
pub mod grid;
pub mod measurement;
pub mod rng;
pub mod simulation;

// Re-export core types
pub use cell::{CellState, Neighborhood};
pub use config::SimulationConfig;
pub use grid::ForestGrid;
pub use measurement::{BatchResult, Measurement, StepBacklog, DEFAULT_STEP_BATCHES};
pub use rng::RngPool;
pub use simulation::{ForestSimulation, SimulationStats};
