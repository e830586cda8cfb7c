//! Simulation parameters.
//!
//! All tunables live in one explicit [`SimulationConfig`] value owned by the
//! embedding application and handed to the engine, never ambient global
//! state. Out-of-range values are clamped rather than rejected, so
//! configuration can never fail.

use crate::cell::Neighborhood;
use serde::{Deserialize, Serialize};

/// Default spontaneous-ignition probability per tree per step.
pub const DEFAULT_IGNITION_PROBABILITY: f64 = 0.0001;
/// Default growth probability per empty cell per step.
pub const DEFAULT_GROWTH_PROBABILITY: f64 = 0.02;
/// Fraction of cells seeded as trees when a grid is (re)initialized.
/// Independent of the runtime growth parameter.
pub const TREE_DENSITY: f64 = 0.5;
/// Default grid edge length in cells.
pub const DEFAULT_GRID_DIM: usize = 1024;
/// Upper bound on either grid dimension; larger requests are clamped.
pub const MAX_GRID_DIM: usize = 4096;
/// Default on-screen size of one cell in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 1;
/// Upper bound on the cell pixel size.
pub const MAX_CELL_SIZE: u32 = 32;

/// Tunable parameters for the forest-fire automaton.
///
/// Probabilities are per cell per step. `cell_size` is carried for the
/// embedding renderer and plays no role in the transition rule, but a
/// change to it still triggers re-initialization like a resize does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Chance for a tree with no burning neighbor to catch fire.
    pub ignition_probability: f64,
    /// Chance for an empty cell to grow a tree.
    pub growth_probability: f64,
    /// Neighbor set used for the fire-spread check.
    pub neighborhood: Neighborhood,
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// On-screen cell size in pixels.
    pub cell_size: u32,
}

impl SimulationConfig {
    /// Returns a copy with every field clamped to its valid range.
    ///
    /// Probabilities land in `[0, 1]`, dimensions in `[1, MAX_GRID_DIM]`,
    /// the cell size in `[1, MAX_CELL_SIZE]`.
    pub fn clamped(self) -> Self {
        Self {
            ignition_probability: self.ignition_probability.clamp(0.0, 1.0),
            growth_probability: self.growth_probability.clamp(0.0, 1.0),
            neighborhood: self.neighborhood,
            width: self.width.clamp(1, MAX_GRID_DIM),
            height: self.height.clamp(1, MAX_GRID_DIM),
            cell_size: self.cell_size.clamp(1, MAX_CELL_SIZE),
        }
    }

    /// True when `other` differs in a way that requires a grid rebuild.
    pub fn needs_reinit(&self, other: &Self) -> bool {
        self.width != other.width
            || self.height != other.height
            || self.cell_size != other.cell_size
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ignition_probability: DEFAULT_IGNITION_PROBABILITY,
            growth_probability: DEFAULT_GROWTH_PROBABILITY,
            neighborhood: Neighborhood::VonNeumann,
            width: DEFAULT_GRID_DIM,
            height: DEFAULT_GRID_DIM,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}
