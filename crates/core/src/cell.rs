//! Cell states and neighborhood modes for the forest-fire automaton.

use serde::{Deserialize, Serialize};

/// State of a single grid cell.
///
/// Every cell holds exactly one of these three states; there is no
/// additional per-cell data such as burn age or fuel load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Living tree, may ignite spontaneously or from a burning neighbor.
    Tree,
    /// Burning cell, always burns out within one step.
    Fire,
    /// Bare ground, may grow a new tree.
    Empty,
}

/// Which neighbors count when checking for nearby fire.
///
/// `Moore` is a strict superset of `VonNeumann`: any cell with fire
/// nearby under Von Neumann rules also has fire nearby under Moore rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Neighborhood {
    /// The 4 edge-adjacent neighbors (up, down, left, right).
    VonNeumann,
    /// The Von Neumann neighbors plus the 4 diagonals (8 total).
    Moore,
}
