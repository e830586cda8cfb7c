//! Flat row-major forest grid.
//!
//! Cell states live in one contiguous buffer indexed by `y * width + x`,
//! avoiding the pointer-chasing of nested containers and keeping the
//! per-step parallel pass friendly to the prefetcher. Dimensions are always
//! at least 1 in each direction; resizing discards prior content entirely.

use crate::cell::{CellState, Neighborhood};
use rand::Rng;

/// Rectangular grid of cell states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestGrid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl ForestGrid {
    /// Allocates a grid of the given dimensions with every cell empty.
    ///
    /// Dimensions are raised to 1 if a zero slips through; the engine
    /// clamps its configuration before calling this.
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![CellState::Empty; width * height],
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    /// State of the cell at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> CellState {
        self.cells[self.index(x, y)]
    }

    /// Overwrites the cell at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, state: CellState) {
        let idx = self.index(x, y);
        self.cells[idx] = state;
    }

    /// Sets every cell to `state`.
    pub fn fill(&mut self, state: CellState) {
        self.cells.fill(state);
    }

    /// Raw row-major view of the current buffer.
    pub fn as_slice(&self) -> &[CellState] {
        &self.cells
    }

    /// Read-only snapshot over all cells, yielding `(x, y, state)` in
    /// row-major order. Intended to be consumed once per rendered frame.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &state)| (idx % width, idx / width, state))
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Randomizes the grid: each cell independently becomes a tree with
    /// probability `tree_density`, otherwise empty. No fire is ever seeded.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, tree_density: f64) {
        for cell in &mut self.cells {
            *cell = if rng.random::<f64>() < tree_density {
                CellState::Tree
            } else {
                CellState::Empty
            };
        }
    }

    /// True when at least one existing neighbor of `(x, y)` is burning.
    ///
    /// Boundary cells simply have fewer neighbors; missing neighbors never
    /// count as fire and the grid does not wrap. The Moore diagonals are
    /// only inspected when no edge-adjacent neighbor already burns.
    pub fn fire_nearby(&self, x: usize, y: usize, neighborhood: Neighborhood) -> bool {
        let width = self.width;
        let height = self.height;
        let fire_at = |x: usize, y: usize| self.cells[y * width + x] == CellState::Fire;

        // Von Neumann neighborhood: up, down, left, right
        if (x > 0 && fire_at(x - 1, y))
            || (y > 0 && fire_at(x, y - 1))
            || (x + 1 < width && fire_at(x + 1, y))
            || (y + 1 < height && fire_at(x, y + 1))
        {
            return true;
        }

        if neighborhood == Neighborhood::VonNeumann {
            return false;
        }

        // Moore neighborhood: also consider diagonals
        (x > 0 && y > 0 && fire_at(x - 1, y - 1))
            || (x + 1 < width && y > 0 && fire_at(x + 1, y - 1))
            || (x > 0 && y + 1 < height && fire_at(x - 1, y + 1))
            || (x + 1 < width && y + 1 < height && fire_at(x + 1, y + 1))
    }

    /// Swaps the current buffer with `other` after a completed step.
    /// Both buffers must have identical dimensions.
    pub(crate) fn swap_buffer(&mut self, other: &mut Vec<CellState>) {
        debug_assert_eq!(self.cells.len(), other.len());
        std::mem::swap(&mut self.cells, other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_grid_is_all_empty() {
        let grid = ForestGrid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cell_count(), 12);
        assert_eq!(grid.count(CellState::Empty), 12);
    }

    #[test]
    fn test_zero_dimensions_are_raised_to_one() {
        let grid = ForestGrid::new(0, 0);
        assert_eq!(grid.width(), 1);
        assert_eq!(grid.height(), 1);
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut grid = ForestGrid::new(3, 3);
        grid.set(2, 1, CellState::Fire);
        assert_eq!(grid.get(2, 1), CellState::Fire);
        assert_eq!(grid.get(1, 2), CellState::Empty);
    }

    #[test]
    fn test_snapshot_yields_every_cell_in_row_major_order() {
        let mut grid = ForestGrid::new(2, 2);
        grid.set(1, 0, CellState::Tree);

        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(
            cells,
            vec![
                (0, 0, CellState::Empty),
                (1, 0, CellState::Tree),
                (0, 1, CellState::Empty),
                (1, 1, CellState::Empty),
            ]
        );
    }

    #[test]
    fn test_randomize_produces_only_trees_and_ground() {
        let mut grid = ForestGrid::new(64, 64);
        let mut rng = StdRng::seed_from_u64(7);
        grid.randomize(&mut rng, 0.5);

        assert_eq!(grid.count(CellState::Fire), 0);
        let trees = grid.count(CellState::Tree);
        assert_eq!(trees + grid.count(CellState::Empty), grid.cell_count());
        // With density 0.5 over 4096 cells the tree count stays well inside
        // a few standard deviations of half the grid.
        assert!(trees > 1700 && trees < 2400, "tree count was {trees}");
    }

    #[test]
    fn test_randomize_density_extremes() {
        let mut grid = ForestGrid::new(16, 16);
        let mut rng = StdRng::seed_from_u64(1);

        grid.randomize(&mut rng, 0.0);
        assert_eq!(grid.count(CellState::Tree), 0);

        grid.randomize(&mut rng, 1.0);
        assert_eq!(grid.count(CellState::Tree), grid.cell_count());
    }

    #[test]
    fn test_fire_nearby_von_neumann_edges() {
        let mut grid = ForestGrid::new(3, 3);
        grid.set(1, 0, CellState::Fire);

        assert!(grid.fire_nearby(1, 1, Neighborhood::VonNeumann));
        assert!(grid.fire_nearby(0, 0, Neighborhood::VonNeumann));
        assert!(grid.fire_nearby(2, 0, Neighborhood::VonNeumann));
        // Diagonal from the fire, not edge-adjacent
        assert!(!grid.fire_nearby(0, 1, Neighborhood::VonNeumann));
        assert!(!grid.fire_nearby(2, 2, Neighborhood::VonNeumann));
    }

    #[test]
    fn test_fire_nearby_moore_adds_diagonals() {
        let mut grid = ForestGrid::new(3, 3);
        grid.set(0, 0, CellState::Fire);

        assert!(!grid.fire_nearby(1, 1, Neighborhood::VonNeumann));
        assert!(grid.fire_nearby(1, 1, Neighborhood::Moore));
        assert!(!grid.fire_nearby(2, 2, Neighborhood::Moore));
    }

    #[test]
    fn test_fire_nearby_at_corners_stays_in_bounds() {
        let mut grid = ForestGrid::new(2, 2);
        grid.fill(CellState::Fire);

        for x in 0..2 {
            for y in 0..2 {
                assert!(grid.fire_nearby(x, y, Neighborhood::Moore));
            }
        }
    }

    #[test]
    fn test_fire_nearby_on_single_cell_grid() {
        let mut grid = ForestGrid::new(1, 1);
        grid.set(0, 0, CellState::Fire);

        // A 1x1 grid has no neighbors at all.
        assert!(!grid.fire_nearby(0, 0, Neighborhood::VonNeumann));
        assert!(!grid.fire_nearby(0, 0, Neighborhood::Moore));
    }
}
