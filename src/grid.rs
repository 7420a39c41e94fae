use rand::Rng;
use thiserror::Error;

/// Errors raised while constructing a grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be positive (got {width}x{height})")]
    InvalidDimensions { width: usize, height: usize },
}

/// Bounded 2D field of cell states (true = alive), stored row-major.
///
/// Updates are copy-on-write: `with_cell` and `with_cells` return a new grid
/// and never touch the receiver, so anyone holding a previously handed-out
/// grid keeps a stable snapshot for as long as they need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid. Zero dimensions are a construction error.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
        })
    }

    /// Random soup with the given live-cell density (clamped to 0.0-1.0).
    pub fn randomized<R: Rng>(
        width: usize,
        height: usize,
        density: f64,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height)?;
        let density = density.clamp(0.0, 1.0);
        if density > 0.0 {
            for cell in &mut grid.cells {
                *cell = rng.gen_bool(density);
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, column: usize, row: usize) -> usize {
        assert!(
            column < self.width && row < self.height,
            "cell ({column}, {row}) outside {}x{} grid",
            self.width,
            self.height
        );
        row * self.width + column
    }

    /// Cell state at (column, row), or `None` outside the grid.
    pub fn get(&self, column: usize, row: usize) -> Option<bool> {
        (column < self.width && row < self.height).then(|| self.cells[row * self.width + column])
    }

    /// Cell state at (column, row). In-range indices are the caller's contract.
    pub fn is_alive(&self, column: usize, row: usize) -> bool {
        self.cells[self.index(column, row)]
    }

    /// New grid identical to this one except for a single cell.
    pub fn with_cell(&self, column: usize, row: usize, alive: bool) -> Grid {
        let mut next = self.clone();
        let idx = next.index(column, row);
        next.cells[idx] = alive;
        next
    }

    /// New grid with every listed cell forced to `alive`. One clone, however
    /// many cells the edit batch carries.
    pub fn with_cells(&self, cells: &[(usize, usize)], alive: bool) -> Grid {
        let mut next = self.clone();
        for &(column, row) in cells {
            let idx = next.index(column, row);
            next.cells[idx] = alive;
        }
        next
    }

    /// All-dead grid with this grid's dimensions.
    pub(crate) fn empty_like(&self) -> Grid {
        Grid {
            width: self.width,
            height: self.height,
            cells: vec![false; self.cells.len()],
        }
    }

    /// In-place write for grids under construction, before they are shared.
    pub(crate) fn set(&mut self, column: usize, row: usize, alive: bool) {
        let idx = self.index(column, row);
        self.cells[idx] = alive;
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_grid_is_all_dead() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.population(), 0);
        for row in 0..3 {
            for column in 0..4 {
                assert!(!grid.is_alive(column, row));
            }
        }
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(0, 10),
            Err(GridError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
        assert_eq!(
            Grid::new(10, 0),
            Err(GridError::InvalidDimensions {
                width: 10,
                height: 0
            })
        );
    }

    #[test]
    fn with_cell_leaves_the_receiver_untouched() {
        let g1 = Grid::new(5, 5).unwrap();
        let g2 = g1.with_cell(2, 3, true);

        assert!(!g1.is_alive(2, 3));
        assert!(g2.is_alive(2, 3));
        assert_eq!(g1.population(), 0);
        assert_eq!(g2.population(), 1);
    }

    #[test]
    fn with_cells_applies_a_whole_batch() {
        let g1 = Grid::new(5, 5).unwrap();
        let g2 = g1.with_cells(&[(0, 0), (1, 1), (1, 1), (4, 4)], true);

        assert_eq!(g1.population(), 0);
        assert_eq!(g2.population(), 3);
        assert!(g2.is_alive(0, 0));
        assert!(g2.is_alive(1, 1));
        assert!(g2.is_alive(4, 4));
    }

    #[test]
    fn get_is_none_outside_the_grid() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.get(1, 1), Some(false));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn randomized_density_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty = Grid::randomized(10, 10, 0.0, &mut rng).unwrap();
        assert_eq!(empty.population(), 0);

        let full = Grid::randomized(10, 10, 1.0, &mut rng).unwrap();
        assert_eq!(full.population(), 100);
    }

    #[test]
    fn randomized_clamps_density() {
        let mut rng = StdRng::seed_from_u64(7);
        let full = Grid::randomized(6, 6, 2.5, &mut rng).unwrap();
        assert_eq!(full.population(), 36);
    }
}
