use crate::grid::Grid;

/// Number of live cells in the 3x3 block around (column, row), excluding the
/// cell itself.
///
/// The block is clamped to the grid bounds: positions outside the grid are
/// absent rather than counted as dead, so edge cells see at most 5 neighbors
/// and corner cells at most 3. No wraparound.
pub fn live_neighbors(grid: &Grid, column: usize, row: usize) -> u8 {
    let min_column = column.saturating_sub(1);
    let max_column = (column + 1).min(grid.width() - 1);
    let min_row = row.saturating_sub(1);
    let max_row = (row + 1).min(grid.height() - 1);

    let mut count = 0;
    for r in min_row..=max_row {
        for c in min_column..=max_column {
            if grid.is_alive(c, r) {
                count += 1;
            }
        }
    }
    if grid.is_alive(column, row) {
        count -= 1;
    }
    count
}

/// Produce the next generation under the B3/S23 rule set.
///
/// Every cell of the new grid is decided from the prior snapshot exclusively;
/// nothing reads a cell that has already been updated for this generation.
/// The whole grid is replaced at once.
pub fn next_generation(grid: &Grid) -> Grid {
    let mut next = grid.empty_like();
    for row in 0..grid.height() {
        for column in 0..grid.width() {
            let neighbors = live_neighbors(grid, column, row);
            let alive = if grid.is_alive(column, row) {
                // Survival on 2 or 3; under- and overpopulation kill.
                matches!(neighbors, 2 | 3)
            } else {
                // Birth on exactly 3.
                neighbors == 3
            };
            if alive {
                next.set(column, row, true);
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(width: usize, height: usize, live: &[(usize, usize)]) -> Grid {
        Grid::new(width, height).unwrap().with_cells(live, true)
    }

    fn live_set(grid: &Grid) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for row in 0..grid.height() {
            for column in 0..grid.width() {
                if grid.is_alive(column, row) {
                    cells.push((column, row));
                }
            }
        }
        cells
    }

    #[test]
    fn neighbor_count_stays_in_range_and_excludes_self() {
        let mut grid = Grid::new(3, 3).unwrap();
        for row in 0..3 {
            for column in 0..3 {
                grid = grid.with_cell(column, row, true);
            }
        }
        // Center of a fully live 3x3 block: 8 neighbors, self excluded.
        assert_eq!(live_neighbors(&grid, 1, 1), 8);
        // Corner and edge cells clamp to the block that actually exists.
        assert_eq!(live_neighbors(&grid, 0, 0), 3);
        assert_eq!(live_neighbors(&grid, 1, 0), 5);
    }

    #[test]
    fn neighbor_count_ignores_the_cells_own_state() {
        let lone = grid_with(3, 3, &[(1, 1)]);
        assert_eq!(live_neighbors(&lone, 1, 1), 0);

        let ring = grid_with(3, 3, &[(0, 0), (1, 0), (2, 0), (0, 1), (2, 1)]);
        // Same count whether (1,1) is dead or alive.
        assert_eq!(live_neighbors(&ring, 1, 1), 5);
        assert_eq!(live_neighbors(&ring.with_cell(1, 1, true), 1, 1), 5);
    }

    #[test]
    fn dead_grid_stays_dead() {
        let grid = Grid::new(8, 6).unwrap();
        let next = next_generation(&grid);
        assert_eq!(next.population(), 0);
        assert_eq!(next.width(), 8);
        assert_eq!(next.height(), 6);
    }

    #[test]
    fn lone_cell_dies_of_underpopulation() {
        let grid = grid_with(5, 5, &[(2, 2)]);
        let next = next_generation(&grid);
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn block_still_life_is_unchanged() {
        let grid = grid_with(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        let next = next_generation(&grid);
        assert_eq!(next, grid);
    }

    #[test]
    fn overpopulated_cell_dies() {
        // Center cell with four live neighbors.
        let grid = grid_with(3, 3, &[(1, 1), (0, 0), (2, 0), (0, 2), (2, 2)]);
        let next = next_generation(&grid);
        assert!(!next.is_alive(1, 1));
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        // Vertical blinker on a 5x5 grid, the classic period-2 oscillator.
        let vertical = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);

        let horizontal = next_generation(&vertical);
        assert_eq!(live_set(&horizontal), vec![(1, 2), (2, 2), (3, 2)]);

        let back = next_generation(&horizontal);
        assert_eq!(live_set(&back), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn step_reads_only_the_prior_generation() {
        // An r-pentomino-like cluster whose outcome differs if updated cells
        // leak into neighbor counts mid-step. Verified against the rule
        // applied by hand from the frozen snapshot.
        let grid = grid_with(4, 4, &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)]);
        let next = next_generation(&grid);
        assert_eq!(live_set(&next), vec![(0, 0), (1, 0), (2, 0), (0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn source_grid_is_untouched_by_stepping() {
        let grid = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let _ = next_generation(&grid);
        assert_eq!(live_set(&grid), vec![(2, 1), (2, 2), (2, 3)]);
    }
}
