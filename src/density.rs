// Placement-counting density search over the opponent board.
// Only the shot history and ship lengths are consulted, never ship positions.

use alloc::vec;
use alloc::vec::Vec;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::cellset::CellSet;
use crate::grid::{Cell, Grid};
use crate::ship::Orientation;

/// Every axis-aligned placement of a ship of `length` that fits on the board
/// without wrapping between rows.
pub fn placements(grid: Grid, length: usize) -> impl Iterator<Item = Vec<Cell>> {
    let size = grid.size();
    [Orientation::Vertical, Orientation::Horizontal]
        .into_iter()
        .flat_map(move |orient| {
            let (max_row, max_col) = match orient {
                Orientation::Vertical => ((size + 1).saturating_sub(length), size),
                Orientation::Horizontal => (size, (size + 1).saturating_sub(length)),
            };
            (0..max_row).flat_map(move |r| {
                (0..max_col).filter_map(move |c| {
                    grid.run(r, c, orient, length).map(|run| run.collect::<Vec<Cell>>())
                })
            })
        })
}

/// For each cell, the number of placements of `length` that avoid every shot
/// cell and cover it. Shot cells always score zero.
pub fn density_map(grid: Grid, shots: &CellSet, length: usize) -> Vec<u32> {
    let mut counts = vec![0u32; grid.cell_count()];
    if length == 0 {
        return counts;
    }
    for placement in placements(grid, length) {
        if shots.contains_any(placement.iter().copied()) {
            continue;
        }
        for cell in placement {
            counts[cell] += 1;
        }
    }
    counts
}

/// Cells sharing the highest non-zero count, ascending.
pub fn peak_cells(counts: &[u32]) -> Vec<Cell> {
    let peak = counts.iter().copied().max().unwrap_or(0);
    if peak == 0 {
        return Vec::new();
    }
    counts
        .iter()
        .enumerate()
        .filter(|&(_, &n)| n == peak)
        .map(|(cell, _)| cell)
        .collect()
}

/// Pick uniformly among the densest cells for a ship of `length`. Returns
/// `None` when no placement survives the shot history.
pub fn density_shot<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    shots: &CellSet,
    length: usize,
) -> Option<Cell> {
    let peaks = peak_cells(&density_map(grid, shots, length));
    peaks.choose(rng).copied()
}

/// Uniform random cell not yet in `shots`.
pub fn random_unshot<R: Rng + ?Sized>(rng: &mut R, shots: &CellSet) -> Option<Cell> {
    let open: Vec<Cell> = shots.complement().collect();
    open.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_count_matches_geometry() {
        // 2 * N * (N - L + 1)
        assert_eq!(placements(Grid::new(10), 5).count(), 120);
        assert_eq!(placements(Grid::new(4), 4).count(), 8);
        assert_eq!(placements(Grid::new(3), 4).count(), 0);
    }

    #[test]
    fn placements_never_wrap_rows() {
        let grid = Grid::new(5);
        for p in placements(grid, 3) {
            let rows: Vec<_> = p.iter().map(|&c| grid.to_row_col(c).0).collect();
            let cols: Vec<_> = p.iter().map(|&c| grid.to_row_col(c).1).collect();
            assert!(rows.iter().all(|&r| r == rows[0]) || cols.iter().all(|&c| c == cols[0]));
        }
    }

    #[test]
    fn centre_is_densest_on_open_board() {
        let grid = Grid::new(5);
        let map = density_map(grid, &CellSet::new(grid), 5);
        assert_eq!(map[12], 2);
        assert_eq!(peak_cells(&map).len(), 25);

        let map = density_map(grid, &CellSet::new(grid), 3);
        assert_eq!(peak_cells(&map), [12]);
    }

    #[test]
    fn shot_cells_score_zero() {
        let grid = Grid::new(4);
        let shots = CellSet::from_cells(grid, [5, 6]);
        let map = density_map(grid, &shots, 2);
        assert_eq!(map[5], 0);
        assert_eq!(map[6], 0);
    }
}
