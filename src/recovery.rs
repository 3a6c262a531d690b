//! Fault recovery for runs of hits that straddle more than one ship.
//!
//! Both fault kinds leave hit cells that no sunk ship accounts for. Recovery
//! reopens a session on one of those cells, as long as it still has an
//! unfired neighbour to probe. When no such cell exists the engine goes back
//! to searching.

use alloc::vec::Vec;

use crate::cellset::CellSet;
use crate::grid::{Cell, Direction, Grid};
use crate::ship::Orientation;
use crate::targeting::{open_neighbours, Fault, FaultKind, TargetContext};

/// Hit cells that belong to no ship known to be sunk.
pub fn uncredited_hits(hits: &CellSet, sunk_cells: &CellSet) -> CellSet {
    hits - sunk_cells
}

/// Maximal run of `pool` cells through `root` along `axis`, ascending.
pub fn run_through(grid: Grid, pool: &CellSet, root: Cell, axis: Orientation) -> Vec<Cell> {
    let mut run = alloc::vec![root];
    for dir in [Direction::backward(axis), Direction::forward(axis)] {
        let mut cur = root;
        while let Some(next) = grid.step(cur, dir).filter(|&c| pool.contains(c)) {
            run.push(next);
            cur = next;
        }
    }
    run.sort_unstable();
    run
}

/// Build the session that resolves `fault`, or `None` if nothing is left to
/// chase. A returned session always has at least one shot available.
pub fn plan(
    grid: Grid,
    shots: &CellSet,
    fault: &Fault,
    uncredited: &CellSet,
) -> Option<TargetContext> {
    let leftovers: Vec<Cell> = fault
        .hits
        .iter()
        .copied()
        .filter(|&c| uncredited.contains(c))
        .collect();

    if fault.kind == FaultKind::SinkMismatch {
        if let Some(axis) = fault.axis {
            for &root in &leftovers {
                let run = run_through(grid, uncredited, root, axis);
                let mut ctx = TargetContext::resume(root, run, Some(axis));
                if !ctx.extension_candidates(grid, shots).is_empty() {
                    log::debug!("resuming {:?} run through cell {}", axis, root);
                    return Some(ctx);
                }
            }
        }
    }

    // Fault cells first so the chase stays near the trouble, then any other
    // stray hit on the board.
    let root = leftovers
        .iter()
        .copied()
        .chain(uncredited.iter())
        .find(|&c| !open_neighbours(grid, shots, c).is_empty())?;
    log::debug!("re-probing orientation around cell {}", root);
    Some(TargetContext::resume(root, alloc::vec![root], None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targeting::Heading;

    #[test]
    fn run_through_stops_at_gaps() {
        let grid = Grid::new(6);
        let pool = CellSet::from_cells(grid, [1, 2, 3, 5, 8]);
        assert_eq!(run_through(grid, &pool, 2, Orientation::Horizontal), [1, 2, 3]);
        assert_eq!(run_through(grid, &pool, 2, Orientation::Vertical), [2, 8]);
    }

    #[test]
    fn run_through_respects_rows() {
        let grid = Grid::new(4);
        let pool = CellSet::from_cells(grid, [2, 3, 4, 5]);
        assert_eq!(run_through(grid, &pool, 3, Orientation::Horizontal), [2, 3]);
    }

    #[test]
    fn mismatch_resumes_along_old_axis() {
        // Ships {0,1} and {2,3,4} on a 6x6 board; session hit 0..=3, sank {0,1}.
        let grid = Grid::new(6);
        let shots = CellSet::from_cells(grid, [0, 1, 2, 3]);
        let uncredited = CellSet::from_cells(grid, [2, 3]);
        let fault = Fault {
            kind: FaultKind::SinkMismatch,
            hits: alloc::vec![2, 1, 3, 0],
            axis: Some(Orientation::Horizontal),
        };
        let mut ctx = plan(grid, &shots, &fault, &uncredited).unwrap();
        assert_eq!(ctx.hits(), [2, 3]);
        assert_eq!(ctx.heading(), Heading::Known(Orientation::Horizontal));
        let cands: Vec<_> = ctx
            .extension_candidates(grid, &shots)
            .into_iter()
            .map(|(_, c)| c)
            .collect();
        assert_eq!(cands, [4]);
    }

    #[test]
    fn extension_fault_probes_perpendicular() {
        // Run 1..=3 with both ends missed.
        let grid = Grid::new(5);
        let shots = CellSet::from_cells(grid, [0, 1, 2, 3, 4]);
        let uncredited = CellSet::from_cells(grid, [1, 2, 3]);
        let fault = Fault {
            kind: FaultKind::Extension,
            hits: alloc::vec![2, 1, 3],
            axis: Some(Orientation::Horizontal),
        };
        let ctx = plan(grid, &shots, &fault, &uncredited).unwrap();
        assert_eq!(ctx.root(), 2);
        assert_eq!(ctx.heading(), Heading::Unknown);
        let cands: Vec<_> = ctx
            .orientation_candidates(grid, &shots)
            .into_iter()
            .map(|(_, c)| c)
            .collect();
        assert_eq!(cands, [7]);
    }

    #[test]
    fn nothing_left_to_chase() {
        let grid = Grid::new(2);
        let shots = CellSet::from_cells(grid, 0..4);
        let uncredited = CellSet::from_cells(grid, [0]);
        let fault = Fault {
            kind: FaultKind::Extension,
            hits: alloc::vec![0],
            axis: None,
        };
        assert!(plan(grid, &shots, &fault, &uncredited).is_none());
    }
}
