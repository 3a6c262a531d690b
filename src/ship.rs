//! Ships and fleets as cell sequences on a [`Grid`].

use alloc::vec::Vec;
use core::fmt;

use crate::cellset::CellSet;
use crate::common::FleetError;
use crate::grid::{Cell, Grid};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A ship laid out as contiguous, collinear cells in ascending order.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    cells: Vec<Cell>,
    orientation: Orientation,
}

impl Ship {
    /// Place a ship of `length` at (`row`, `col`) with `orientation`.
    pub fn new(
        grid: Grid,
        row: usize,
        col: usize,
        orientation: Orientation,
        length: usize,
    ) -> Result<Self, FleetError> {
        if length == 0 {
            return Err(FleetError::EmptyShip);
        }
        let cells = grid
            .run(row, col, orientation, length)
            .ok_or(FleetError::OutOfBounds {
                cell: grid.to_index(row, col),
            })?
            .collect();
        Ok(Ship { cells, orientation })
    }

    /// Validate an externally supplied cell sequence. Cells may come in any
    /// order but must form one straight, gap-free run on the board.
    pub fn from_cells(grid: Grid, cells: &[Cell]) -> Result<Self, FleetError> {
        let mut cells = cells.to_vec();
        cells.sort_unstable();
        let first = *cells.first().ok_or(FleetError::EmptyShip)?;
        if let Some(&cell) = cells.iter().find(|&&c| !grid.contains(c)) {
            return Err(FleetError::OutOfBounds { cell });
        }
        let (row, col) = grid.to_row_col(first);
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let expected = grid.run(row, col, orientation, cells.len());
            if expected.is_some_and(|run| run.eq(cells.iter().copied())) {
                return Ok(Ship { cells, orientation });
            }
        }
        Err(FleetError::NotContiguous { first })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// For single-cell ships the orientation is nominal.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// `true` once every cell has been fired at.
    pub fn is_sunk_by(&self, shots: &CellSet) -> bool {
        shots.contains_all(self.cells.iter().copied())
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ length: {}, orientation: {:?}, cells: {:?} }}",
            self.cells.len(),
            self.orientation,
            self.cells,
        )
    }
}

/// One side's ships plus the union of their cells.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    ships: Vec<Ship>,
    occupied: CellSet,
}

impl Fleet {
    pub fn empty(grid: Grid) -> Self {
        Fleet {
            ships: Vec::new(),
            occupied: CellSet::new(grid),
        }
    }

    /// Assemble a fleet from raw per-ship cell sequences, validating each
    /// ship and rejecting overlaps.
    pub fn from_cell_lists(grid: Grid, ships: &[Vec<Cell>]) -> Result<Self, FleetError> {
        if ships.is_empty() {
            return Err(FleetError::NoShips);
        }
        let mut fleet = Fleet::empty(grid);
        for cells in ships {
            fleet.add(Ship::from_cells(grid, cells)?)?;
        }
        Ok(fleet)
    }

    /// Add a ship unless it shares a cell with one already in the fleet.
    pub fn add(&mut self, ship: Ship) -> Result<(), FleetError> {
        if let Some(&cell) = ship.cells().iter().find(|&&c| self.occupied.contains(c)) {
            return Err(FleetError::Overlap { cell });
        }
        self.occupied.extend(ship.cells().iter().copied());
        self.ships.push(ship);
        Ok(())
    }

    /// `true` if `ship` would overlap this fleet.
    pub fn overlaps(&self, ship: &Ship) -> bool {
        self.occupied.contains_any(ship.cells().iter().copied())
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Flat set of every occupied cell.
    pub fn occupied(&self) -> &CellSet {
        &self.occupied
    }

    /// Per-ship cell sequences, in placement order.
    pub fn cell_lists(&self) -> Vec<Vec<Cell>> {
        self.ships.iter().map(|s| s.cells.clone()).collect()
    }

    /// Index of the ship occupying `cell`, if any.
    pub fn ship_at(&self, cell: Cell) -> Option<usize> {
        if !self.occupied.contains(cell) {
            return None;
        }
        self.ships.iter().position(|s| s.contains(cell))
    }

    /// Sum of all ship lengths.
    pub fn total_cells(&self) -> usize {
        self.occupied.len()
    }
}
