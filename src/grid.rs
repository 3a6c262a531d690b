//! Cell addressing on an N×N board.
//!
//! Cells are linear row-major indices. Neighbour steps are computed in
//! (row, col) space so a horizontal step never wraps onto another row.

use crate::ship::Orientation;

/// Linear, row-major cell index.
pub type Cell = usize;

/// One of the four grid neighbours of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Axis a step in this direction travels along.
    pub fn axis(self) -> Orientation {
        match self {
            Direction::Left | Direction::Right => Orientation::Horizontal,
            Direction::Up | Direction::Down => Orientation::Vertical,
        }
    }

    /// Step towards lower cell indices along `axis`.
    pub fn backward(axis: Orientation) -> Self {
        match axis {
            Orientation::Horizontal => Direction::Left,
            Orientation::Vertical => Direction::Up,
        }
    }

    /// Step towards higher cell indices along `axis`.
    pub fn forward(axis: Orientation) -> Self {
        match axis {
            Orientation::Horizontal => Direction::Right,
            Orientation::Vertical => Direction::Down,
        }
    }
}

/// Square board geometry. Pure arithmetic, holds no cell state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: usize,
}

impl Grid {
    pub const fn new(size: usize) -> Self {
        Self { size }
    }

    /// Side length N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells, N².
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    pub fn to_index(&self, row: usize, col: usize) -> Cell {
        row * self.size + col
    }

    pub fn to_row_col(&self, cell: Cell) -> (usize, usize) {
        (cell / self.size, cell % self.size)
    }

    /// `true` for every cell in `0..N²`, the last one included.
    pub fn contains(&self, cell: Cell) -> bool {
        cell < self.cell_count()
    }

    /// Neighbour of `cell` in `dir`, or `None` when the step leaves the board
    /// or would land on a different row.
    pub fn step(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        if !self.contains(cell) {
            return None;
        }
        let (row, col) = self.to_row_col(cell);
        let (row, col) = match dir {
            Direction::Left => (row, col.checked_sub(1)?),
            Direction::Right if col + 1 < self.size => (row, col + 1),
            Direction::Up => (row.checked_sub(1)?, col),
            Direction::Down if row + 1 < self.size => (row + 1, col),
            _ => return None,
        };
        Some(self.to_index(row, col))
    }

    /// Cells of a straight run of `length` starting at (`row`, `col`), or
    /// `None` if it would leave the board.
    pub fn run(
        &self,
        row: usize,
        col: usize,
        orientation: Orientation,
        length: usize,
    ) -> Option<impl Iterator<Item = Cell>> {
        let fits = match orientation {
            Orientation::Horizontal => row < self.size && col + length <= self.size,
            Orientation::Vertical => col < self.size && row + length <= self.size,
        };
        if !fits {
            return None;
        }
        let grid = *self;
        Some((0..length).map(move |k| match orientation {
            Orientation::Horizontal => grid.to_index(row, col + k),
            Orientation::Vertical => grid.to_index(row + k, col),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_row_col() {
        let grid = Grid::new(7);
        assert_eq!(grid.to_index(3, 5), 26);
        assert_eq!(grid.to_row_col(26), (3, 5));
        assert_eq!(grid.to_row_col(48), (6, 6));
    }

    #[test]
    fn last_cell_is_on_the_board() {
        let grid = Grid::new(4);
        assert!(grid.contains(15));
        assert!(!grid.contains(16));
    }

    #[test]
    fn horizontal_steps_do_not_wrap() {
        let grid = Grid::new(4);
        assert_eq!(grid.step(3, Direction::Right), None);
        assert_eq!(grid.step(4, Direction::Left), None);
        assert_eq!(grid.step(5, Direction::Left), Some(4));
        assert_eq!(grid.step(2, Direction::Up), None);
        assert_eq!(grid.step(13, Direction::Down), None);
        assert_eq!(grid.step(9, Direction::Down), Some(13));
    }

    #[test]
    fn run_rejects_overhang() {
        let grid = Grid::new(4);
        assert!(grid.run(0, 2, Orientation::Horizontal, 3).is_none());
        let cells: alloc::vec::Vec<_> = grid.run(1, 1, Orientation::Vertical, 3).unwrap().collect();
        assert_eq!(cells, [5, 9, 13]);
    }
}
