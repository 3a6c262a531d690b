//! A bitset over the cells of one square board.
//!
//! Boards run up to 26×26, past what a single integer can hold, so bits are
//! packed into a vector of `u64` words sized once at construction. Set
//! operations, membership tests and grid rendering mirror a fixed bitboard.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{BitAnd, BitOr, Sub};

use crate::grid::{Cell, Grid};

const WORD_BITS: usize = u64::BITS as usize;

/// Set of cells on an N×N board.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSet {
    side: usize,
    words: Vec<u64>,
}

impl CellSet {
    /// Create an empty set for a board of the given geometry.
    pub fn new(grid: Grid) -> Self {
        let words = grid.cell_count().div_ceil(WORD_BITS);
        CellSet {
            side: grid.size(),
            words: vec![0; words],
        }
    }

    /// Build a set from cells, silently ignoring ones off the board.
    pub fn from_cells<I>(grid: Grid, cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut set = Self::new(grid);
        set.extend(cells);
        set
    }

    /// Board geometry this set was sized for.
    pub fn grid(&self) -> Grid {
        Grid::new(self.side)
    }

    /// Number of cells in the set.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// `true` once every cell of the board is in the set.
    pub fn is_full(&self) -> bool {
        self.len() == self.grid().cell_count()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        if !self.grid().contains(cell) {
            return false;
        }
        (self.words[cell / WORD_BITS] >> (cell % WORD_BITS)) & 1 == 1
    }

    /// Add `cell`. Returns `true` if it was not already present; cells off
    /// the board are rejected with `false`.
    pub fn insert(&mut self, cell: Cell) -> bool {
        if !self.grid().contains(cell) || self.contains(cell) {
            return false;
        }
        self.words[cell / WORD_BITS] |= 1 << (cell % WORD_BITS);
        true
    }

    /// Remove `cell`. Returns `true` if it was present.
    pub fn remove(&mut self, cell: Cell) -> bool {
        if !self.contains(cell) {
            return false;
        }
        self.words[cell / WORD_BITS] &= !(1 << (cell % WORD_BITS));
        true
    }

    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// `true` if every cell yielded by `cells` is in the set.
    pub fn contains_all<I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = Cell>,
    {
        cells.into_iter().all(|c| self.contains(c))
    }

    /// `true` if any cell yielded by `cells` is in the set.
    pub fn contains_any<I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = Cell>,
    {
        cells.into_iter().any(|c| self.contains(c))
    }

    /// Iterator over member cells in ascending order.
    pub fn iter(&self) -> Cells<'_> {
        Cells { set: self, idx: 0 }
    }

    /// Iterator over board cells that are *not* in the set.
    pub fn complement(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.grid().cell_count()).filter(move |&c| !self.contains(c))
    }

    fn zip_words(&self, rhs: &Self, op: impl Fn(u64, u64) -> u64) -> Self {
        debug_assert_eq!(self.side, rhs.side, "cell sets from different boards");
        CellSet {
            side: self.side,
            words: self
                .words
                .iter()
                .zip(rhs.words.iter())
                .map(|(&a, &b)| op(a, b))
                .collect(),
        }
    }
}

impl Extend<Cell> for CellSet {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

/// Iterator over the members of a [`CellSet`].
#[derive(Clone)]
pub struct Cells<'a> {
    set: &'a CellSet,
    idx: usize,
}

impl Iterator for Cells<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        let total = self.set.grid().cell_count();
        while self.idx < total {
            let idx = self.idx;
            self.idx += 1;
            if self.set.contains(idx) {
                return Some(idx);
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a CellSet {
    type Item = Cell;
    type IntoIter = Cells<'a>;

    fn into_iter(self) -> Cells<'a> {
        self.iter()
    }
}

impl BitOr for &CellSet {
    type Output = CellSet;
    fn bitor(self, rhs: Self) -> CellSet {
        self.zip_words(rhs, |a, b| a | b)
    }
}

impl BitAnd for &CellSet {
    type Output = CellSet;
    fn bitand(self, rhs: Self) -> CellSet {
        self.zip_words(rhs, |a, b| a & b)
    }
}

/// Cells in `self` but not in `rhs`.
impl Sub for &CellSet {
    type Output = CellSet;
    fn sub(self, rhs: Self) -> CellSet {
        self.zip_words(rhs, |a, b| a & !b)
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CellSet<{}x{}>:", self.side, self.side)?;
        writeln!(f, "{}", self)
    }
}

impl fmt::Display for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.grid();
        for r in 0..self.side {
            for c in 0..self.side {
                let mark = if self.contains(grid.to_index(r, c)) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", mark)?;
            }
            if r + 1 < self.side {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
