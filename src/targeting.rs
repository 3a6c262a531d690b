//! Targeting state: search, an open session on a found ship, or a fault.
//!
//! A session starts from one hit (the root), probes the four neighbours to
//! learn the ship's axis, then extends the run of hits at both ends until the
//! ship sinks or both ends are closed off.

use alloc::vec::Vec;

use crate::cellset::CellSet;
use crate::grid::{Cell, Direction, Grid};
use crate::ship::Orientation;

/// Axis of the ship being sunk, once a second hit reveals it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    Unknown,
    Known(Orientation),
}

/// One end of the hit run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Bound {
    Open,
    /// Closed by a miss, the board edge or an already fired cell.
    Closed,
}

/// Which end of the run an extension shot went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    Lower,
    Upper,
}

/// Working memory about the ship currently being sunk.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetContext {
    root: Cell,
    hits: Vec<Cell>,
    heading: Heading,
    lower: Bound,
    upper: Bound,
    recovered: bool,
}

impl TargetContext {
    /// Fresh session rooted at a single hit.
    pub fn open(root: Cell) -> Self {
        Self {
            root,
            hits: alloc::vec![root],
            heading: Heading::Unknown,
            lower: Bound::Open,
            upper: Bound::Open,
            recovered: false,
        }
    }

    /// Session rebuilt by fault recovery from a run of uncredited hits. With
    /// more than one hit the run's axis is already known.
    pub fn resume(root: Cell, run: Vec<Cell>, axis: Option<Orientation>) -> Self {
        let heading = match axis {
            Some(axis) if run.len() > 1 => Heading::Known(axis),
            _ => Heading::Unknown,
        };
        Self {
            root,
            hits: if run.is_empty() { alloc::vec![root] } else { run },
            heading,
            lower: Bound::Open,
            upper: Bound::Open,
            recovered: true,
        }
    }

    pub fn root(&self) -> Cell {
        self.root
    }

    /// Hits credited to this session, in the order they were found.
    pub fn hits(&self) -> &[Cell] {
        &self.hits
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn bounds(&self) -> (Bound, Bound) {
        (self.lower, self.upper)
    }

    /// `true` if this session was opened by fault recovery.
    pub fn is_recovered(&self) -> bool {
        self.recovered
    }

    pub fn add_hit(&mut self, cell: Cell) {
        if !self.hits.contains(&cell) {
            self.hits.push(cell);
        }
    }

    pub fn set_heading(&mut self, axis: Orientation) {
        self.heading = Heading::Known(axis);
    }

    pub fn close(&mut self, end: End) {
        match end {
            End::Lower => self.lower = Bound::Closed,
            End::Upper => self.upper = Bound::Closed,
        }
    }

    /// Unfired neighbours of the root, tagged with their direction.
    pub fn orientation_candidates(&self, grid: Grid, shots: &CellSet) -> Vec<(Direction, Cell)> {
        open_neighbours(grid, shots, self.root)
    }

    /// Cells one step beyond each open end of the hit run. An end whose next
    /// cell is off the board, on another row or already fired at is closed
    /// for good. Returns nothing while the heading is unknown.
    pub fn extension_candidates(&mut self, grid: Grid, shots: &CellSet) -> Vec<(End, Cell)> {
        let axis = match self.heading {
            Heading::Known(axis) => axis,
            Heading::Unknown => return Vec::new(),
        };
        let (Some(&min), Some(&max)) = (self.hits.iter().min(), self.hits.iter().max()) else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(2);
        for (end, anchor, dir) in [
            (End::Lower, min, Direction::backward(axis)),
            (End::Upper, max, Direction::forward(axis)),
        ] {
            let bound = match end {
                End::Lower => self.lower,
                End::Upper => self.upper,
            };
            if bound == Bound::Closed {
                continue;
            }
            match grid.step(anchor, dir).filter(|&c| !shots.contains(c)) {
                Some(cell) => out.push((end, cell)),
                None => {
                    log::trace!("closing {:?} end at cell {}", end, anchor);
                    self.close(end);
                }
            }
        }
        out
    }
}

/// The two kinds of ambiguity two touching ships can cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum FaultKind {
    /// Both ends of the run are closed yet nothing sank.
    Extension,
    /// A ship sank but the run held more hits than its length.
    SinkMismatch,
}

/// An active fault and the hits of the session that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Fault {
    pub kind: FaultKind,
    pub hits: Vec<Cell>,
    pub axis: Option<Orientation>,
}

impl Fault {
    pub fn from_session(kind: FaultKind, ctx: &TargetContext) -> Self {
        let axis = match ctx.heading {
            Heading::Known(axis) => Some(axis),
            Heading::Unknown => None,
        };
        Fault {
            kind,
            hits: ctx.hits.clone(),
            axis,
        }
    }
}

/// Engine targeting state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetState {
    Search,
    Target(TargetContext),
    Stuck(Fault),
}

/// Flat view of [`TargetState`] for callers and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    Search,
    Target,
    Stuck,
}

impl TargetState {
    pub fn mode(&self) -> Mode {
        match self {
            TargetState::Search => Mode::Search,
            TargetState::Target(_) => Mode::Target,
            TargetState::Stuck(_) => Mode::Stuck,
        }
    }
}

/// Unfired in-board neighbours of `cell`. Horizontal neighbours stay on the
/// same row.
pub fn open_neighbours(grid: Grid, shots: &CellSet, cell: Cell) -> Vec<(Direction, Cell)> {
    Direction::ALL
        .into_iter()
        .filter_map(|dir| grid.step(cell, dir).map(|c| (dir, c)))
        .filter(|&(_, c)| !shots.contains(c))
        .collect()
}
