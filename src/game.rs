//! Minimal match owner for driving engines end to end: resolves shots against
//! a fleet, announces sinks and keeps the statistics the game screen shows.

use alloc::vec::Vec;
use rand::Rng;

use crate::cellset::CellSet;
use crate::common::{FleetError, GuessResult, ShotError};
use crate::engine::Engine;
use crate::grid::Cell;
use crate::ship::Fleet;

/// Current status of a match from the shooter's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won,
}

/// Errors that end a simulated match early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    Fleet(FleetError),
    Shot(ShotError),
}

impl From<FleetError> for MatchError {
    fn from(err: FleetError) -> Self {
        MatchError::Fleet(err)
    }
}

impl From<ShotError> for MatchError {
    fn from(err: ShotError) -> Self {
        MatchError::Shot(err)
    }
}

impl core::fmt::Display for MatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatchError::Fleet(e) => write!(f, "Fleet error: {}", e),
            MatchError::Shot(e) => write!(f, "Shot error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatchError {}

/// Shot statistics for one side.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchReport {
    pub shots: usize,
    pub hits: usize,
    pub ships_sunk: usize,
    pub accuracy: f64,
}

/// One engine firing at a fixed fleet until every ship is sunk.
pub struct Skirmish<R: Rng> {
    engine: Engine<R>,
    target: Fleet,
    shots: CellSet,
    sunk: Vec<bool>,
    shot_count: usize,
    hit_count: usize,
}

impl<R: Rng> Skirmish<R> {
    /// Start `engine` and hand it `target` as the opponent fleet.
    pub fn new(mut engine: Engine<R>, target: Fleet) -> Result<Self, MatchError> {
        engine.start();
        engine.set_opponent_fleet(&target.cell_lists())?;
        let shots = CellSet::new(target.occupied().grid());
        let sunk = alloc::vec![false; target.ships().len()];
        Ok(Self {
            engine,
            target,
            shots,
            sunk,
            shot_count: 0,
            hit_count: 0,
        })
    }

    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    pub fn into_engine(self) -> Engine<R> {
        self.engine
    }

    /// Ask the engine for a shot and resolve it.
    pub fn play_turn(&mut self) -> Result<(Cell, GuessResult), ShotError> {
        let cell = self.engine.get_shot()?;
        Ok((cell, self.resolve(cell)))
    }

    /// Resolve a shot at `cell` against the target fleet. Repeat shots are
    /// wasted turns and count as misses.
    pub fn resolve(&mut self, cell: Cell) -> GuessResult {
        self.shot_count += 1;
        if !self.shots.insert(cell) {
            log::warn!("cell {} fired at twice, turn wasted", cell);
            return GuessResult::Miss;
        }
        let Some(idx) = self.target.ship_at(cell) else {
            return GuessResult::Miss;
        };
        self.hit_count += 1;
        let ship = &self.target.ships()[idx];
        if !self.sunk[idx] && ship.is_sunk_by(&self.shots) {
            self.sunk[idx] = true;
            return GuessResult::Sink(ship.len());
        }
        GuessResult::Hit
    }

    pub fn status(&self) -> GameStatus {
        if self.sunk.iter().all(|&s| s) {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    pub fn report(&self) -> MatchReport {
        let accuracy = if self.shot_count == 0 {
            0.0
        } else {
            self.hit_count as f64 / self.shot_count as f64
        };
        MatchReport {
            shots: self.shot_count,
            hits: self.hit_count,
            ships_sunk: self.sunk.iter().filter(|&&s| s).count(),
            accuracy,
        }
    }

    /// Play until every target ship is sunk.
    pub fn play_out(&mut self) -> Result<MatchReport, ShotError> {
        while self.status() == GameStatus::InProgress {
            self.play_turn()?;
        }
        Ok(self.report())
    }
}

/// Which engine won a duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelReport {
    pub winner: Side,
    pub turns: usize,
    pub left: MatchReport,
    pub right: MatchReport,
}

/// Two engines fire at each other's own fleet in turn, `left` first.
pub fn duel<A: Rng, B: Rng>(left: Engine<A>, right: Engine<B>) -> Result<DuelReport, MatchError> {
    let left_target = right.own_fleet().clone();
    let right_target = left.own_fleet().clone();
    let mut l = Skirmish::new(left, left_target)?;
    let mut r = Skirmish::new(right, right_target)?;

    let mut turns = 0;
    let winner = loop {
        turns += 1;
        l.play_turn()?;
        if l.status() == GameStatus::Won {
            break Side::Left;
        }
        r.play_turn()?;
        if r.status() == GameStatus::Won {
            break Side::Right;
        }
    };
    log::info!("{:?} won after {} turns", winner, turns);
    Ok(DuelReport {
        winner,
        turns,
        left: l.report(),
        right: r.report(),
    })
}
