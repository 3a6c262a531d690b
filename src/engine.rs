//! Computer opponent: owns its fleet, its shot history and targeting state,
//! and answers one shot per call.

use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::cellset::CellSet;
use crate::common::{ConfigError, FleetError, ShotError};
use crate::config::{Difficulty, EngineConfig, ADV_SEARCH_SEED};
use crate::density;
use crate::grid::{Cell, Grid};
use crate::placement::place_fleet;
use crate::recovery;
use crate::ship::Fleet;
use crate::targeting::{Fault, FaultKind, Heading, Mode, TargetContext, TargetState};

/// Opponent fleet as seen by the engine: positions are only used to tell
/// hits from misses and to notice sunk ships.
#[derive(Debug, Clone)]
struct Opponent {
    fleet: Fleet,
    sunk: Vec<bool>,
    sunk_cells: CellSet,
}

impl Opponent {
    fn new(fleet: Fleet) -> Self {
        let sunk = alloc::vec![false; fleet.ships().len()];
        let sunk_cells = CellSet::new(fleet.occupied().grid());
        Self {
            fleet,
            sunk,
            sunk_cells,
        }
    }

    fn is_hit(&self, cell: Cell) -> bool {
        self.fleet.occupied().contains(cell)
    }

    /// Mark every live ship covered by `shots` as sunk and return the
    /// lengths of those newly sunk.
    fn update_sunk(&mut self, shots: &CellSet) -> Vec<usize> {
        let mut newly = Vec::new();
        for (i, ship) in self.fleet.ships().iter().enumerate() {
            if !self.sunk[i] && ship.is_sunk_by(shots) {
                self.sunk[i] = true;
                self.sunk_cells.extend(ship.cells().iter().copied());
                newly.push(ship.len());
            }
        }
        newly
    }

    /// Longest ship still afloat.
    fn longest_live(&self) -> Option<usize> {
        self.fleet
            .ships()
            .iter()
            .zip(&self.sunk)
            .filter(|&(_, &sunk)| !sunk)
            .map(|(s, _)| s.len())
            .max()
    }
}

/// Serializable view of an engine for logging and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineSnapshot {
    pub difficulty: Difficulty,
    pub board_size: usize,
    pub mode: Mode,
    pub shots: Vec<Cell>,
    pub hits: Vec<Cell>,
    pub confirmed_hits: Vec<Cell>,
    pub ships_sunk: usize,
}

/// The computer opponent.
pub struct Engine<R: Rng = SmallRng> {
    config: EngineConfig,
    rng: R,
    own_fleet: Fleet,
    started: bool,
    opponent: Option<Opponent>,
    shots: CellSet,
    shot_log: Vec<Cell>,
    hits: CellSet,
    confirmed: Vec<Cell>,
    warmup: u32,
    state: TargetState,
}

impl<R: Rng> Engine<R> {
    /// Build an engine and place its own fleet. An unplaceable fleet is a
    /// configuration error and no engine is produced.
    pub fn new(config: EngineConfig, mut rng: R) -> Result<Self, ConfigError> {
        let grid = config.grid();
        let own_fleet = place_fleet(&mut rng, grid, config.fleet())?;
        let warmup = if config.difficulty() == Difficulty::Hard {
            rng.random_range(0..=ADV_SEARCH_SEED)
        } else {
            0
        };
        log::debug!(
            "engine ready: {:?} on {}x{}, {} opening random shots",
            config.difficulty(),
            grid.size(),
            grid.size(),
            warmup
        );
        Ok(Self {
            config,
            rng,
            own_fleet,
            started: false,
            opponent: None,
            shots: CellSet::new(grid),
            shot_log: Vec::new(),
            hits: CellSet::new(grid),
            confirmed: Vec::new(),
            warmup,
            state: TargetState::Search,
        })
    }

    /// Arm the engine for play and hand back its fleet.
    pub fn start(&mut self) -> &Fleet {
        self.started = true;
        &self.own_fleet
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The engine's own ships: occupied cells plus per-ship sequences.
    pub fn own_fleet(&self) -> &Fleet {
        &self.own_fleet
    }

    /// Supply the opponent's ships once, before the first shot.
    pub fn set_opponent_fleet(&mut self, ships: &[Vec<Cell>]) -> Result<(), FleetError> {
        if self.opponent.is_some() {
            return Err(FleetError::AlreadySet);
        }
        let fleet = Fleet::from_cell_lists(self.config.grid(), ships)?;
        self.opponent = Some(Opponent::new(fleet));
        Ok(())
    }

    /// Cells fired at so far, in order.
    pub fn shots(&self) -> &[Cell] {
        &self.shot_log
    }

    /// Hits archived from sessions that ended in a sink.
    pub fn confirmed_hits(&self) -> &[Cell] {
        &self.confirmed
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn state(&self) -> &TargetState {
        &self.state
    }

    /// Random opening shots `Hard` has left before density search.
    pub fn warmup_remaining(&self) -> u32 {
        self.warmup
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            difficulty: self.config.difficulty(),
            board_size: self.config.board_size(),
            mode: self.mode(),
            shots: self.shot_log.clone(),
            hits: self.hits.iter().collect(),
            confirmed_hits: self.confirmed.clone(),
            ships_sunk: self
                .opponent
                .as_ref()
                .map_or(0, |o| o.sunk.iter().filter(|&&s| s).count()),
        }
    }

    /// Choose, record and return this turn's target.
    pub fn get_shot(&mut self) -> Result<Cell, ShotError> {
        if !self.started {
            return Err(ShotError::NotStarted);
        }
        if self.opponent.is_none() {
            return Err(ShotError::OpponentFleetMissing);
        }
        if self.shots.is_full() {
            return Err(ShotError::BoardExhausted);
        }

        if !self.config.difficulty().hunts() {
            let cell = self.random_cell()?;
            self.fire(cell);
            self.update_sunk();
            return Ok(cell);
        }

        match core::mem::replace(&mut self.state, TargetState::Search) {
            TargetState::Search => self.search_shot(),
            TargetState::Target(ctx) => self.target_shot(ctx),
            TargetState::Stuck(fault) => self.recover_shot(fault),
        }
    }

    fn grid(&self) -> Grid {
        self.config.grid()
    }

    fn random_cell(&mut self) -> Result<Cell, ShotError> {
        density::random_unshot(&mut self.rng, &self.shots).ok_or(ShotError::BoardExhausted)
    }

    /// Record a shot and report whether it hit.
    fn fire(&mut self, cell: Cell) -> bool {
        self.shots.insert(cell);
        self.shot_log.push(cell);
        let hit = self.opponent.as_ref().is_some_and(|o| o.is_hit(cell));
        if hit {
            self.hits.insert(cell);
        }
        hit
    }

    fn update_sunk(&mut self) -> Vec<usize> {
        match self.opponent.as_mut() {
            Some(opponent) => opponent.update_sunk(&self.shots),
            None => Vec::new(),
        }
    }

    fn search_shot(&mut self) -> Result<Cell, ShotError> {
        let cell = match self.config.difficulty() {
            Difficulty::Hard if self.warmup > 0 => {
                self.warmup -= 1;
                self.random_cell()?
            }
            Difficulty::Hard => {
                let length = self.opponent.as_ref().and_then(Opponent::longest_live);
                let grid = self.grid();
                match length.and_then(|l| density::density_shot(&mut self.rng, grid, &self.shots, l)) {
                    Some(cell) => cell,
                    None => self.random_cell()?,
                }
            }
            _ => self.random_cell()?,
        };

        let hit = self.fire(cell);
        let sunk = self.update_sunk();
        if hit && sunk.is_empty() {
            log::debug!("hit at cell {}, opening session", cell);
            self.state = TargetState::Target(TargetContext::open(cell));
        } else if hit {
            log::debug!("cell {} sank a ship outright", cell);
            self.confirmed.push(cell);
        }
        Ok(cell)
    }

    fn target_shot(&mut self, mut ctx: TargetContext) -> Result<Cell, ShotError> {
        let grid = self.grid();
        match ctx.heading() {
            Heading::Unknown => {
                let candidates = ctx.orientation_candidates(grid, &self.shots);
                let Some(&(dir, cell)) = candidates.choose(&mut self.rng) else {
                    log::debug!("no open neighbour around root {}", ctx.root());
                    return self.recover_shot(Fault::from_session(FaultKind::Extension, &ctx));
                };
                if self.fire(cell) {
                    log::debug!("orientation {:?} found from cell {}", dir.axis(), cell);
                    ctx.set_heading(dir.axis());
                    ctx.add_hit(cell);
                }
                Ok(self.after_session_shot(ctx, cell))
            }
            Heading::Known(_) => {
                let candidates = ctx.extension_candidates(grid, &self.shots);
                let Some(&(end, cell)) = candidates.choose(&mut self.rng) else {
                    log::debug!("run {:?} cannot be extended", ctx.hits());
                    return self.recover_shot(Fault::from_session(FaultKind::Extension, &ctx));
                };
                if self.fire(cell) {
                    ctx.add_hit(cell);
                } else {
                    log::trace!("miss at cell {}, closing {:?} end", cell, end);
                    ctx.close(end);
                }
                Ok(self.after_session_shot(ctx, cell))
            }
        }
    }

    /// Sink check after a session shot; decides the next state.
    fn after_session_shot(&mut self, ctx: TargetContext, cell: Cell) -> Cell {
        let sunk = self.update_sunk();
        let Some(&length) = sunk.first() else {
            self.state = TargetState::Target(ctx);
            return cell;
        };

        log::debug!("ship of length {} sunk at cell {}", length, cell);
        self.confirmed.extend(ctx.hits().iter().copied());
        self.state = if ctx.hits().len() != length {
            log::debug!(
                "session held {} hits for a ship of {}, flagging mismatch",
                ctx.hits().len(),
                length
            );
            TargetState::Stuck(Fault::from_session(FaultKind::SinkMismatch, &ctx))
        } else if ctx.is_recovered() && !self.uncredited().is_empty() {
            TargetState::Stuck(Fault::from_session(FaultKind::SinkMismatch, &ctx))
        } else {
            TargetState::Search
        };
        cell
    }

    fn uncredited(&self) -> CellSet {
        match self.opponent.as_ref() {
            Some(o) => recovery::uncredited_hits(&self.hits, &o.sunk_cells),
            None => CellSet::new(self.grid()),
        }
    }

    fn recover_shot(&mut self, fault: Fault) -> Result<Cell, ShotError> {
        log::debug!("recovering from {:?} fault over {:?}", fault.kind, fault.hits);
        let uncredited = self.uncredited();
        match recovery::plan(self.grid(), &self.shots, &fault, &uncredited) {
            Some(ctx) => self.target_shot(ctx),
            None => {
                log::debug!("no stray hits left to chase, back to search");
                self.search_shot()
            }
        }
    }
}

impl<R: Rng> core::fmt::Debug for Engine<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("started", &self.started)
            .field("shots", &self.shot_log.len())
            .field("state", &self.state)
            .finish()
    }
}
