//! Common types: error kinds and shot outcomes.

use crate::grid::Cell;

/// Outcome of a shot as announced by the side that was fired upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessResult {
    /// Shot hit a ship that is still afloat.
    Hit,
    /// Shot missed all ships.
    Miss,
    /// Shot sank a ship, carrying its length.
    Sink(usize),
}

/// Fatal configuration errors. No engine is produced when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Difficulty outside 1..=3.
    UnknownDifficulty(u8),
    /// Board side outside the supported range.
    BoardSizeOutOfRange { size: usize },
    /// No ships to place.
    EmptyFleet,
    /// A ship is empty or longer than the board side.
    ShipLengthOutOfRange { length: usize, board_size: usize },
    /// Random placement gave up on a ship of this length.
    FleetDoesNotFit { length: usize },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::UnknownDifficulty(d) => write!(f, "Unknown AI difficulty {}", d),
            ConfigError::BoardSizeOutOfRange { size } => write!(
                f,
                "Board size {} outside {}..={}",
                size,
                crate::config::MIN_BOARD_SIZE,
                crate::config::MAX_BOARD_SIZE
            ),
            ConfigError::EmptyFleet => write!(f, "No ship list provided"),
            ConfigError::ShipLengthOutOfRange { length, board_size } => write!(
                f,
                "Ship length {} does not fit a {}x{} board",
                length, board_size, board_size
            ),
            ConfigError::FleetDoesNotFit { length } => {
                write!(f, "No space left for a ship of length {}", length)
            }
        }
    }
}

/// Errors in fleet data handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleetError {
    /// Fleet has no ships.
    NoShips,
    /// A ship has no cells.
    EmptyShip,
    /// Cell lies off the board.
    OutOfBounds { cell: Cell },
    /// Ship cells starting at `first` are not one straight gap-free run.
    NotContiguous { first: Cell },
    /// Two ships share `cell`.
    Overlap { cell: Cell },
    /// The opponent fleet was already supplied for this match.
    AlreadySet,
}

impl core::fmt::Display for FleetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FleetError::NoShips => write!(f, "Fleet has no ships"),
            FleetError::EmptyShip => write!(f, "Ship has no cells"),
            FleetError::OutOfBounds { cell } => write!(f, "Cell {} is off the board", cell),
            FleetError::NotContiguous { first } => {
                write!(f, "Ship starting at cell {} is not a straight line", first)
            }
            FleetError::Overlap { cell } => write!(f, "Ships overlap at cell {}", cell),
            FleetError::AlreadySet => write!(f, "Opponent fleet was already set"),
        }
    }
}

/// Errors returned when asking the engine for a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotError {
    /// `start` has not been called.
    NotStarted,
    /// The opponent fleet has not been supplied.
    OpponentFleetMissing,
    /// Every cell on the board has already been fired at.
    BoardExhausted,
}

impl ShotError {
    /// `true` for integration mistakes as opposed to the board running out.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, ShotError::NotStarted | ShotError::OpponentFleetMissing)
    }
}

impl core::fmt::Display for ShotError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShotError::NotStarted => write!(f, "AI has not been started"),
            ShotError::OpponentFleetMissing => write!(f, "Opponent fleet not set"),
            ShotError::BoardExhausted => write!(f, "Every cell has already been fired at"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
#[cfg(feature = "std")]
impl std::error::Error for FleetError {}
#[cfg(feature = "std")]
impl std::error::Error for ShotError {}
