use alloc::vec::Vec;

use crate::common::ConfigError;
use crate::grid::Grid;

pub const MIN_BOARD_SIZE: usize = 2;
pub const MAX_BOARD_SIZE: usize = 26;
pub const DEFAULT_BOARD_SIZE: usize = 10;

/// Carrier, battleship, cruiser, submarine, destroyer.
pub const DEFAULT_FLEET: [usize; 5] = [5, 4, 3, 3, 2];

/// Random placement attempts per ship before giving up.
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Upper bound on the random opening shots `Hard` takes before density
/// search. The actual count is drawn once per match from `0..=ADV_SEARCH_SEED`.
pub const ADV_SEARCH_SEED: u32 = 3;

/// AI difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", derive(clap::ValueEnum))]
pub enum Difficulty {
    /// Random shots only.
    Easy,
    /// Random search, then sinks what it finds.
    Normal,
    /// Density search after a short random opening, then sinks what it finds.
    Hard,
}

impl Difficulty {
    /// Numeric tier, 1 to 3.
    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Whether a hit opens a targeting session at this tier.
    pub fn hunts(self) -> bool {
        self != Difficulty::Easy
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Difficulty::Easy),
            2 => Ok(Difficulty::Normal),
            3 => Ok(Difficulty::Hard),
            other => Err(ConfigError::UnknownDifficulty(other)),
        }
    }
}

/// Immutable per-match engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    difficulty: Difficulty,
    grid: Grid,
    fleet: Vec<usize>,
}

impl EngineConfig {
    /// Validate settings. Whether the fleet actually fits is only known once
    /// placement has been attempted.
    pub fn new(
        difficulty: Difficulty,
        board_size: usize,
        fleet: &[usize],
    ) -> Result<Self, ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size) {
            return Err(ConfigError::BoardSizeOutOfRange { size: board_size });
        }
        if fleet.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        if let Some(&length) = fleet.iter().find(|&&l| l == 0 || l > board_size) {
            return Err(ConfigError::ShipLengthOutOfRange { length, board_size });
        }
        Ok(Self {
            difficulty,
            grid: Grid::new(board_size),
            fleet: fleet.to_vec(),
        })
    }

    /// Standard 10×10 board with the classic fleet.
    pub fn standard(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            grid: Grid::new(DEFAULT_BOARD_SIZE),
            fleet: DEFAULT_FLEET.to_vec(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn board_size(&self) -> usize {
        self.grid.size()
    }

    /// Own fleet ship lengths, in the order given.
    pub fn fleet(&self) -> &[usize] {
        &self.fleet
    }
}
