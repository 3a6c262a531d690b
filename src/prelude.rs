//! Commonly used types and utilities for ease of import.

pub use crate::{
    duel, Cell, CellSet, ConfigError, Difficulty, Engine, EngineConfig, Fleet, GameStatus, Grid,
    GuessResult, Mode, ShotError, Skirmish,
};

#[cfg(feature = "std")]
pub use crate::init_logging;
