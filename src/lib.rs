#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod cellset;
mod common;
mod config;
pub mod density;
mod engine;
mod game;
mod grid;
#[cfg(feature = "std")]
mod logging;
pub mod placement;
pub mod prelude;
pub mod recovery;
mod ship;
pub mod targeting;

pub use cellset::{CellSet, Cells};
pub use common::*;
pub use config::*;
pub use engine::{Engine, EngineSnapshot};
pub use game::*;
pub use grid::{Cell, Direction, Grid};
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use ship::*;
pub use targeting::{Bound, Fault, FaultKind, Heading, Mode, TargetContext, TargetState};
