//! Random fleet placement for the AI's own board.

use alloc::vec::Vec;
use rand::Rng;

use crate::common::ConfigError;
use crate::config::PLACEMENT_ATTEMPTS;
use crate::grid::Grid;
use crate::ship::{Fleet, Orientation, Ship};

/// Returns a random non-overlapping ship of `length` for `fleet`, or `None`
/// after [`PLACEMENT_ATTEMPTS`] rejected samples.
pub fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    fleet: &Fleet,
    length: usize,
) -> Option<Ship> {
    let size = grid.size();
    if length == 0 || length > size {
        return None;
    }
    for _ in 0..PLACEMENT_ATTEMPTS {
        let orient = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let max_r = if orient == Orientation::Vertical {
            size - length
        } else {
            size - 1
        };
        let max_c = if orient == Orientation::Horizontal {
            size - length
        } else {
            size - 1
        };
        let r = rng.random_range(0..=max_r);
        let c = rng.random_range(0..=max_c);
        let ship = match Ship::new(grid, r, c, orient, length) {
            Ok(ship) => ship,
            Err(_) => continue,
        };
        if !fleet.overlaps(&ship) {
            return Some(ship);
        }
    }
    None
}

/// Place a whole fleet, longest ships first.
pub fn place_fleet<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    lengths: &[usize],
) -> Result<Fleet, ConfigError> {
    let mut sorted: Vec<usize> = lengths.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut fleet = Fleet::empty(grid);
    for length in sorted {
        let ship = random_placement(rng, grid, &fleet, length)
            .ok_or(ConfigError::FleetDoesNotFit { length })?;
        fleet
            .add(ship)
            .map_err(|_| ConfigError::FleetDoesNotFit { length })?;
    }
    log::debug!(
        "placed {} ships on a {}x{} board",
        fleet.ships().len(),
        grid.size(),
        grid.size()
    );
    Ok(fleet)
}
