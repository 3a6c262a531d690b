use rand::rngs::SmallRng;
use rand::SeedableRng;
use wavewatch::{
    ConfigError, Difficulty, Engine, EngineConfig, FleetError, Mode, ShotError, TargetState,
};

fn engine(difficulty: Difficulty, size: usize, fleet: &[usize], seed: u64) -> Engine<SmallRng> {
    let config = EngineConfig::new(difficulty, size, fleet).unwrap();
    Engine::new(config, SmallRng::seed_from_u64(seed)).unwrap()
}

#[test]
fn shot_before_start_is_a_contract_violation() {
    let mut ai = engine(Difficulty::Normal, 4, &[2], 1);
    let err = ai.get_shot().unwrap_err();
    assert_eq!(err, ShotError::NotStarted);
    assert!(err.is_contract_violation());

    ai.start();
    assert_eq!(ai.get_shot().unwrap_err(), ShotError::OpponentFleetMissing);
    assert!(ai.shots().is_empty());
}

#[test]
fn opponent_fleet_is_set_once() {
    let mut ai = engine(Difficulty::Normal, 4, &[2], 1);
    ai.set_opponent_fleet(&[vec![0, 1]]).unwrap();
    assert_eq!(
        ai.set_opponent_fleet(&[vec![4, 5]]).unwrap_err(),
        FleetError::AlreadySet
    );
}

#[test]
fn opponent_fleet_is_validated() {
    let mut ai = engine(Difficulty::Normal, 4, &[2], 1);
    assert_eq!(
        ai.set_opponent_fleet(&[vec![3, 4]]).unwrap_err(),
        FleetError::NotContiguous { first: 3 }
    );
    assert_eq!(
        ai.set_opponent_fleet(&[vec![15, 16]]).unwrap_err(),
        FleetError::OutOfBounds { cell: 16 }
    );
    let empty: [Vec<usize>; 0] = [];
    assert_eq!(ai.set_opponent_fleet(&empty).unwrap_err(), FleetError::NoShips);
}

#[test]
fn unplaceable_fleet_produces_no_engine() {
    let config = EngineConfig::new(Difficulty::Hard, 2, &[2, 2, 2]).unwrap();
    let err = Engine::new(config, SmallRng::seed_from_u64(3)).unwrap_err();
    assert_eq!(err, ConfigError::FleetDoesNotFit { length: 2 });
}

#[test]
fn own_fleet_matches_lengths() {
    let mut ai = engine(Difficulty::Hard, 10, &[5, 4, 3, 3, 2], 9);
    let fleet = ai.start();
    let mut lengths: Vec<_> = fleet.ships().iter().map(|s| s.len()).collect();
    lengths.sort_unstable();
    assert_eq!(lengths, [2, 3, 3, 4, 5]);
    assert_eq!(fleet.occupied().len(), 17);
}

#[test]
fn exhausted_board_is_reported() {
    let mut ai = engine(Difficulty::Hard, 3, &[2], 5);
    ai.start();
    ai.set_opponent_fleet(&[vec![0, 1]]).unwrap();
    for _ in 0..9 {
        ai.get_shot().unwrap();
    }
    let err = ai.get_shot().unwrap_err();
    assert_eq!(err, ShotError::BoardExhausted);
    assert!(!err.is_contract_violation());
    assert_eq!(ai.get_shot().unwrap_err(), ShotError::BoardExhausted);
}

/// 4x4 board, one ship on row 0 columns 1..=3.
#[test]
fn sinks_ship_without_wrapping_rows() {
    let ship = [1usize, 2, 3];
    for seed in 0..200 {
        let mut ai = engine(Difficulty::Normal, 4, &[3], seed);
        ai.start();
        ai.set_opponent_fleet(&[ship.to_vec()]).unwrap();

        // Random search until the first hit.
        let root = loop {
            let cell = ai.get_shot().unwrap();
            if ship.contains(&cell) {
                break cell;
            }
        };
        assert_eq!(ai.mode(), Mode::Target, "seed {}", seed);

        let mut session = vec![root];
        while ai.mode() == Mode::Target {
            session.push(ai.get_shot().unwrap());
        }
        assert!(
            !session.contains(&4),
            "seed {}: wrapped onto the next row in {:?}",
            seed,
            session
        );
        assert!(session.len() <= 5, "seed {}: {:?}", seed, session);
        assert!(ship.iter().all(|c| ai.shots().contains(c)));
        assert_eq!(ai.state(), &TargetState::Search);
        let mut confirmed = ai.confirmed_hits().to_vec();
        confirmed.sort_unstable();
        assert_eq!(confirmed, ship);
    }
}

#[test]
fn easy_never_hunts() {
    let mut ai = engine(Difficulty::Easy, 5, &[2], 4);
    ai.start();
    ai.set_opponent_fleet(&[vec![0, 1, 2, 3, 4], vec![10, 11, 12]])
        .unwrap();
    for _ in 0..25 {
        ai.get_shot().unwrap();
        assert_eq!(ai.mode(), Mode::Search);
    }
}

#[test]
fn singleton_ship_needs_no_session() {
    let mut ai = engine(Difficulty::Normal, 2, &[1], 8);
    ai.start();
    ai.set_opponent_fleet(&[vec![3]]).unwrap();
    loop {
        let cell = ai.get_shot().unwrap();
        assert_eq!(ai.mode(), Mode::Search);
        if cell == 3 {
            break;
        }
    }
    assert_eq!(ai.confirmed_hits(), [3]);
}

#[test]
fn hard_opening_budget_is_bounded() {
    for seed in 0..32 {
        let ai = engine(Difficulty::Hard, 10, &[5, 4, 3, 3, 2], seed);
        assert!(ai.warmup_remaining() <= 3);
    }
    let ai = engine(Difficulty::Normal, 10, &[5], 0);
    assert_eq!(ai.warmup_remaining(), 0);
}

/// Three horizontal ships filling a 3x3 board: any vertical probe fills a
/// column that belongs to three different ships.
#[test]
fn packed_board_recovers_from_faults() {
    let rows = [vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]];
    let mut saw_stuck = false;
    for seed in 0..64 {
        let mut ai = engine(Difficulty::Normal, 3, &[3], seed);
        ai.start();
        ai.set_opponent_fleet(&rows).unwrap();
        for _ in 0..9 {
            ai.get_shot().unwrap();
            saw_stuck |= ai.mode() == Mode::Stuck;
        }
        let mut shots = ai.shots().to_vec();
        shots.sort_unstable();
        assert_eq!(shots, (0..9).collect::<Vec<_>>(), "seed {}", seed);
        assert_eq!(ai.snapshot().ships_sunk, 3);
        assert_eq!(ai.get_shot().unwrap_err(), ShotError::BoardExhausted);
    }
    assert!(saw_stuck);
}

#[test]
fn touching_ships_are_all_sunk() {
    // Two ships end to end on one row plus a column ship below them.
    let fleet = [vec![0, 1], vec![2, 3, 4], vec![11, 17, 23]];
    for seed in 0..64 {
        for difficulty in [Difficulty::Normal, Difficulty::Hard] {
            let mut ai = engine(difficulty, 6, &[3, 2], seed);
            ai.start();
            ai.set_opponent_fleet(&fleet).unwrap();
            while ai.snapshot().ships_sunk < 3 {
                ai.get_shot().unwrap();
            }
            assert!(ai.shots().len() <= 36);
        }
    }
}

#[test]
fn snapshot_serializes() {
    let mut ai = engine(Difficulty::Hard, 5, &[3, 2], 21);
    ai.start();
    ai.set_opponent_fleet(&[vec![0, 1, 2], vec![9, 14]]).unwrap();
    for _ in 0..6 {
        ai.get_shot().unwrap();
    }
    let snap = ai.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    let back: wavewatch::EngineSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snap, back);
    assert_eq!(back.shots.len(), 6);
    assert_eq!(back.board_size, 5);
}
