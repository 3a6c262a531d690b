use rand::rngs::SmallRng;
use rand::SeedableRng;
use wavewatch::{
    duel, placement, Difficulty, Engine, EngineConfig, Fleet, GameStatus, Grid, GuessResult,
    Side, Skirmish,
};

fn engine(difficulty: Difficulty, seed: u64) -> Engine<SmallRng> {
    Engine::new(
        EngineConfig::standard(difficulty),
        SmallRng::seed_from_u64(seed),
    )
    .unwrap()
}

#[test]
fn skirmish_announces_sinks() {
    let grid = Grid::new(10);
    let target = Fleet::from_cell_lists(grid, &[vec![0, 1]]).unwrap();
    let mut game = Skirmish::new(engine(Difficulty::Normal, 1), target).unwrap();
    assert_eq!(game.resolve(50), GuessResult::Miss);
    assert_eq!(game.resolve(0), GuessResult::Hit);
    assert_eq!(game.resolve(0), GuessResult::Miss);
    assert_eq!(game.resolve(1), GuessResult::Sink(2));
    assert_eq!(game.status(), GameStatus::Won);
    let report = game.report();
    assert_eq!(report.shots, 4);
    assert_eq!(report.hits, 2);
    assert_eq!(report.ships_sunk, 1);
}

#[test]
fn every_difficulty_finishes() {
    let grid = Grid::new(10);
    for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
        for seed in 0..8 {
            let mut rng = SmallRng::seed_from_u64(seed + 100);
            let target = placement::place_fleet(&mut rng, grid, &[5, 4, 3, 3, 2]).unwrap();
            let mut game = Skirmish::new(engine(difficulty, seed), target).unwrap();
            let report = game.play_out().unwrap();
            assert_eq!(report.ships_sunk, 5);
            assert_eq!(report.hits, 17);
            assert!(report.shots >= 17 && report.shots <= 100);
            assert!(report.accuracy > 0.0 && report.accuracy <= 1.0);
        }
    }
}

#[test]
fn hunting_beats_random_on_average() {
    let grid = Grid::new(10);
    let mut totals = [0usize; 2];
    for seed in 0..20 {
        for (i, difficulty) in [Difficulty::Easy, Difficulty::Hard].into_iter().enumerate() {
            let mut rng = SmallRng::seed_from_u64(seed);
            let target = placement::place_fleet(&mut rng, grid, &[5, 4, 3, 3, 2]).unwrap();
            let mut game = Skirmish::new(engine(difficulty, seed), target).unwrap();
            totals[i] += game.play_out().unwrap().shots;
        }
    }
    assert!(totals[1] < totals[0], "hard {} vs easy {}", totals[1], totals[0]);
}

#[test]
fn duel_has_a_winner() {
    let report = duel(engine(Difficulty::Hard, 7), engine(Difficulty::Easy, 8)).unwrap();
    assert!(matches!(report.winner, Side::Left | Side::Right));
    let winner = match report.winner {
        Side::Left => report.left,
        Side::Right => report.right,
    };
    assert_eq!(winner.ships_sunk, 5);
    assert!(report.turns <= 100);
}
