#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use wavewatch::{
    duel, init_logging, placement, Difficulty, Engine, EngineConfig, MatchReport, Side, Skirmish,
    DEFAULT_BOARD_SIZE,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Run repeated games of one AI against randomly placed fleets.
    Bench {
        #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
        difficulty: Difficulty,
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        board_size: usize,
        #[arg(long, value_delimiter = ',', default_value = "5,4,3,3,2")]
        fleet: Vec<usize>,
        #[arg(long, default_value_t = 100)]
        games: usize,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },
    /// Pit two AIs against each other.
    Duel {
        #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
        left: Difficulty,
        #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
        right: Difficulty,
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        board_size: usize,
        #[arg(long, value_delimiter = ',', default_value = "5,4,3,3,2")]
        fleet: Vec<usize>,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>, offset: u64) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s.wrapping_add(offset)),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            difficulty,
            board_size,
            fleet,
            games,
            seed,
            json,
        } => {
            let config = EngineConfig::new(difficulty, board_size, &fleet)?;
            if let Some(s) = seed {
                log::info!("Using fixed seed: {} (games will be reproducible)", s);
            }
            let mut rng = make_rng(seed, 0);
            let mut reports: Vec<MatchReport> = Vec::with_capacity(games);
            for game in 0..games {
                let engine_rng = SmallRng::from_rng(&mut rng);
                let engine = Engine::new(config.clone(), engine_rng)?;
                let target = placement::place_fleet(&mut rng, config.grid(), &fleet)?;
                let mut skirmish = Skirmish::new(engine, target)?;
                let report = skirmish.play_out()?;
                log::debug!("game {}: {} shots", game, report.shots);
                reports.push(report);
            }
            print_bench(difficulty, board_size, &reports, json)?;
        }
        Commands::Duel {
            left,
            right,
            board_size,
            fleet,
            seed,
            json,
        } => {
            let left_engine = Engine::new(
                EngineConfig::new(left, board_size, &fleet)?,
                make_rng(seed, 0),
            )?;
            let right_engine = Engine::new(
                EngineConfig::new(right, board_size, &fleet)?,
                make_rng(seed, 1),
            )?;
            let report = duel(left_engine, right_engine)?;
            if json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                let (winner, loser) = match report.winner {
                    Side::Left => (left, right),
                    Side::Right => (right, left),
                };
                println!(
                    "{:?} ({:?}) beat {:?} in {} turns",
                    report.winner, winner, loser, report.turns
                );
                println!(
                    "left:  {} shots, {} hits ({:.0}%)",
                    report.left.shots,
                    report.left.hits,
                    report.left.accuracy * 100.0
                );
                println!(
                    "right: {} shots, {} hits ({:.0}%)",
                    report.right.shots,
                    report.right.hits,
                    report.right.accuracy * 100.0
                );
            }
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn print_bench(
    difficulty: Difficulty,
    board_size: usize,
    reports: &[MatchReport],
    json: bool,
) -> anyhow::Result<()> {
    let shots: Vec<usize> = reports.iter().map(|r| r.shots).collect();
    let mean = if shots.is_empty() {
        0.0
    } else {
        shots.iter().sum::<usize>() as f64 / shots.len() as f64
    };
    let min = shots.iter().min().copied().unwrap_or(0);
    let max = shots.iter().max().copied().unwrap_or(0);

    if json {
        let result = json!({
            "difficulty": difficulty,
            "board_size": board_size,
            "games": reports.len(),
            "mean_shots": mean,
            "min_shots": min,
            "max_shots": max,
        });
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!(
            "{:?} on {}x{}: {} games, mean {:.1} shots (min {}, max {})",
            difficulty,
            board_size,
            board_size,
            reports.len(),
            mean,
            min,
            max
        );
    }
    Ok(())
}
