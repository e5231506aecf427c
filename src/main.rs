use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use engine_2048::config::EngineConfig;
use engine_2048::engine::{Game, Move};
use engine_2048::scenarios;

#[derive(Debug, Parser)]
#[command(name = "engine-2048", version, about = "2048 board engine driver")]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,

    /// Engine config (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the RNG seed
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Replay the fixed scenarios (all of them if none are named)
    Scenarios {
        names: Vec<String>,
    },
    /// Play random moves until the game is over or the move cap is reached
    Play {
        /// Stop after this many moves
        #[arg(long, default_value_t = 10_000)]
        moves: u64,
        /// Only print the final board
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_toml(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    match args.cmd {
        Cmd::Scenarios { names } => run_scenarios(&names, &config),
        Cmd::Play { moves, quiet } => play(moves, quiet, &config),
    }
}

fn run_scenarios(names: &[String], config: &EngineConfig) -> anyhow::Result<()> {
    let selected = if names.is_empty() {
        scenarios::all().iter().collect::<Vec<_>>()
    } else {
        names
            .iter()
            .map(|n| scenarios::find(n).with_context(|| format!("unknown scenario {n:?}")))
            .collect::<anyhow::Result<Vec<_>>>()?
    };
    for scenario in selected {
        let report = scenario.run(config)?;
        println!("{}", report.title);
        for frame in &report.frames {
            println!("{frame}");
        }
        if let Some(over) = report.game_over {
            println!("Game Over: {over}");
        }
    }
    Ok(())
}

fn play(max_moves: u64, quiet: bool, config: &EngineConfig) -> anyhow::Result<()> {
    let mut game = Game::with_config(config)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ 0x2048),
        None => StdRng::from_entropy(),
    };
    if !quiet {
        println!("{game}");
    }
    let mut move_count: u64 = 0;
    while !game.game_over() && move_count < max_moves {
        let dir = *Move::ALL.choose(&mut rng).unwrap_or(&Move::Left);
        game.make_move(dir);
        move_count += 1;
        if !quiet {
            println!("{dir}\n{game}");
        }
    }
    if game.game_over() {
        info!("game over after {move_count} moves");
    } else {
        warn!("stopped at move cap ({max_moves}) before the game ended");
    }
    if quiet {
        println!("{game}");
    }
    println!(
        "Moves: {} | score: {} | highest tile: {}",
        move_count,
        game.score(),
        game.highest_tile()
    );
    Ok(())
}
