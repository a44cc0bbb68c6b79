//! Headless match simulator.
//!
//! Plays matches between random agents through the orchestrator and reports
//! how often each seat won.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};

use tiger_dragon::agents::{play_out, Agent, RandomAgent};
use tiger_dragon::core::{MatchConfig, PlayerId, PlayerMap, RoundSeeding};
use tiger_dragon::orchestrator::Match;
use tiger_dragon::scoring::ScoreTable;

/// Upper bound on actions per match.
const MAX_ACTIONS: usize = 1_000_000;

#[derive(Parser)]
#[command(name = "simulate")]
#[command(about = "Play Tiger & Dragon matches between random agents")]
struct Args {
    /// Number of players (2-5)
    #[arg(short, long, default_value_t = 4)]
    players: usize,

    /// Match seed; match N uses seed + N
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Score that ends a match
    #[arg(short, long, default_value_t = 10)]
    target: i32,

    /// Number of matches
    #[arg(short, long, default_value_t = 1)]
    games: u32,

    /// Score rules file
    #[arg(long, default_value = "demos/score_rules.txt")]
    rules: String,

    /// Deal every round from the same seed
    #[arg(long)]
    fixed_seeding: bool,

    /// Seed for the agents; defaults to the match seed
    #[arg(long)]
    agent_seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let table = Arc::new(ScoreTable::load(&args.rules)?);
    let seeding = if args.fixed_seeding {
        RoundSeeding::Fixed
    } else {
        RoundSeeding::PerRound
    };
    let base = MatchConfig::default()
        .with_players(args.players)
        .with_target_score(args.target)
        .with_round_seeding(seeding);
    base.validate()?;

    info!(
        players = args.players,
        games = args.games,
        target = args.target,
        rules = %args.rules,
        "starting simulation"
    );

    let start = Instant::now();
    let mut wins: PlayerMap<u32> = PlayerMap::with_value(args.players, 0);
    let mut unfinished = 0u32;
    let mut total_rounds = 0u64;

    for game_num in 0..args.games {
        let seed = args.seed.wrapping_add(u64::from(game_num));
        let config = base
            .clone()
            .with_seed(seed)
            .with_room_id(format!("sim{game_num}"));
        let mut game = Match::new(config, Arc::clone(&table))?;
        let mut agents = RandomAgent::for_seats(args.players, args.agent_seed.unwrap_or(seed));

        let outcome = play_out(&mut game, &mut agents, MAX_ACTIONS)?;
        total_rounds += u64::from(outcome.rounds);
        match outcome.winner {
            Some(winner) => {
                wins[winner] += 1;
                info!(
                    game = game_num,
                    seed,
                    winner = winner.index(),
                    agent = agents[winner].name(),
                    rounds = outcome.rounds,
                    actions = outcome.actions,
                    scores = ?outcome.scores,
                    "match finished"
                );
            }
            None => {
                unfinished += 1;
                error!(game = game_num, seed, actions = outcome.actions, "match hit the action limit");
            }
        }
    }

    let elapsed = start.elapsed();
    println!("Matches: {}  Rounds: {}  Time: {:.2?}", args.games, total_rounds, elapsed);
    for seat in PlayerId::all(args.players) {
        let share = if args.games == 0 {
            0.0
        } else {
            f64::from(wins[seat]) * 100.0 / f64::from(args.games)
        };
        println!("{seat}: {} wins ({share:.1}%)", wins[seat]);
    }
    if unfinished > 0 {
        println!("Unfinished: {unfinished}");
    }
    Ok(())
}
