//! Endless Jumper headless runner
//!
//! Drives one autopilot run and reports the outcome.
//!
//! Usage: `endless-jumper [tuning.json] [--seed N] [--ticks N] [--best N]`

use endless_jumper::sim::{GameEvent, GameState, autopilot, tick};
use endless_jumper::{Achievements, HighScores, Tuning};

/// Default tick limit (ten minutes at 60 Hz)
const DEFAULT_TICKS: u64 = 36_000;

#[derive(Debug, Default)]
struct Args {
    tuning_path: Option<String>,
    seed: Option<u64>,
    ticks: Option<u64>,
    best: u64,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" | "--ticks" | "--best" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("{arg} needs a value"))?;
                let n: u64 = value
                    .parse()
                    .map_err(|_| format!("{arg}: not a number: {value}"))?;
                match arg.as_str() {
                    "--seed" => args.seed = Some(n),
                    "--ticks" => args.ticks = Some(n),
                    _ => args.best = n,
                }
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
            path => args.tuning_path = Some(path.to_string()),
        }
    }
    Ok(args)
}

fn load_tuning(path: Option<&str>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Failed to load tuning from {}: {}; using defaults", path, e);
            Tuning::default()
        }
    }
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("usage: endless-jumper [tuning.json] [--seed N] [--ticks N] [--best N]");
            std::process::exit(2);
        }
    };

    let tuning = load_tuning(args.tuning_path.as_deref());
    let seed = args.seed.unwrap_or_else(time_seed);
    let limit = args.ticks.unwrap_or(DEFAULT_TICKS);

    let mut state = GameState::with_tuning(seed, tuning, args.best);
    let mut achievements = Achievements::new();
    let mut cause = None;

    for _ in 0..limit {
        let input = autopilot::steer(&state);
        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::NewHighScore(score) => log::info!("New high score: {}", score),
                GameEvent::GameOver(c) => cause = Some(c),
                _ => {}
            }
        }
        achievements.check(&state.stats, state.score);

        if state.is_game_over() {
            break;
        }
    }

    let mut leaderboard = HighScores::new();
    if args.best > 0 {
        leaderboard.add_score(args.best, &Default::default());
    }
    let rank = leaderboard.add_score(state.score, &state.stats);

    println!("seed:      {}", seed);
    match cause {
        Some(c) => println!("ended:     {:?}", c),
        None => println!("ended:     tick limit ({})", limit),
    }
    println!("score:     {}", state.score);
    println!("best:      {}", state.high_score);
    println!("jumps:     {}", state.stats.jumps);
    println!("pickups:   {}", state.stats.pickups_collected);
    println!("survived:  {} s", state.stats.seconds_survived());
    match rank {
        Some(r) => println!("rank:      #{}", r),
        None => println!("rank:      -"),
    }
    for a in achievements.unlocked() {
        println!("unlocked:  {} ({})", a.name(), a.description());
    }
}
