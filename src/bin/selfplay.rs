//! Strategy-vs-strategy match CLI.
//!
//! Plays games between two strategies and outputs game records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --first NAME    Strategy for X, which moves first (default: rule-based)
//!   --second NAME   Strategy for O (default: random)
//!   --games N       Number of games to play (default: 100)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress progress and summary output
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::env;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use noughts::selfplay::{self, MatchConfig, MatchSummary};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = MatchConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--first" => config.first = parse_value(&args, &mut i, flag),
            "--second" => config.second = parse_value(&args, &mut i, flag),
            "--games" => config.num_games = parse_value(&args, &mut i, flag),
            "--threads" => config.threads = parse_value(&args, &mut i, flag),
            "--seed" => config.seed = parse_value(&args, &mut i, flag),
            "--output" => output_path = Some(parse_value(&args, &mut i, flag)),
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    init_tracing(config.quiet);

    info!(
        games = config.num_games,
        first = %config.first,
        second = %config.second,
        threads = config.threads,
        seed = config.seed,
        "starting matches"
    );

    let start = Instant::now();
    let games = match selfplay::run_matches(&config) {
        Ok(games) => games,
        Err(e) => {
            error!(error = %e, "match run failed");
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.2}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        eprintln!("{}", MatchSummary::from_games(&games));
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer).and_then(|_| writer.flush())
        }
    };
    if let Err(e) = written {
        error!(error = %e, "failed to write output");
        process::exit(1);
    }
    if let Some(path) = output_path {
        info!(games = games.len(), %path, "wrote game records");
    }
}

/// Parses the value following `flag`, exiting with a message if it is
/// missing or malformed.
fn parse_value<T>(args: &[String], i: &mut usize, flag: &str) -> T
where
    T: FromStr,
    T::Err: Display,
{
    *i += 1;
    let Some(raw) = args.get(*i) else {
        eprintln!("Missing value for {}", flag);
        print_usage();
        process::exit(1);
    };
    match raw.parse() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid {} value '{}': {}", flag, raw, e);
            process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout stays clean JSONL.
fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --first NAME     Strategy for X, moves first (default: rule-based)");
    eprintln!("  --second NAME    Strategy for O (default: random)");
    eprintln!("                   Strategies: greedy, rule-based, minimax, random");
    eprintln!("  --games N        Number of games to play (default: 100)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
