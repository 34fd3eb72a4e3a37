//! Strategy-vs-strategy arena.
//!
//! Plays complete games between two strategies, first mark to move first,
//! checking for a win and then a tie after every committed move. Records
//! each move and the outcome so results can be tallied or written out as
//! JSONL. Games can run on a rayon thread pool; each game draws from its
//! own RNG seeded from `seed + game_id`, so a fixed seed reproduces the
//! same games regardless of thread count.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::board::{BoardState, Cell, Mark, CELL_COUNT};
use crate::notation::encode_board;
use crate::strategy::Strategy;

/// Configuration for a run of games.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Strategy playing the first mark (moves first).
    pub first: Strategy,
    /// Strategy playing the second mark.
    pub second: Strategy,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress logging.
    pub quiet: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            num_games: 100,
            first: Strategy::RuleBased,
            second: Strategy::Random,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Errors from running a batch of games.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("arena worker thread panicked")]
    WorkerPanicked,
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win(Mark),
    Tie,
    /// A strategy failed to produce a legal move.
    Aborted,
}

impl Outcome {
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Win(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(m) => write!(f, "{} wins", m.symbol()),
            Outcome::Tie => f.write_str("tie"),
            Outcome::Aborted => f.write_str("aborted"),
        }
    }
}

/// A single committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    /// 1-based ply number.
    pub ply: usize,
    pub mark: Mark,
    pub cell: Cell,
}

/// A complete game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    pub first: Strategy,
    pub second: Strategy,
    pub moves: Vec<MoveRecord>,
    pub outcome: Outcome,
    /// Final position in board notation.
    pub final_board: String,
}

impl GameRecord {
    /// Strategy that played `mark` in this game.
    pub fn strategy_for(&self, mark: Mark) -> Option<Strategy> {
        match mark {
            Mark::First => Some(self.first),
            Mark::Second => Some(self.second),
            Mark::Empty => None,
        }
    }
}

/// Plays one game and returns its record.
pub fn play_game(
    first: Strategy,
    second: Strategy,
    game_id: usize,
    rng: &mut impl Rng,
) -> GameRecord {
    let mut board = BoardState::new();
    let mut moves = Vec::with_capacity(CELL_COUNT);
    let mut mark = Mark::First;

    let outcome = loop {
        let strategy = if mark == Mark::First { first } else { second };
        let cell = match strategy.decide_move(&board, mark, rng) {
            Ok(cell) => cell,
            Err(e) => {
                warn!(game_id, %strategy, error = %e, "strategy failed to move");
                break Outcome::Aborted;
            }
        };
        if let Err(e) = board.play(cell, mark) {
            warn!(game_id, %strategy, %cell, error = %e, "strategy chose an illegal move");
            break Outcome::Aborted;
        }
        moves.push(MoveRecord {
            ply: moves.len() + 1,
            mark,
            cell,
        });

        if board.win_check(mark) {
            break Outcome::Win(mark);
        }
        if board.tie_check() {
            break Outcome::Tie;
        }
        mark = mark.opponent();
    };

    GameRecord {
        game_id,
        first,
        second,
        moves,
        outcome,
        final_board: encode_board(&board),
    }
}

/// Returns the RNG for a given game.
fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays `config.num_games` games and returns their records ordered by ID.
pub fn run_matches(config: &MatchConfig) -> Result<Vec<GameRecord>, ArenaError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_matches_with_callback(config, |game| {
        games.push(game);
    })?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Plays games, calling `on_game` with each completed record.
///
/// With `config.threads > 1`, records arrive in completion order rather
/// than ID order.
pub fn run_matches_with_callback<F>(config: &MatchConfig, on_game: F) -> Result<(), ArenaError>
where
    F: FnMut(GameRecord) + Send,
{
    debug!(
        games = config.num_games,
        first = %config.first,
        second = %config.second,
        threads = config.threads,
        seed = config.seed,
        "starting matches"
    );
    if config.threads > 1 {
        run_parallel(config, on_game)
    } else {
        run_sequential(config, on_game);
        Ok(())
    }
}

fn run_sequential<F>(config: &MatchConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let mut rng = game_rng(config.seed, i);
        let start = Instant::now();
        let game = play_game(config.first, config.second, i, &mut rng);
        if !config.quiet {
            log_game(&game, i + 1, config.num_games, start);
        }
        on_game(game);
    }
}

/// Plays games on a rayon pool and delivers them to `on_game` on the
/// calling thread through a channel.
fn run_parallel<F>(config: &MatchConfig, mut on_game: F) -> Result<(), ArenaError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let (tx, rx) = mpsc::channel::<GameRecord>();
    let config = config.clone();
    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            (0..config.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = game_rng(config.seed, i);
                    let start = Instant::now();
                    let game = play_game(config.first, config.second, i, &mut rng);
                    if !config.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        log_game(&game, n, config.num_games, start);
                    }
                    let _ = tx.send(game);
                });
        });
    });

    for game in rx {
        on_game(game);
    }

    handle.join().map_err(|_| ArenaError::WorkerPanicked)
}

fn log_game(game: &GameRecord, n: usize, total: usize, start: Instant) {
    let winner = game.outcome.winner().and_then(|m| game.strategy_for(m));
    info!(
        game_id = game.game_id,
        outcome = %game.outcome,
        winner = winner.map(Strategy::name),
        plies = game.moves.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "game {}/{} finished",
        n,
        total
    );
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Win/loss/tie tally over a batch of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub ties: usize,
    pub aborted: usize,
}

impl MatchSummary {
    pub fn from_games(games: &[GameRecord]) -> Self {
        let mut summary = MatchSummary {
            games: games.len(),
            ..Default::default()
        };
        for game in games {
            match game.outcome {
                Outcome::Win(Mark::First) => summary.first_wins += 1,
                Outcome::Win(_) => summary.second_wins += 1,
                Outcome::Tie => summary.ties += 1,
                Outcome::Aborted => summary.aborted += 1,
            }
        }
        summary
    }

    /// Games lost by the side playing `mark`.
    pub fn losses_for(&self, mark: Mark) -> usize {
        match mark {
            Mark::First => self.second_wins,
            Mark::Second => self.first_wins,
            Mark::Empty => 0,
        }
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = |n: usize| 100.0 * n as f64 / self.games.max(1) as f64;
        writeln!(f, "=== Match Summary ===")?;
        writeln!(f, "Games: {}", self.games)?;
        writeln!(f, "First (X) wins:  {} ({:.1}%)", self.first_wins, pct(self.first_wins))?;
        writeln!(f, "Second (O) wins: {} ({:.1}%)", self.second_wins, pct(self.second_wins))?;
        writeln!(f, "Ties:            {} ({:.1}%)", self.ties, pct(self.ties))?;
        write!(f, "Aborted:         {}", self.aborted)
    }
}
