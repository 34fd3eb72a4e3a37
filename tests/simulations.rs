//! Seeded game simulations through the arena.
//!
//! Runs at least 1000 games for every pairing of a strong strategy against
//! each opponent, in both seat orders, and checks the strong side never
//! loses. Also covers the worked positions for each strategy.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use noughts::board::{BoardState, Cell, Mark, CENTER, EDGES};
use noughts::notation::parse_board;
use noughts::selfplay::{play_game, run_matches, MatchConfig, MatchSummary, Outcome};
use noughts::strategy::{greedy, rule_based, Rule, Strategy, ALL_STRATEGIES};

const GAMES_PER_PAIRING: usize = 1000;

fn run(first: Strategy, second: Strategy, seed: u64) -> MatchSummary {
    let config = MatchConfig {
        num_games: GAMES_PER_PAIRING,
        first,
        second,
        threads: 4,
        seed,
        quiet: true,
    };
    let games = run_matches(&config).unwrap();
    assert_eq!(games.len(), GAMES_PER_PAIRING);
    MatchSummary::from_games(&games)
}

fn assert_unbeaten(strong: Strategy) {
    for (i, opponent) in ALL_STRATEGIES.into_iter().enumerate() {
        let seed = 1000 + i as u64;

        let as_first = run(strong, opponent, seed);
        assert_eq!(as_first.aborted, 0);
        assert_eq!(
            as_first.losses_for(Mark::First),
            0,
            "{} as X lost to {}\n{}",
            strong,
            opponent,
            as_first
        );

        let as_second = run(opponent, strong, seed);
        assert_eq!(as_second.aborted, 0);
        assert_eq!(
            as_second.losses_for(Mark::Second),
            0,
            "{} as O lost to {}\n{}",
            strong,
            opponent,
            as_second
        );
    }
}

#[test]
fn rule_based_never_loses_in_simulation() {
    assert_unbeaten(Strategy::RuleBased);
}

#[test]
fn minimax_never_loses_in_simulation() {
    assert_unbeaten(Strategy::Minimax);
}

#[test]
fn strong_self_play_always_ties() {
    for strategy in [Strategy::RuleBased, Strategy::Minimax] {
        let summary = run(strategy, strategy, 7);
        assert_eq!(summary.ties, GAMES_PER_PAIRING, "{}\n{}", strategy, summary);
    }
    let summary = run(Strategy::RuleBased, Strategy::Minimax, 8);
    assert_eq!(summary.ties, GAMES_PER_PAIRING, "{}", summary);
}

#[test]
fn strong_strategies_beat_random_play() {
    let summary = run(Strategy::Minimax, Strategy::Random, 9);
    assert!(summary.first_wins > GAMES_PER_PAIRING / 2, "{}", summary);
}

#[test]
fn minimax_is_deterministic() {
    let mut a = SmallRng::seed_from_u64(1);
    let mut b = SmallRng::seed_from_u64(2);
    let first = play_game(Strategy::Minimax, Strategy::Minimax, 0, &mut a);
    let second = play_game(Strategy::Minimax, Strategy::Minimax, 1, &mut b);
    assert_eq!(first.moves, second.moves);
    assert_eq!(first.outcome, Outcome::Tie);
    assert_eq!(first.moves[0].cell, Cell::new(0, 0));
}

#[test]
fn fixed_seed_reproduces_games() {
    let config = MatchConfig {
        num_games: 50,
        first: Strategy::Greedy,
        second: Strategy::Random,
        threads: 1,
        seed: 314,
        quiet: true,
    };
    assert_eq!(run_matches(&config).unwrap(), run_matches(&config).unwrap());
}

#[test]
fn empty_board_rule_based_takes_center() {
    let mut rng = SmallRng::seed_from_u64(0);
    let d = rule_based::decide(&BoardState::new(), Mark::First, &mut rng).unwrap();
    assert_eq!(d.cell, CENTER);
    assert_eq!(d.rule, Rule::Center);
}

#[test]
fn greedy_completes_top_row() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut board = parse_board("XX./.../...").unwrap();
    let d = greedy::decide(&board, Mark::First, &mut rng).unwrap();
    assert_eq!(d.cell, Cell::new(0, 2));
    board.play(d.cell, Mark::First).unwrap();
    assert!(board.win_check(Mark::First));
}

#[test]
fn rule_based_blocks_bottom_row() {
    let mut rng = SmallRng::seed_from_u64(0);
    let board = parse_board(".../.../OO.").unwrap();
    let d = rule_based::decide(&board, Mark::First, &mut rng).unwrap();
    assert_eq!(d.rule, Rule::Block);
    assert_eq!(d.cell, Cell::new(2, 2));
}

#[test]
fn rule_based_answers_opposite_corners_with_edge() {
    let mut rng = SmallRng::seed_from_u64(0);
    let board = parse_board("O../.X./..O").unwrap();
    let d = rule_based::decide(&board, Mark::First, &mut rng).unwrap();
    assert_eq!(d.rule, Rule::AvoidOppositeCorners);
    assert!(EDGES.contains(&d.cell));
}
