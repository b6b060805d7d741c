//! Match command - play a series of games between two AI opponents
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use dropfour_core::{
    apply_move, check_win, AiPlayer, Board, Difficulty, Heuristics, MinimaxAI, Player,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Difficulty of the side that moves first in game 1
    #[arg(long)]
    pub first: Difficulty,

    /// Difficulty of the other side
    #[arg(long)]
    pub second: Difficulty,

    /// Number of games to play (the starting side alternates)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Search depth for hard opponents
    #[arg(long, default_value = "6")]
    pub depth: u32,

    /// Evaluation weights JSON for hard opponents
    #[arg(long, value_name = "FILE")]
    pub weights: Option<PathBuf>,

    /// RNG seed (easy opponents become reproducible)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Which of the two configured opponents won a game
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MatchOutcome {
    FirstWins,
    SecondWins,
    Draw,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    outcome: MatchOutcome,
    moves: u32,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    first_wins: usize,
    second_wins: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(args: MatchArgs) -> Result<()> {
    let heuristics = load_heuristics(&args)?;

    tracing::info!(
        "Starting match: {:?} vs {:?} ({} games, depth={})",
        args.first,
        args.second,
        args.games,
        args.depth
    );

    let results = play_match(&args, &heuristics)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Evaluation weights from file, or the defaults
fn load_heuristics(args: &MatchArgs) -> Result<Heuristics> {
    match &args.weights {
        Some(path) => Heuristics::load(path)
            .with_context(|| format!("Failed to load weights: {}", path.display())),
        None => Ok(Heuristics::default()),
    }
}

/// Play all games in the match
fn play_match(args: &MatchArgs, heuristics: &Heuristics) -> Result<MatchResults> {
    let mut rng = create_rng(args.seed);
    let mut first_ai = make_player(args.first, args.depth, heuristics, &mut rng);
    let mut second_ai = make_player(args.second, args.depth, heuristics, &mut rng);

    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        // Alternate who starts for fairness
        let first_starts = game_num % 2 == 0;

        let record =
            play_single_game(&mut first_ai, &mut second_ai, first_starts, game_num + 1)?;

        tracing::info!(
            "Game {}: {:?} ({} moves)",
            record.game_number,
            record.outcome,
            record.moves
        );

        games.push(record);
    }

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results, args);
    } else {
        print_text_results(results, args);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Build an opponent; easy difficulties draw their seed from the match RNG
fn make_player(
    difficulty: Difficulty,
    depth: u32,
    heuristics: &Heuristics,
    rng: &mut ChaCha8Rng,
) -> AiPlayer {
    match difficulty {
        Difficulty::Easy => AiPlayer::with_seed(Difficulty::Easy, rng.gen()),
        Difficulty::Medium => AiPlayer::new(Difficulty::Medium),
        Difficulty::Hard => AiPlayer::Hard(MinimaxAI::with_heuristics(depth, heuristics.clone())),
    }
}

/// Play one game to a terminal state
fn play_single_game(
    first: &mut AiPlayer,
    second: &mut AiPlayer,
    first_starts: bool,
    game_number: usize,
) -> Result<GameRecord> {
    let mut board = Board::new();
    let mut to_move = Player::One;
    let mut moves = 0u32;

    let outcome = loop {
        let mover_is_first = (to_move == Player::One) == first_starts;
        let ai = if mover_is_first { &mut *first } else { &mut *second };

        let Some(col) = ai.choose_move(&board, to_move) else {
            break MatchOutcome::Draw;
        };
        board = apply_move(&board, col, to_move)?;
        moves += 1;

        if check_win(&board, to_move) {
            break if mover_is_first {
                MatchOutcome::FirstWins
            } else {
                MatchOutcome::SecondWins
            };
        }
        if board.is_full() {
            break MatchOutcome::Draw;
        }

        to_move = to_move.opponent();
    };

    Ok(GameRecord {
        game_number,
        outcome,
        moves,
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let first_wins = games
        .iter()
        .filter(|g| g.outcome == MatchOutcome::FirstWins)
        .count();
    let second_wins = games
        .iter()
        .filter(|g| g.outcome == MatchOutcome::SecondWins)
        .count();
    let draws = games
        .iter()
        .filter(|g| g.outcome == MatchOutcome::Draw)
        .count();

    let total_moves: u32 = games.iter().map(|g| g.moves).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        first_wins,
        second_wins,
        draws,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or entropy
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults, args: &MatchArgs) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        outcome: String,
        moves: u32,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        first: String,
        second: String,
        total_games: usize,
        first_wins: usize,
        second_wins: usize,
        draws: usize,
        avg_moves: f32,
        first_win_rate: f32,
        games: Vec<JsonGame>,
    }

    let total = results.games.len();
    let output = JsonOutput {
        first: format!("{:?}", args.first),
        second: format!("{:?}", args.second),
        total_games: total,
        first_wins: results.first_wins,
        second_wins: results.second_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        first_win_rate: if total > 0 {
            results.first_wins as f32 / total as f32
        } else {
            0.0
        },
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                outcome: format!("{:?}", g.outcome),
                moves: g.moves,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults, args: &MatchArgs) {
    let total = results.games.len();
    let rate = |count: usize| {
        if total > 0 {
            count as f32 / total as f32 * 100.0
        } else {
            0.0
        }
    };

    println!("\n=== Match Results ===");
    println!("{:?} vs {:?}", args.first, args.second);
    println!("Total games: {}", total);
    println!("{:?} wins:  {} ({:.1}%)", args.first, results.first_wins, rate(results.first_wins));
    println!("{:?} wins:  {} ({:.1}%)", args.second, results.second_wins, rate(results.second_wins));
    println!("Draws:       {} ({:.1}%)", results.draws, rate(results.draws));
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} in {} moves",
            game.game_number, game.outcome, game.moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
