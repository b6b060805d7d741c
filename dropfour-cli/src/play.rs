//! Play command - an interactive game against one AI opponent
//!
//! The session state machine lives here: the core engine is stateless, so
//! this module threads the board through alternating moves and re-checks the
//! terminal conditions after every placement.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use dropfour_core::{
    apply_move, check_win, valid_moves, winning_cells, AiPlayer, Board, Difficulty, Move, Player,
    COLS,
};

use crate::stats::{GameResult, StatsStore};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// AI difficulty
    #[arg(long, default_value = "medium")]
    pub difficulty: Difficulty,

    /// Player name recorded in the stats file
    #[arg(long, default_value = "Player")]
    pub name: String,

    /// Stats file location
    #[arg(long, value_name = "FILE", default_value = "dropfour-stats.json")]
    pub stats_file: PathBuf,

    /// Let the AI move first
    #[arg(long)]
    pub going_second: bool,

    /// Seed for the easy opponent's RNG
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Session state: terminal once a win or draw is reached
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GameOutcome {
    Playing,
    PlayerWin,
    AiWin,
    Draw,
}

/// What the human asked for at the prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlayerAction {
    Drop(usize),
    Quit,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run an interactive session: play one game, then record the result
pub fn run(args: PlayArgs) -> Result<()> {
    let mut store = StatsStore::open(&args.stats_file)?;
    let mut ai = match args.seed {
        Some(seed) => AiPlayer::with_seed(args.difficulty, seed),
        None => AiPlayer::new(args.difficulty),
    };

    tracing::info!("Starting game: {} vs {:?} AI", args.name, args.difficulty);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let outcome = play_session(&mut ai, args.going_second, &mut lines)?;

    if outcome == GameOutcome::Playing {
        // Player quit mid-game; nothing to record
        return Ok(());
    }

    record_result(&mut store, &args.name, outcome)?;

    if let Some(stats) = store.get(&args.name) {
        println!(
            "{}: {} wins / {} losses / {} draws over {} games",
            stats.username, stats.wins, stats.losses, stats.draws, stats.total_games
        );
    }
    Ok(())
}

// ============================================================================
// SESSION LOOP
// ============================================================================

/// Alternate human and AI moves until a terminal state or quit
///
/// Returns `Playing` only when the human quit before the game finished.
fn play_session(
    ai: &mut AiPlayer,
    going_second: bool,
    input: &mut dyn Iterator<Item = io::Result<String>>,
) -> Result<GameOutcome> {
    const HUMAN: Player = Player::One;
    const AI_SIDE: Player = Player::Two;

    let mut board = Board::new();
    let mut human_turn = !going_second;

    loop {
        if human_turn {
            render(&board);
            let action = match prompt_column(&board, input)? {
                Some(action) => action,
                None => return Ok(GameOutcome::Playing), // input closed
            };
            let col = match action {
                PlayerAction::Quit => return Ok(GameOutcome::Playing),
                PlayerAction::Drop(col) => col,
            };
            board = apply_move(&board, col, HUMAN).context("illegal human move")?;

            if check_win(&board, HUMAN) {
                finish(&board, HUMAN, "You win!");
                return Ok(GameOutcome::PlayerWin);
            }
        } else {
            let Some(col) = ai.choose_move(&board, AI_SIDE) else {
                // No legal move: the board filled without a winner
                render(&board);
                println!("It's a draw!");
                return Ok(GameOutcome::Draw);
            };
            let mv = Move::resolve(&board, col, AI_SIDE).context("AI chose an illegal column")?;
            board = apply_move(&board, col, AI_SIDE)?;
            println!("AI drops in column {} (row {})", mv.col, mv.row);

            if check_win(&board, AI_SIDE) {
                finish(&board, AI_SIDE, "AI wins");
                return Ok(GameOutcome::AiWin);
            }
        }

        if board.is_full() {
            render(&board);
            println!("It's a draw!");
            return Ok(GameOutcome::Draw);
        }
        human_turn = !human_turn;
    }
}

/// Read prompts until a legal column or quit; `Ok(None)` when stdin closes
fn prompt_column(
    board: &Board,
    input: &mut dyn Iterator<Item = io::Result<String>>,
) -> Result<Option<PlayerAction>> {
    let legal = valid_moves(board);
    loop {
        print!("Column (0-6, q to quit): ");
        io::stdout().flush().ok();

        let line = match input.next() {
            Some(line) => line.context("failed to read input")?,
            None => return Ok(None),
        };

        match parse_action(&line) {
            Some(PlayerAction::Quit) => return Ok(Some(PlayerAction::Quit)),
            Some(PlayerAction::Drop(col)) if legal.contains(&col) => {
                return Ok(Some(PlayerAction::Drop(col)));
            }
            Some(PlayerAction::Drop(col)) => {
                println!("Column {} is full or out of range", col);
            }
            None => {
                println!("Enter a column number 0-6, or q to quit");
            }
        }
    }
}

/// Parse one line of player input
fn parse_action(line: &str) -> Option<PlayerAction> {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        return Some(PlayerAction::Quit);
    }
    trimmed.parse::<usize>().ok().map(PlayerAction::Drop)
}

// ============================================================================
// PRESENTATION
// ============================================================================

/// Print the board with a column-index header
fn render(board: &Board) {
    println!();
    for col in 0..COLS {
        print!("{} ", col);
    }
    println!();
    print!("{}", board);
}

/// Announce a finished game and its winning line
fn finish(board: &Board, winner: Player, message: &str) {
    render(board);
    println!("{}", message);
    if let Some(line) = winning_cells(board, winner) {
        let cells: Vec<String> = line.iter().map(|(r, c)| format!("({}, {})", r, c)).collect();
        println!("Winning line: {}", cells.join(" "));
    }
}

/// Map the session outcome onto the player's record and persist it
fn record_result(store: &mut StatsStore, name: &str, outcome: GameOutcome) -> Result<()> {
    let result = match outcome {
        GameOutcome::PlayerWin => GameResult::Win,
        GameOutcome::AiWin => GameResult::Loss,
        GameOutcome::Draw => GameResult::Draw,
        GameOutcome::Playing => return Ok(()),
    };
    store.record(name, result);
    store.save()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(lines: &[&str]) -> impl Iterator<Item = io::Result<String>> {
        lines
            .iter()
            .map(|s| Ok(s.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("3"), Some(PlayerAction::Drop(3)));
        assert_eq!(parse_action("  6 "), Some(PlayerAction::Drop(6)));
        assert_eq!(parse_action("q"), Some(PlayerAction::Quit));
        assert_eq!(parse_action("QUIT"), Some(PlayerAction::Quit));
        assert_eq!(parse_action("seven"), None);
        assert_eq!(parse_action(""), None);
    }

    #[test]
    fn test_prompt_rejects_illegal_column_then_accepts() {
        let board = Board::new();
        let mut input = scripted(&["9", "not a move", "4"]);
        let action = prompt_column(&board, &mut input).unwrap();
        assert_eq!(action, Some(PlayerAction::Drop(4)));
    }

    #[test]
    fn test_session_quit_records_nothing() {
        let mut ai = AiPlayer::with_seed(Difficulty::Easy, 1);
        let mut input = scripted(&["q"]);
        let outcome = play_session(&mut ai, false, &mut input).unwrap();
        assert_eq!(outcome, GameOutcome::Playing);
    }

    #[test]
    fn test_session_ends_when_input_closes() {
        let mut ai = AiPlayer::with_seed(Difficulty::Easy, 1);
        let mut input = scripted(&[]);
        let outcome = play_session(&mut ai, false, &mut input).unwrap();
        assert_eq!(outcome, GameOutcome::Playing);
    }

    #[test]
    fn test_session_medium_ai_punishes_one_column_play() {
        // Medium is deterministic, so the whole game is scripted: the human
        // stacks column 6, Medium blocks the vertical threat, builds its own
        // center column, and completes it on move five.
        let mut ai = AiPlayer::new(Difficulty::Medium);
        let mut input = scripted(&["6", "6", "6", "6", "6"]);
        let outcome = play_session(&mut ai, false, &mut input).unwrap();
        assert_eq!(outcome, GameOutcome::AiWin);
    }
}
