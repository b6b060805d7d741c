//! AI opponents: uniform random, one-ply heuristic, and alpha-beta minimax

use crate::board::{Board, Player, CENTER_COL};
use crate::eval::{evaluate, Heuristics, WIN_VALUE};
use crate::game::{apply_move, check_win, valid_moves};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default minimax search depth in plies
pub const DEFAULT_DEPTH: u32 = 6;

// ============================================================================
// DIFFICULTY
// ============================================================================

/// Opponent difficulty tag, one per strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

// ============================================================================
// EASY - UNIFORM RANDOM
// ============================================================================

/// Easy opponent: uniform random over the legal columns
pub struct RandomAI {
    rng: ChaCha8Rng,
}

impl RandomAI {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick a legal column at random; `None` when the board is full
    pub fn choose_move(&mut self, board: &Board) -> Option<usize> {
        valid_moves(board).choose(&mut self.rng).copied()
    }
}

impl Default for RandomAI {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MEDIUM - ONE-PLY HEURISTIC
// ============================================================================

/// Medium opponent: win if possible, block if threatened, else take the
/// column closest to center
///
/// One ply deep, so it cannot see forks or forced sequences. Fully
/// deterministic for a given board.
#[derive(Default)]
pub struct HeuristicAI;

impl HeuristicAI {
    pub fn new() -> Self {
        Self
    }

    pub fn choose_move(&self, board: &Board, player: Player) -> Option<usize> {
        let moves = valid_moves(board);
        if moves.is_empty() {
            return None;
        }

        // 1. Take an immediate win
        for &col in &moves {
            if wins_after(board, col, player) {
                return Some(col);
            }
        }

        // 2. Deny the opponent an immediate win
        let opponent = player.opponent();
        for &col in &moves {
            if wins_after(board, col, opponent) {
                return Some(col);
            }
        }

        // 3. Closest open column to center, ties to the lower index
        moves
            .into_iter()
            .min_by_key(|&col| (col.abs_diff(CENTER_COL), col))
    }
}

/// Would dropping in `col` complete four in a row for `player`?
fn wins_after(board: &Board, col: usize, player: Player) -> bool {
    apply_move(board, col, player)
        .map(|next| check_win(&next, player))
        .unwrap_or(false)
}

// ============================================================================
// HARD - MINIMAX WITH ALPHA-BETA
// ============================================================================

/// Hard opponent: fixed-depth minimax with alpha-beta pruning
///
/// Pruning is purely an optimization: the chosen column and root score are
/// identical to an exhaustive minimax over the same depth and weights.
pub struct MinimaxAI {
    pub depth: u32,
    pub heuristics: Heuristics,
}

impl MinimaxAI {
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }

    pub fn with_depth(depth: u32) -> Self {
        Self {
            depth,
            heuristics: Heuristics::default(),
        }
    }

    pub fn with_heuristics(depth: u32, heuristics: Heuristics) -> Self {
        Self { depth, heuristics }
    }

    /// Best column for `player`, or `None` when the board is full
    pub fn choose_move(&self, board: &Board, player: Player) -> Option<usize> {
        self.search_root(board, player).map(|(col, _)| col)
    }

    /// Root search: maximize over the legal columns in ascending order
    ///
    /// Ties resolve to the first (lowest) column because only a strictly
    /// better score replaces the incumbent.
    fn search_root(&self, board: &Board, player: Player) -> Option<(usize, i32)> {
        let moves = valid_moves(board);
        if moves.is_empty() {
            return None;
        }

        let mut best_col = moves[0];
        let mut best_score = i32::MIN;
        let mut alpha = i32::MIN;

        for &col in &moves {
            let Ok(child) = apply_move(board, col, player) else {
                continue;
            };
            let score = minimax(
                &child,
                self.depth.saturating_sub(1),
                alpha,
                i32::MAX,
                player.opponent(),
                player,
                &self.heuristics,
            );
            if score > best_score {
                best_score = score;
                best_col = col;
            }
            alpha = alpha.max(best_score);
        }

        Some((best_col, best_score))
    }
}

impl Default for MinimaxAI {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimax over (board, depth, alpha, beta, player to move), scored from
/// `ai`'s perspective
///
/// Terminal wins carry a depth bonus so nearer wins (and farther losses)
/// are preferred over equal-value alternatives deeper in the tree.
fn minimax(
    board: &Board,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    to_move: Player,
    ai: Player,
    heuristics: &Heuristics,
) -> i32 {
    if check_win(board, ai) {
        return WIN_VALUE + depth as i32;
    }
    if check_win(board, ai.opponent()) {
        return -(WIN_VALUE + depth as i32);
    }
    if board.is_full() {
        return 0;
    }
    if depth == 0 {
        return evaluate(board, ai, heuristics);
    }

    let moves = valid_moves(board);

    if to_move == ai {
        let mut best = i32::MIN;
        for col in moves {
            let Ok(child) = apply_move(board, col, to_move) else {
                continue;
            };
            let score = minimax(&child, depth - 1, alpha, beta, to_move.opponent(), ai, heuristics);
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for col in moves {
            let Ok(child) = apply_move(board, col, to_move) else {
                continue;
            };
            let score = minimax(&child, depth - 1, alpha, beta, to_move.opponent(), ai, heuristics);
            best = best.min(score);
            beta = beta.min(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

// ============================================================================
// DIFFICULTY DISPATCH
// ============================================================================

/// An opponent selected by difficulty: a closed set of three strategies
pub enum AiPlayer {
    Easy(RandomAI),
    Medium(HeuristicAI),
    Hard(MinimaxAI),
}

impl AiPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => AiPlayer::Easy(RandomAI::new()),
            Difficulty::Medium => AiPlayer::Medium(HeuristicAI::new()),
            Difficulty::Hard => AiPlayer::Hard(MinimaxAI::new()),
        }
    }

    /// Like `new`, but Easy draws from a seeded RNG (Medium and Hard are
    /// deterministic already)
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        match difficulty {
            Difficulty::Easy => AiPlayer::Easy(RandomAI::with_seed(seed)),
            other => Self::new(other),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        match self {
            AiPlayer::Easy(_) => Difficulty::Easy,
            AiPlayer::Medium(_) => Difficulty::Medium,
            AiPlayer::Hard(_) => Difficulty::Hard,
        }
    }

    /// Column for `player`'s next move, or `None` when no legal move exists
    pub fn choose_move(&mut self, board: &Board, player: Player) -> Option<usize> {
        match self {
            AiPlayer::Easy(ai) => ai.choose_move(board),
            AiPlayer::Medium(ai) => ai.choose_move(board, player),
            AiPlayer::Hard(ai) => ai.choose_move(board, player),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
