//! Dropfour Core - Game engine and AI
//!
//! This crate provides the core game logic for dropfour:
//! - Board model (6x7 grid with gravity placement)
//! - Rules engine (legal moves, win/draw detection, winning-line extraction)
//! - Position evaluation over four-cell windows
//! - Three AI opponents: uniform random, one-ply heuristic, alpha-beta minimax

pub mod board;
pub mod game;
pub mod eval;
pub mod ai;

// Re-exports for convenient access
pub use board::{Board, GameError, Player, CENTER_COL, COLS, CONNECT, ROWS};
pub use game::{
    apply_move, check_win, drop_row, is_draw, valid_moves, winning_cells, Move, WinningLine,
    DIRECTIONS,
};
pub use eval::{evaluate, Heuristics, WIN_VALUE};
pub use ai::{AiPlayer, Difficulty, HeuristicAI, MinimaxAI, RandomAI, DEFAULT_DEPTH};
