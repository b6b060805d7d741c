//! Position evaluation over four-cell windows

use crate::board::{Board, Player, CENTER_COL, COLS, CONNECT, ROWS};
use crate::game::DIRECTIONS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Score for a decided position (effectively infinite, above any window sum)
pub const WIN_VALUE: i32 = 1_000_000;

/// Heuristic weights for position evaluation
///
/// A window is a four-cell line segment. Windows containing pieces of both
/// players are dead and score zero; otherwise the occupying side contributes
/// the weight for its piece count. The only hard requirement on the values
/// is monotonicity: more pieces in an open window never weighs less.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Heuristics {
    /// Own pieces in an otherwise-empty window, by count
    pub one_in_window: i32,
    pub two_in_window: i32,
    pub three_in_window: i32,
    /// Opponent pieces in an otherwise-empty window (subtracted)
    pub opp_two_in_window: i32,
    pub opp_three_in_window: i32,
    /// Bonus per own piece in the center column
    pub center_weight: i32,
}

impl Default for Heuristics {
    fn default() -> Self {
        // Opponent weights sit slightly below our own so the search prefers
        // making a threat over shadowing one
        Self {
            one_in_window: 1,
            two_in_window: 10,
            three_in_window: 50,
            opp_two_in_window: 8,
            opp_three_in_window: 45,
            center_weight: 12,
        }
    }
}

impl Heuristics {
    /// Load weights from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let heuristics = serde_json::from_str(&content)?;
        Ok(heuristics)
    }

    /// Save weights to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Evaluate a position from `player`'s perspective
///
/// Sums every four-cell window on the board (24 horizontal, 21 vertical,
/// 12 + 12 diagonal) plus the center-column bonus. Positive favors
/// `player`, negative the opponent.
pub fn evaluate(board: &Board, player: Player, heuristics: &Heuristics) -> i32 {
    let mut score = 0;

    for row in 0..ROWS {
        for col in 0..COLS {
            for &(dr, dc) in &DIRECTIONS {
                let end_row = row as isize + dr * (CONNECT - 1) as isize;
                let end_col = col as isize + dc * (CONNECT - 1) as isize;
                if end_row < 0 || end_row >= ROWS as isize || end_col < 0 || end_col >= COLS as isize
                {
                    continue;
                }

                let mut own = 0;
                let mut opp = 0;
                for step in 0..CONNECT {
                    let r = (row as isize + dr * step as isize) as usize;
                    let c = (col as isize + dc * step as isize) as usize;
                    match board.at(r, c) {
                        Some(p) if p == player => own += 1,
                        Some(_) => opp += 1,
                        None => {}
                    }
                }
                score += score_window(own, opp, heuristics);
            }
        }
    }

    let center_pieces = (0..ROWS)
        .filter(|&row| board.at(row, CENTER_COL) == Some(player))
        .count() as i32;
    score += center_pieces * heuristics.center_weight;

    score
}

/// Weight for a single window given both piece counts
fn score_window(own: usize, opp: usize, heuristics: &Heuristics) -> i32 {
    if own > 0 && opp > 0 {
        return 0; // dead window
    }
    match (own, opp) {
        (3, 0) => heuristics.three_in_window,
        (2, 0) => heuristics.two_in_window,
        (1, 0) => heuristics.one_in_window,
        (0, 3) => -heuristics.opp_three_in_window,
        (0, 2) => -heuristics.opp_two_in_window,
        _ => 0,
    }
}
