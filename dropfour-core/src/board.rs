//! Board model: a fixed 6x7 grid with value semantics

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of rows (row 0 is the top)
pub const ROWS: usize = 6;

/// Number of columns
pub const COLS: usize = 7;

/// Pieces in a row needed to win
pub const CONNECT: usize = 4;

/// Index of the center column
pub const CENTER_COL: usize = 3;

/// Player identity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// Precondition violation from a misbehaving caller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cell ({row}, {col}) is outside the 6x7 grid")]
    OutOfRange { row: usize, col: usize },
    #[error("column {col} is full")]
    ColumnFull { col: usize },
}

/// Board state (copy to mutate)
///
/// Every occupied cell in a column sits on top of another occupied cell or
/// the bottom row; `game::apply_move` is the only way pieces enter the grid,
/// so the gravity invariant holds for every reachable board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Player>; COLS]; ROWS],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [[None; COLS]; ROWS],
        }
    }

    /// Get cell contents, checking bounds
    pub fn cell(&self, row: usize, col: usize) -> Result<Option<Player>, GameError> {
        if row >= ROWS || col >= COLS {
            return Err(GameError::OutOfRange { row, col });
        }
        Ok(self.cells[row][col])
    }

    /// Cell contents for in-range coordinates
    pub(crate) fn at(&self, row: usize, col: usize) -> Option<Player> {
        debug_assert!(row < ROWS && col < COLS);
        self.cells[row][col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, player: Player) {
        debug_assert!(row < ROWS && col < COLS);
        self.cells[row][col] = Some(player);
    }

    /// Count of occupied cells in a column (0-6)
    pub fn column_height(&self, col: usize) -> usize {
        debug_assert!(col < COLS);
        (0..ROWS).filter(|&row| self.cells[row][col].is_some()).count()
    }

    /// True iff every column is at full height
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.column_height(col) == ROWS)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let symbol = match cell {
                    Some(Player::One) => "X",
                    Some(Player::Two) => "O",
                    None => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.cell(row, col).unwrap(), None);
            }
        }
        assert!(!board.is_full());
    }

    #[test]
    fn test_cell_out_of_range() {
        let board = Board::new();
        assert_eq!(
            board.cell(ROWS, 0),
            Err(GameError::OutOfRange { row: ROWS, col: 0 })
        );
        assert_eq!(
            board.cell(0, COLS),
            Err(GameError::OutOfRange { row: 0, col: COLS })
        );
    }

    #[test]
    fn test_column_height() {
        let mut board = Board::new();
        assert_eq!(board.column_height(2), 0);
        board.set(5, 2, Player::One);
        board.set(4, 2, Player::Two);
        assert_eq!(board.column_height(2), 2);
        assert_eq!(board.column_height(3), 0);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.set(5, 0, Player::One);
        board.set(5, 1, Player::Two);
        let rendered = board.to_string();
        let last_line = rendered.lines().last().unwrap();
        assert_eq!(last_line.trim_end(), "X O . . . . .");
    }
}
