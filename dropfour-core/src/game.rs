//! Rules engine: legal moves, gravity placement, win and draw detection
//!
//! The engine is stateless: every function is a pure query or transform over
//! a borrowed [`Board`]. Turn order and game-over bookkeeping belong to the
//! calling session, which re-checks terminal conditions after each move.

use crate::board::{Board, GameError, Player, COLS, CONNECT, ROWS};
use serde::{Deserialize, Serialize};

/// Direction vectors for line scans (dr, dc)
/// Index: 0=E, 1=S, 2=SE, 3=SW
pub const DIRECTIONS: [(isize, isize); 4] = [
    (0, 1),  // E  - horizontal
    (1, 0),  // S  - vertical
    (1, 1),  // SE - diagonal, down-right
    (1, -1), // SW - diagonal, down-left
];

/// Four collinear (row, col) coordinates with constant step
pub type WinningLine = [(usize, usize); CONNECT];

/// A resolved placement: the column the caller chose plus the row gravity assigned
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub col: usize,
    pub row: usize,
    pub player: Player,
}

impl Move {
    /// Resolve the landing row for a drop without applying it
    pub fn resolve(board: &Board, col: usize, player: Player) -> Result<Self, GameError> {
        let row = drop_row(board, col)?;
        Ok(Self { col, row, player })
    }
}

/// Columns that can still accept a piece, in ascending order
///
/// Strategies iterate this order as their default tie-break.
pub fn valid_moves(board: &Board) -> Vec<usize> {
    (0..COLS)
        .filter(|&col| board.column_height(col) < ROWS)
        .collect()
}

/// Lowest empty row in a column (the cell directly above the stack)
pub fn drop_row(board: &Board, col: usize) -> Result<usize, GameError> {
    if col >= COLS {
        return Err(GameError::OutOfRange { row: 0, col });
    }
    let height = board.column_height(col);
    if height == ROWS {
        return Err(GameError::ColumnFull { col });
    }
    Ok(ROWS - 1 - height)
}

/// Place a piece, returning the new board and leaving the input untouched
pub fn apply_move(board: &Board, col: usize, player: Player) -> Result<Board, GameError> {
    let row = drop_row(board, col)?;
    let mut next = *board;
    next.set(row, col, player);
    Ok(next)
}

/// True iff `player` has four in a row anywhere on the board
pub fn check_win(board: &Board, player: Player) -> bool {
    winning_cells(board, player).is_some()
}

/// First four-cell run belonging to `player`, if any
///
/// Scans cells in row-major order and directions in the [`DIRECTIONS`] order,
/// so the reported line is deterministic when several exist. Anchoring at a
/// cell and only scanning forward means no run is counted twice.
pub fn winning_cells(board: &Board, player: Player) -> Option<WinningLine> {
    for row in 0..ROWS {
        for col in 0..COLS {
            if board.at(row, col) != Some(player) {
                continue;
            }
            'directions: for &(dr, dc) in &DIRECTIONS {
                let mut line = [(row, col); CONNECT];
                for step in 1..CONNECT {
                    let r = row as isize + dr * step as isize;
                    let c = col as isize + dc * step as isize;
                    if r < 0 || r >= ROWS as isize || c < 0 || c >= COLS as isize {
                        continue 'directions;
                    }
                    if board.at(r as usize, c as usize) != Some(player) {
                        continue 'directions;
                    }
                    line[step] = (r as usize, c as usize);
                }
                return Some(line);
            }
        }
    }
    None
}

/// True iff the board is full and neither player has won
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && !check_win(board, Player::One) && !check_win(board, Player::Two)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from_drops(drops: &[(usize, Player)]) -> Board {
        let mut board = Board::new();
        for &(col, player) in drops {
            board = apply_move(&board, col, player).unwrap();
        }
        board
    }

    /// Full board with no four-in-a-row: columns stack in a 2-2-2 rhythm
    /// that caps every line at two or three
    fn full_draw_board() -> Board {
        let mut board = Board::new();
        for col in 0..COLS {
            let first = if col % 2 == 0 { Player::One } else { Player::Two };
            let stack = [first, first, first.opponent(), first.opponent(), first, first];
            for player in stack {
                board = apply_move(&board, col, player).unwrap();
            }
        }
        board
    }

    #[test]
    fn test_gravity_stacks_bottom_up() {
        let board = board_from_drops(&[(3, Player::One), (3, Player::Two), (3, Player::One)]);
        assert_eq!(board.cell(5, 3).unwrap(), Some(Player::One));
        assert_eq!(board.cell(4, 3).unwrap(), Some(Player::Two));
        assert_eq!(board.cell(3, 3).unwrap(), Some(Player::One));
        assert_eq!(board.cell(2, 3).unwrap(), None);
        assert_eq!(drop_row(&board, 3).unwrap(), 2);
    }

    #[test]
    fn test_apply_move_does_not_mutate_input() {
        let before = board_from_drops(&[(0, Player::One), (1, Player::Two)]);
        let snapshot = before;
        let after = apply_move(&before, 0, Player::One).unwrap();
        assert_eq!(before, snapshot);
        assert_ne!(after, before);
    }

    #[test]
    fn test_valid_moves_excludes_full_columns() {
        let mut board = Board::new();
        for i in 0..ROWS {
            let player = if i % 2 == 0 { Player::One } else { Player::Two };
            board = apply_move(&board, 2, player).unwrap();
        }
        assert_eq!(valid_moves(&board), vec![0, 1, 3, 4, 5, 6]);
    }

    #[test]
    fn test_drop_row_errors() {
        let mut board = Board::new();
        for i in 0..ROWS {
            let player = if i % 2 == 0 { Player::One } else { Player::Two };
            board = apply_move(&board, 6, player).unwrap();
        }
        assert_eq!(drop_row(&board, 6), Err(GameError::ColumnFull { col: 6 }));
        assert_eq!(
            drop_row(&board, COLS),
            Err(GameError::OutOfRange { row: 0, col: COLS })
        );
        assert!(apply_move(&board, 6, Player::One).is_err());
    }

    #[test]
    fn test_horizontal_win() {
        let board = board_from_drops(&[
            (0, Player::One),
            (0, Player::Two),
            (1, Player::One),
            (1, Player::Two),
            (2, Player::One),
            (2, Player::Two),
            (3, Player::One),
        ]);
        assert!(check_win(&board, Player::One));
        assert!(!check_win(&board, Player::Two));
    }

    #[test]
    fn test_vertical_win() {
        let board = board_from_drops(&[
            (4, Player::Two),
            (4, Player::Two),
            (4, Player::Two),
            (4, Player::Two),
        ]);
        assert!(check_win(&board, Player::Two));
        assert_eq!(
            winning_cells(&board, Player::Two).unwrap(),
            [(2, 4), (3, 4), (4, 4), (5, 4)]
        );
    }

    #[test]
    fn test_rising_diagonal_win() {
        // Stairs of heights 1-4 from col 0 put One's pieces on the rising
        // diagonal; the forward scan reports it as a SW run anchored at the
        // topmost piece.
        let board = board_from_drops(&[
            (0, Player::One),
            (1, Player::Two),
            (1, Player::One),
            (2, Player::Two),
            (2, Player::Two),
            (2, Player::One),
            (3, Player::Two),
            (3, Player::Two),
            (3, Player::Two),
            (3, Player::One),
        ]);
        assert!(check_win(&board, Player::One));
        assert_eq!(
            winning_cells(&board, Player::One).unwrap(),
            [(2, 3), (3, 2), (4, 1), (5, 0)]
        );
    }

    #[test]
    fn test_falling_diagonal_win() {
        let board = board_from_drops(&[
            (6, Player::One),
            (5, Player::Two),
            (5, Player::One),
            (4, Player::Two),
            (4, Player::Two),
            (4, Player::One),
            (3, Player::Two),
            (3, Player::Two),
            (3, Player::Two),
            (3, Player::One),
        ]);
        assert!(check_win(&board, Player::One));
        assert_eq!(
            winning_cells(&board, Player::One).unwrap(),
            [(2, 3), (3, 4), (4, 5), (5, 6)]
        );
    }

    #[test]
    fn test_three_with_gap_is_not_a_win() {
        let board = board_from_drops(&[
            (0, Player::One),
            (1, Player::One),
            (2, Player::One),
            (4, Player::One),
        ]);
        assert!(!check_win(&board, Player::One));
        assert!(winning_cells(&board, Player::One).is_none());
    }

    #[test]
    fn test_winning_cells_row_major_tie_break() {
        // Five in a row: the reported window starts at the leftmost cell
        let board = board_from_drops(&[
            (1, Player::One),
            (2, Player::One),
            (3, Player::One),
            (4, Player::One),
            (5, Player::One),
        ]);
        assert_eq!(
            winning_cells(&board, Player::One).unwrap(),
            [(5, 1), (5, 2), (5, 3), (5, 4)]
        );
    }

    #[test]
    fn test_full_board_draw() {
        let board = full_draw_board();
        assert!(board.is_full());
        assert!(valid_moves(&board).is_empty());
        assert!(!check_win(&board, Player::One));
        assert!(!check_win(&board, Player::Two));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_won_board_is_not_a_draw() {
        let board = board_from_drops(&[
            (0, Player::One),
            (1, Player::One),
            (2, Player::One),
            (3, Player::One),
        ]);
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_move_resolve() {
        let board = board_from_drops(&[(2, Player::One)]);
        let mv = Move::resolve(&board, 2, Player::Two).unwrap();
        assert_eq!(mv, Move { col: 2, row: 4, player: Player::Two });
        // Resolving does not place the piece
        assert_eq!(board.cell(4, 2).unwrap(), None);
    }
}
