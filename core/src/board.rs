// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation

use crate::{Cell, Position, GRID_SIZE, SQUARE_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed 9x9 grid of filled and empty cells
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from text rows, `#` (or `X`) for filled and `.` for empty.
    ///
    /// Whitespace inside a row is ignored. Returns `None` unless there are
    /// exactly nine rows of nine cells.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        if rows.len() != GRID_SIZE {
            return None;
        }

        let mut board = Self::new();
        for (r, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != GRID_SIZE {
                return None;
            }
            for (c, symbol) in symbols.into_iter().enumerate() {
                board.cells[r][c] = match symbol {
                    '#' | 'X' | 'x' => Cell::Filled,
                    '.' | '_' => Cell::Empty,
                    _ => return None,
                };
            }
        }
        Some(board)
    }

    /// Get the cell at the specified coordinate
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|cells| cells.get(col)).copied()
    }

    /// Check whether the cell is filled; out-of-range cells count as empty
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Cell::Filled))
    }

    /// Signed variant of [`Board::is_filled`] for pattern scans near the edge
    pub(crate) fn is_filled_at(&self, row: i32, col: i32) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        self.is_filled(row as usize, col as usize)
    }

    /// Set a cell, returning false if the coordinate is off the board
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match self.cells.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Mark a cell filled
    pub fn fill(&mut self, row: usize, col: usize) -> bool {
        self.set(row, col, Cell::Filled)
    }

    /// Check whether every cell of a row is filled
    pub fn is_row_complete(&self, row: usize) -> bool {
        row < GRID_SIZE && self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Check whether every cell of a column is filled
    pub fn is_column_complete(&self, col: usize) -> bool {
        col < GRID_SIZE && self.cells.iter().all(|cells| cells[col].is_filled())
    }

    /// Check whether every cell of the 3x3 square at (square_row, square_col) is filled
    pub fn is_square_complete(&self, square_row: usize, square_col: usize) -> bool {
        if square_row >= SQUARE_SIZE || square_col >= SQUARE_SIZE {
            return false;
        }
        square_cells(square_row, square_col).all(|p| self.cells[p.row][p.col].is_filled())
    }

    /// Empty all nine cells of a row
    pub fn clear_row(&mut self, row: usize) {
        if let Some(cells) = self.cells.get_mut(row) {
            *cells = [Cell::Empty; GRID_SIZE];
        }
    }

    /// Empty all nine cells of a column
    pub fn clear_column(&mut self, col: usize) {
        if col >= GRID_SIZE {
            return;
        }
        for cells in self.cells.iter_mut() {
            cells[col] = Cell::Empty;
        }
    }

    /// Empty all nine cells of a 3x3 square
    pub fn clear_square(&mut self, square_row: usize, square_col: usize) {
        if square_row >= SQUARE_SIZE || square_col >= SQUARE_SIZE {
            return;
        }
        for p in square_cells(square_row, square_col) {
            self.cells[p.row][p.col] = Cell::Empty;
        }
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|cells| cells.iter())
            .filter(|cell| cell.is_filled())
            .count()
    }

    /// Check if no cell is filled
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Positions of all filled cells in row-major order
    pub fn filled_positions(&self) -> Vec<Position> {
        let mut result = Vec::new();
        for (r, cells) in self.cells.iter().enumerate() {
            for (c, cell) in cells.iter().enumerate() {
                if cell.is_filled() {
                    result.push(Position::new(r, c));
                }
            }
        }
        result
    }

    /// Raw rows, for renderers
    pub fn rows(&self) -> &[[Cell; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }
}

/// The nine positions of a 3x3 square
pub(crate) fn square_cells(square_row: usize, square_col: usize) -> impl Iterator<Item = Position> {
    let top = square_row * SQUARE_SIZE;
    let left = square_col * SQUARE_SIZE;
    (0..SQUARE_SIZE * SQUARE_SIZE)
        .map(move |i| Position::new(top + i / SQUARE_SIZE, left + i % SQUARE_SIZE))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, cells) in self.cells.iter().enumerate() {
            for cell in cells {
                f.write_str(if cell.is_filled() { "#" } else { "." })?;
            }
            if r + 1 < GRID_SIZE {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.get(8, 8), Some(Cell::Empty));
        assert_eq!(board.get(9, 0), None);
    }

    #[test]
    fn test_display_matches_from_rows() {
        let rows = [
            "#........",
            ".#.......",
            "..#......",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
            "########.",
        ];
        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.filled_count(), 11);
        assert_eq!(board.to_string(), rows.join("\n"));
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(Board::from_rows(&["........."]).is_none());
        let mut rows = vec!["........."; 9];
        rows[4] = "....?....";
        assert!(Board::from_rows(&rows).is_none());
    }

    #[test]
    fn test_square_completion_and_clear() {
        let mut board = Board::new();
        for p in square_cells(1, 2) {
            board.fill(p.row, p.col);
        }
        assert!(board.is_square_complete(1, 2));
        assert!(!board.is_square_complete(0, 0));
        assert!(!board.is_row_complete(3));

        board.clear_square(1, 2);
        assert!(board.is_empty());
    }
}
