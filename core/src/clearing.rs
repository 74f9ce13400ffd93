// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completed row, column and 3x3 square detection

use crate::board::{square_cells, Board};
use crate::{Position, GRID_SIZE, SQUARE_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Lines and squares completed by one placement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearResult {
    /// Completed row indices, ascending
    pub rows: Vec<usize>,
    /// Completed column indices, ascending
    pub columns: Vec<usize>,
    /// Completed squares as (square_row, square_col), each in 0..3
    pub squares: Vec<(usize, usize)>,
}

impl ClearResult {
    /// Number of completed rows, columns and squares together
    pub fn total_clears(&self) -> usize {
        self.rows.len() + self.columns.len() + self.squares.len()
    }

    /// Rows plus columns
    pub fn line_count(&self) -> usize {
        self.rows.len() + self.columns.len()
    }

    /// True when nothing was completed
    pub fn is_empty(&self) -> bool {
        self.total_clears() == 0
    }

    /// Distinct cells covered by the result; intersections count once
    pub fn cleared_cells(&self) -> BTreeSet<Position> {
        let mut cells = BTreeSet::new();
        for &row in &self.rows {
            cells.extend((0..GRID_SIZE).map(|col| Position::new(row, col)));
        }
        for &col in &self.columns {
            cells.extend((0..GRID_SIZE).map(|row| Position::new(row, col)));
        }
        for &(square_row, square_col) in &self.squares {
            cells.extend(square_cells(square_row, square_col));
        }
        cells
    }
}

/// Scan the board for completed rows, columns and squares.
///
/// Each unit is evaluated independently, so a cell on an intersection can be
/// counted by its row, its column and its square at once. The board is not
/// modified.
pub fn find_completed_lines(board: &Board) -> ClearResult {
    let rows = (0..GRID_SIZE).filter(|&r| board.is_row_complete(r)).collect();
    let columns = (0..GRID_SIZE).filter(|&c| board.is_column_complete(c)).collect();

    let mut squares = Vec::new();
    for square_row in 0..SQUARE_SIZE {
        for square_col in 0..SQUARE_SIZE {
            if board.is_square_complete(square_row, square_col) {
                squares.push((square_row, square_col));
            }
        }
    }

    ClearResult {
        rows,
        columns,
        squares,
    }
}

/// Empty every row, column and square named in the result
pub fn clear_lines(board: &mut Board, result: &ClearResult) {
    for &row in &result.rows {
        board.clear_row(row);
    }
    for &col in &result.columns {
        board.clear_column(col);
    }
    for &(square_row, square_col) in &result.squares {
        board.clear_square(square_row, square_col);
    }
}
