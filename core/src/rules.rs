// SPDX-License-Identifier: MIT OR Apache-2.0

//! Placement rules and validation logic

use crate::{board::Board, shapes::BlockShape, GameError, Position, GRID_SIZE};

/// Validates block placements against a board
pub struct PlacementValidator<'a> {
    /// The board being checked
    board: &'a Board,
}

impl<'a> PlacementValidator<'a> {
    /// Create a new placement validator
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// Check a placement, reporting the first offending cell.
    ///
    /// Offsets are visited row-major; for each one bounds are checked before
    /// collision. Anchors far outside the board saturate instead of wrapping.
    pub fn check(&self, shape: &BlockShape, row: i32, col: i32) -> Result<(), GameError> {
        for (dr, dc) in shape.offsets() {
            let r = row.saturating_add(dr as i32);
            let c = col.saturating_add(dc as i32);

            if r < 0 || c < 0 || r >= GRID_SIZE as i32 || c >= GRID_SIZE as i32 {
                return Err(GameError::OutOfBounds { row: r, col: c });
            }

            if self.board.is_filled(r as usize, c as usize) {
                return Err(GameError::Occupied {
                    row: r as usize,
                    col: c as usize,
                });
            }
        }

        Ok(())
    }

    /// Check if the shape fits with its anchor at (row, col)
    pub fn can_place(&self, shape: &BlockShape, row: i32, col: i32) -> bool {
        self.check(shape, row, col).is_ok()
    }

    /// Every anchor on the board where the shape fits, row-major
    pub fn valid_positions(&self, shape: &BlockShape) -> Vec<Position> {
        let mut result = Vec::new();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                if self.can_place(shape, row as i32, col as i32) {
                    result.push(Position::new(row, col));
                }
            }
        }
        result
    }

    /// Check if the shape fits at any anchor
    pub fn fits_anywhere(&self, shape: &BlockShape) -> bool {
        (0..GRID_SIZE).any(|row| {
            (0..GRID_SIZE).any(|col| self.can_place(shape, row as i32, col as i32))
        })
    }
}

/// Check if a shape fits at (row, col) on the board
pub fn can_place(board: &Board, shape: &BlockShape, row: i32, col: i32) -> bool {
    PlacementValidator::new(board).can_place(shape, row, col)
}

/// Place a shape, filling its cells.
///
/// Returns false and leaves the board untouched when the shape does not fit.
/// A shape with no occupied offsets always succeeds without changing anything.
pub fn place(board: &mut Board, shape: &BlockShape, row: i32, col: i32) -> bool {
    if let Err(err) = PlacementValidator::new(board).check(shape, row, col) {
        tracing::trace!(shape = shape.name(), row, col, "Placement rejected: {}", err);
        return false;
    }

    for (dr, dc) in shape.offsets() {
        board.fill(row as usize + dr, col as usize + dc);
    }
    true
}

/// Every anchor where the shape fits
pub fn valid_positions(board: &Board, shape: &BlockShape) -> Vec<Position> {
    PlacementValidator::new(board).valid_positions(shape)
}

/// True when none of the available shapes fits anywhere on the board.
///
/// An empty shape list is treated as game over.
pub fn check_game_over(board: &Board, available: &[BlockShape]) -> bool {
    let validator = PlacementValidator::new(board);
    !available.iter().any(|shape| validator.fits_anywhere(shape))
}
