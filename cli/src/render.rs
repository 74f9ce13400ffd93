// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use blockdoku_core::{Board, GRID_SIZE, SQUARE_SIZE};

/// Render the board as ASCII art with square separators
pub fn render_board(board: &Board) -> String {
    let mut output = String::new();

    // Column labels
    output.push_str("   ");
    for col in 0..GRID_SIZE {
        if col > 0 && col % SQUARE_SIZE == 0 {
            output.push_str(" |");
        }
        output.push_str(&format!(" {}", column_char(col)));
    }
    output.push('\n');

    for (row, cells) in board.rows().iter().enumerate() {
        if row > 0 && row % SQUARE_SIZE == 0 {
            output.push_str("   ");
            output.push_str(&"-".repeat(GRID_SIZE * 2 + 2 * (SQUARE_SIZE - 1) + 1));
            output.push('\n');
        }

        // Row number (1-indexed)
        output.push_str(&format!("{:2} ", row + 1));
        for (col, cell) in cells.iter().enumerate() {
            if col > 0 && col % SQUARE_SIZE == 0 {
                output.push_str(" |");
            }
            output.push_str(if cell.is_filled() { " #" } else { " ." });
        }
        output.push('\n');
    }

    output
}

/// Column label, A through I
fn column_char(col: usize) -> char {
    (b'A' + col as u8) as char
}
