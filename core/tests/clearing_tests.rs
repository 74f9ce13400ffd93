// SPDX-License-Identifier: MIT OR Apache-2.0

use blockdoku_core::{
    clear_lines, find_completed_lines, place, BlockShape, Board, ClearResult, GRID_SIZE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn single() -> BlockShape {
    BlockShape::from_rows("single", &["#"])
}

#[test]
fn completing_a_row_clears_only_that_row() {
    let mut board = Board::from_rows(&[
        "########.",
        "#........",
        "#........",
        ".........",
        ".........",
        ".........",
        ".........",
        ".........",
        "....#....",
    ])
    .unwrap();

    assert!(place(&mut board, &single(), 0, 8));
    let result = find_completed_lines(&board);
    assert_eq!(result.rows, vec![0]);
    assert!(result.columns.is_empty());
    assert!(result.squares.is_empty());

    clear_lines(&mut board, &result);
    for col in 0..GRID_SIZE {
        assert!(!board.is_filled(0, col));
    }
    assert!(board.is_filled(1, 0));
    assert!(board.is_filled(2, 0));
    assert!(board.is_filled(8, 4));
    assert_eq!(board.filled_count(), 3);
}

#[test]
fn completing_a_square() {
    let mut board = Board::from_rows(&[
        ".........",
        ".........",
        ".........",
        "...###...",
        "...#.#...",
        "...###...",
        ".........",
        ".........",
        ".........",
    ])
    .unwrap();

    assert!(place(&mut board, &single(), 4, 4));
    let result = find_completed_lines(&board);
    assert_eq!(result.squares, vec![(1, 1)]);
    assert_eq!(result.total_clears(), 1);

    clear_lines(&mut board, &result);
    assert!(board.is_empty());
}

#[test]
fn row_column_and_square_at_once() {
    let mut board = Board::from_rows(&[
        "##.######",
        "###......",
        "###......",
        "..#......",
        "..#......",
        "..#......",
        "..#......",
        "..#......",
        "..#......",
    ])
    .unwrap();

    assert!(place(&mut board, &single(), 0, 2));
    let result = find_completed_lines(&board);
    assert_eq!(
        result,
        ClearResult {
            rows: vec![0],
            columns: vec![2],
            squares: vec![(0, 0)],
        }
    );

    clear_lines(&mut board, &result);
    assert!(board.is_empty());
}

#[test]
fn detection_is_pure_and_repeatable() {
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..100 {
        let mut board = Board::new();
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                if rng.gen_bool(0.85) {
                    board.fill(r, c);
                }
            }
        }
        let before = board.clone();

        let first = find_completed_lines(&board);
        let second = find_completed_lines(&board);
        assert_eq!(first, second);
        assert_eq!(board, before);
    }
}

#[test]
fn clearing_leaves_no_completed_units_behind() {
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..100 {
        let mut board = Board::new();
        for r in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                if rng.gen_bool(0.9) {
                    board.fill(r, c);
                }
            }
        }

        let result = find_completed_lines(&board);
        let cleared = result.cleared_cells();
        let filled_before = board.filled_count();

        clear_lines(&mut board, &result);
        assert!(find_completed_lines(&board).is_empty());
        assert_eq!(board.filled_count(), filled_before - cleared.len());
        for p in cleared {
            assert!(!board.is_filled(p.row, p.col));
        }
    }
}
