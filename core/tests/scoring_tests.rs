// SPDX-License-Identifier: MIT OR Apache-2.0

use blockdoku_core::{
    BlockShape, Board, ClearResult, Difficulty, EngineConfig, GameSession, PatternConfig,
    ScoreBreakdown, ScoringRules,
};

fn single() -> BlockShape {
    BlockShape::from_rows("single", &["#"])
}

fn session_with_board(rows: &[&str]) -> GameSession {
    let mut session = GameSession::new();
    let board = Board::from_rows(rows).unwrap();
    for p in board.filled_positions() {
        // Seed the board cell by cell; none of these fill a unit on their own
        let (row, col) = (p.row as i32, p.col as i32);
        let outcome = session.attempt_placement(&single(), row, col, Difficulty::Normal);
        assert!(outcome.success);
        assert!(outcome.clear_result.is_empty());
    }
    session
}

#[test]
fn single_cell_placement_is_two_points() {
    let rules = ScoringRules::default();
    assert_eq!(rules.placement_points(&single()), 2);
    assert_eq!(rules.total_score(&single(), &ClearResult::default()), 2);
}

#[test]
fn one_row_is_twenty_points() {
    let mut session = session_with_board(&[
        "########.",
        ".........",
        ".........",
        ".........",
        ".........",
        ".........",
        ".........",
        ".........",
        ".........",
    ]);
    let score_before = session.score();

    let outcome = session.attempt_placement(&single(), 0, 8, Difficulty::Normal);
    assert!(outcome.success);
    assert_eq!(outcome.clear_result.rows, vec![0]);
    assert_eq!(outcome.breakdown.placement, 2);
    assert_eq!(outcome.breakdown.clear, 18);
    assert!(!outcome.breakdown.combo);
    assert_eq!(outcome.score_delta, 20);
    assert_eq!(session.score(), score_before + 20);
    assert!(session.board().is_empty());
}

#[test]
fn corner_placement_earns_one_combo_bonus() {
    let mut session = session_with_board(&[
        "########.",
        "........#",
        "........#",
        "........#",
        "........#",
        "........#",
        "........#",
        "........#",
        "........#",
    ]);

    let outcome = session.attempt_placement(&single(), 0, 8, Difficulty::Normal);
    assert_eq!(outcome.clear_result.rows, vec![0]);
    assert_eq!(outcome.clear_result.columns, vec![8]);
    assert!(outcome.breakdown.combo);
    assert_eq!(outcome.breakdown.clear, 18 + 18 + 25);
    assert_eq!(outcome.score_delta, 63);
    assert_eq!(session.stats().combos, 1);
    // Row and column share the corner cell
    assert_eq!(session.stats().cells_cleared, 17);
}

#[test]
fn combo_is_flat_not_per_line() {
    let rules = ScoringRules::default();
    let two = ClearResult {
        rows: vec![0],
        columns: vec![0],
        ..ClearResult::default()
    };
    let four = ClearResult {
        rows: vec![0, 1],
        columns: vec![0],
        squares: vec![(0, 0)],
    };
    assert_eq!(rules.clear_points(&two), 61);
    assert_eq!(rules.clear_points(&four), 18 * 3 + 35 + 25);
}

#[test]
fn difficulty_scales_base_points() {
    let rules = ScoringRules::default();
    let plus = BlockShape::from_rows("plus", &[".#.", "###", ".#."]);
    let row = ClearResult {
        rows: vec![3],
        ..ClearResult::default()
    };

    let normal = ScoreBreakdown::base(&rules, &plus, &row, Difficulty::Normal.multiplier());
    assert_eq!((normal.placement, normal.clear, normal.total), (10, 18, 28));

    let hard = ScoreBreakdown::base(&rules, &plus, &row, Difficulty::Hard.multiplier());
    assert_eq!((hard.placement, hard.clear, hard.total), (15, 27, 42));

    let easy = ScoreBreakdown::base(&rules, &single(), &row, Difficulty::Easy.multiplier());
    assert_eq!((easy.placement, easy.clear), (1, 9));

    let nan = Difficulty::Custom(f64::NAN).multiplier();
    let broken = ScoreBreakdown::base(&rules, &plus, &row, nan);
    assert_eq!(broken.total, 0);
}

#[test]
fn custom_point_table() {
    let config = EngineConfig {
        scoring: ScoringRules {
            points_per_cell: 1,
            line_points: 100,
            square_points: 150,
            combo_bonus: 0,
            combo_threshold: 2,
        },
        patterns: PatternConfig {
            enabled: false,
            ..PatternConfig::default()
        },
        ..EngineConfig::default()
    };
    let mut session = GameSession::with_config(config);
    let line = BlockShape::from_rows("line3_h", &["###"]);
    for col in [0, 3] {
        assert_eq!(session.attempt_placement(&line, 0, col, Difficulty::Normal).score_delta, 3);
    }
    let outcome = session.attempt_placement(&line, 0, 6, Difficulty::Normal);
    assert_eq!(outcome.score_delta, 103);
}
