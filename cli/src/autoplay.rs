// SPDX-License-Identifier: MIT OR Apache-2.0

//! Headless autoplay: random shape supply and a greedy placement chooser

use blockdoku_core::logging::{LogEntry, SessionTag, StructuredLogger};
use blockdoku_core::{
    valid_positions, BlockShape, ChainStats, Difficulty, EngineConfig, GameSession, GameStats,
    ShapeCatalog, ShapeSource,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::BTreeMap;

/// Shapes offered per round
pub const TRAY_SIZE: usize = 3;

/// Draws shapes uniformly from a catalog
pub struct RandomShapeSource {
    catalog: ShapeCatalog,
    rng: StdRng,
}

impl RandomShapeSource {
    pub fn new(catalog: ShapeCatalog, seed: u64) -> Self {
        Self {
            catalog,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ShapeSource for RandomShapeSource {
    fn next_shapes(&mut self, count: usize) -> Vec<BlockShape> {
        if self.catalog.is_empty() {
            return Vec::new();
        }
        (0..count)
            .map(|_| {
                let idx = self.rng.gen_range(0..self.catalog.len());
                self.catalog.shapes()[idx].clone()
            })
            .collect()
    }
}

/// A placement picked by the chooser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Index into the tray
    pub tray_index: usize,
    pub row: i32,
    pub col: i32,
    /// Score delta the placement would earn
    pub delta: u64,
}

/// Pick the placement with the highest immediate score.
///
/// Every legal anchor of every shape is scored with a preview, so the session
/// is never touched; ties go to the earliest shape, then the earliest anchor.
pub fn choose_placement(
    session: &GameSession,
    tray: &[BlockShape],
    difficulty: Difficulty,
) -> Option<Choice> {
    let mut best: Option<Choice> = None;

    for (tray_index, shape) in tray.iter().enumerate() {
        for p in valid_positions(session.board(), shape) {
            let (row, col) = (p.row as i32, p.col as i32);
            let Ok(breakdown) = session.preview_placement(shape, row, col, difficulty) else {
                continue;
            };
            if best.as_ref().map_or(true, |b| breakdown.total > b.delta) {
                best = Some(Choice {
                    tray_index,
                    row,
                    col,
                    delta: breakdown.total,
                });
            }
        }
    }

    best
}

/// End-of-game report
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub game_number: u64,
    pub seed: u64,
    pub difficulty: String,
    pub score: u64,
    pub rounds: u32,
    pub stats: GameStats,
    pub chain: ChainStats,
    pub patterns: BTreeMap<String, u64>,
    pub pattern_bonus: u64,
    pub final_board: String,
}

/// Options for one autoplay game
#[derive(Debug, Clone)]
pub struct AutoplayOptions {
    pub seed: u64,
    pub difficulty: Difficulty,
    /// Stop after this many rounds even if the game is not over
    pub max_rounds: u32,
}

/// Play one game to completion
pub fn play_game(
    config: &EngineConfig,
    options: &AutoplayOptions,
    tag: &SessionTag,
    logger: Option<&dyn StructuredLogger>,
) -> GameSummary {
    let mut session = GameSession::with_config(config.clone());
    let mut source = RandomShapeSource::new(ShapeCatalog::standard(), options.seed);
    let mut rounds = 0;

    while rounds < options.max_rounds {
        let mut tray = source.next_shapes(TRAY_SIZE);
        if session.is_game_over(&tray) {
            tracing::debug!(rounds, "No offered shape fits, game over");
            break;
        }
        rounds += 1;

        while !tray.is_empty() {
            let Some(choice) = choose_placement(&session, &tray, options.difficulty) else {
                break;
            };
            let shape = tray.remove(choice.tray_index);
            let outcome =
                session.attempt_placement(&shape, choice.row, choice.col, options.difficulty);

            if let Some(logger) = logger {
                let (row, col) = (choice.row, choice.col);
                logger.log(LogEntry::placement(tag.clone(), shape.name(), row, col, &outcome));
            }
        }

        // Leftover shapes that no longer fit end the game, as in a real tray
        if !tray.is_empty() {
            tracing::debug!(rounds, left = tray.len(), "Tray could not be emptied, game over");
            break;
        }
    }

    let patterns = session
        .patterns()
        .counts()
        .iter()
        .map(|(kind, count)| (kind.to_string(), *count))
        .collect();

    GameSummary {
        game_number: tag.game_number,
        seed: options.seed,
        difficulty: options.difficulty.to_string(),
        score: session.score(),
        rounds,
        stats: *session.stats(),
        chain: session.chain_stats(),
        patterns,
        pattern_bonus: session.patterns().total_bonus(),
        final_board: session.board().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_source_is_seeded() {
        let mut a = RandomShapeSource::new(ShapeCatalog::standard(), 11);
        let mut b = RandomShapeSource::new(ShapeCatalog::standard(), 11);
        assert_eq!(a.next_shapes(10), b.next_shapes(10));
    }

    #[test]
    fn test_chooser_prefers_clearing_move() {
        let mut config = EngineConfig::default();
        config.patterns.enabled = false;
        let mut session = GameSession::with_config(config);
        let line = BlockShape::from_rows("line4_h", &["####"]);
        session.attempt_placement(&line, 8, 0, Difficulty::Normal);
        session.attempt_placement(&line, 8, 4, Difficulty::Normal);

        let tray = vec![
            BlockShape::from_rows("domino_h", &["##"]),
            BlockShape::from_rows("single", &["#"]),
        ];
        let choice = choose_placement(&session, &tray, Difficulty::Normal).unwrap();
        assert_eq!(choice.tray_index, 1);
        assert_eq!((choice.row, choice.col), (8, 8));
        assert_eq!(choice.delta, 20);
    }

    #[test]
    fn test_chooser_gives_up_on_full_board() {
        let mut session = GameSession::new();
        let single = BlockShape::from_rows("single", &["#"]);
        // Fill everything except one cell per row, offset so nothing completes
        for row in 0..9 {
            for col in 0..9 {
                if col != (row * 4) % 9 {
                    session.attempt_placement(&single, row, col, Difficulty::Normal);
                }
            }
        }
        let tray = vec![BlockShape::from_rows("square", &["##", "##"])];
        assert_eq!(choose_placement(&session, &tray, Difficulty::Normal), None);
    }
}
