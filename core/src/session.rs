// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game session: the composed placement pipeline
//!
//! A session owns the board and every piece of per-game state. Each
//! placement runs strictly in order: validate, place, detect clears, clear,
//! score, update the chain, scan for patterns. Clear points always come from
//! the `ClearResult` captured before the board is cleared.

use crate::chain::{ChainStats, MultiplierChain};
use crate::clearing::{clear_lines, find_completed_lines, ClearResult};
use crate::config::EngineConfig;
use crate::patterns::{PatternMatch, PatternTracker};
use crate::rules::{check_game_over, PlacementValidator};
use crate::scoring::{Difficulty, ScoreBreakdown};
use crate::shapes::BlockShape;
use crate::{board::Board, GameError};
use serde::{Deserialize, Serialize};

/// Running totals for one game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Accepted placements
    pub placements: u32,
    /// Cells covered by accepted placements
    pub cells_placed: u32,
    pub rows_cleared: u32,
    pub columns_cleared: u32,
    pub squares_cleared: u32,
    /// Distinct cells emptied by clears; an intersection counts once
    pub cells_cleared: u32,
    /// Placements that earned the combo bonus
    pub combos: u32,
    /// Largest single-placement score delta
    pub best_placement_score: u64,
}

impl GameStats {
    /// Rows, columns and squares together
    pub fn total_clears(&self) -> u32 {
        self.rows_cleared + self.columns_cleared + self.squares_cleared
    }
}

/// Everything a caller needs to know about one placement attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOutcome {
    /// Whether the shape was placed
    pub success: bool,
    /// Why the placement was rejected
    pub error: Option<GameError>,
    /// Units completed by the placement, empty on failure
    pub clear_result: ClearResult,
    /// Points added to the score
    pub score_delta: u64,
    /// Itemised `score_delta`
    pub breakdown: ScoreBreakdown,
    /// Chain multiplier after the placement
    pub multiplier: u32,
    /// Patterns found on the board after clearing
    pub patterns: Vec<PatternMatch>,
}

impl PlacementOutcome {
    fn rejected(error: GameError, multiplier: u32) -> Self {
        Self {
            success: false,
            error: Some(error),
            clear_result: ClearResult::default(),
            score_delta: 0,
            breakdown: ScoreBreakdown::default(),
            multiplier,
            patterns: Vec::new(),
        }
    }
}

/// State for one game
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    config: EngineConfig,
    chain: MultiplierChain,
    patterns: PatternTracker,
    score: u64,
    stats: GameStats,
}

impl GameSession {
    /// Start a game with the baseline rules
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Start a game with custom rules
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            board: Board::new(),
            chain: MultiplierChain::new(config.chain.clone()),
            patterns: PatternTracker::new(config.patterns.clone()),
            config,
            score: 0,
            stats: GameStats::default(),
        }
    }

    /// Rebuild a session from saved parts
    pub(crate) fn from_parts(
        board: Board,
        config: EngineConfig,
        chain: MultiplierChain,
        patterns: PatternTracker,
        score: u64,
        stats: GameStats,
    ) -> Self {
        Self {
            board,
            config,
            chain,
            patterns,
            score,
            stats,
        }
    }

    /// Try to place a shape with its anchor at (row, col).
    ///
    /// On failure nothing changes and no points are awarded.
    pub fn attempt_placement(
        &mut self,
        shape: &BlockShape,
        row: i32,
        col: i32,
        difficulty: Difficulty,
    ) -> PlacementOutcome {
        let (board, clear_result, base) = match self.evaluate(shape, row, col, difficulty) {
            Ok(evaluation) => evaluation,
            Err(err) => {
                tracing::trace!(shape = shape.name(), row, col, "Placement rejected: {}", err);
                return PlacementOutcome::rejected(err, self.chain.current_multiplier());
            }
        };
        self.board = board;

        let multiplier = difficulty.multiplier();
        let chain = self
            .chain
            .record_placement(&clear_result, base.clear, multiplier);
        let scan = self.patterns.scan(&self.board, multiplier);
        let breakdown = base.with_bonuses(chain.bonus, scan.bonus);

        self.score = self.score.saturating_add(breakdown.total);
        self.record_stats(shape, &clear_result, &breakdown);

        tracing::debug!(
            shape = shape.name(),
            row,
            col,
            rows = clear_result.rows.len(),
            columns = clear_result.columns.len(),
            squares = clear_result.squares.len(),
            multiplier = chain.multiplier,
            delta = breakdown.total,
            score = self.score,
            "Placement accepted"
        );

        PlacementOutcome {
            success: true,
            error: None,
            clear_result,
            score_delta: breakdown.total,
            breakdown,
            multiplier: chain.multiplier,
            patterns: scan.matches,
        }
    }

    /// Score a placement without making it.
    ///
    /// The breakdown equals what `attempt_placement` would award right now.
    /// Nothing in the session changes and nothing is logged.
    pub fn preview_placement(
        &self,
        shape: &BlockShape,
        row: i32,
        col: i32,
        difficulty: Difficulty,
    ) -> Result<ScoreBreakdown, GameError> {
        let (board, clear_result, base) = self.evaluate(shape, row, col, difficulty)?;
        let multiplier = difficulty.multiplier();
        let chain = self.chain.preview(&clear_result, base.clear, multiplier);
        let scan = self.patterns.preview(&board, multiplier);
        Ok(base.with_bonuses(chain.bonus, scan.bonus))
    }

    /// Board after placing and clearing, the captured clears and base points
    fn evaluate(
        &self,
        shape: &BlockShape,
        row: i32,
        col: i32,
        difficulty: Difficulty,
    ) -> Result<(Board, ClearResult, ScoreBreakdown), GameError> {
        PlacementValidator::new(&self.board).check(shape, row, col)?;

        let mut board = self.board.clone();
        for (dr, dc) in shape.offsets() {
            board.fill(row as usize + dr, col as usize + dc);
        }

        let clear_result = find_completed_lines(&board);
        clear_lines(&mut board, &clear_result);

        let base = ScoreBreakdown::base(
            &self.config.scoring,
            shape,
            &clear_result,
            difficulty.multiplier(),
        );
        Ok((board, clear_result, base))
    }

    fn record_stats(
        &mut self,
        shape: &BlockShape,
        clear: &ClearResult,
        breakdown: &ScoreBreakdown,
    ) {
        let stats = &mut self.stats;
        stats.placements += 1;
        stats.cells_placed += shape.cell_count() as u32;
        stats.rows_cleared += clear.rows.len() as u32;
        stats.columns_cleared += clear.columns.len() as u32;
        stats.squares_cleared += clear.squares.len() as u32;
        stats.cells_cleared += clear.cleared_cells().len() as u32;
        if breakdown.combo {
            stats.combos += 1;
        }
        stats.best_placement_score = stats.best_placement_score.max(breakdown.total);
    }

    /// True when none of the offered shapes fits anywhere
    pub fn is_game_over(&self, available: &[BlockShape]) -> bool {
        check_game_over(&self.board, available)
    }

    /// Start over: empty board, zero score, chain and pattern history cleared
    pub fn reset(&mut self) {
        tracing::info!(
            "Resetting session (final score {}, {} placements)",
            self.score,
            self.stats.placements
        );
        self.board = Board::new();
        self.chain.reset();
        self.patterns.reset();
        self.score = 0;
        self.stats = GameStats::default();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The multiplier chain
    pub fn chain(&self) -> &MultiplierChain {
        &self.chain
    }

    /// Chain counters for summary screens
    pub fn chain_stats(&self) -> ChainStats {
        self.chain.stats()
    }

    /// Pattern counts, bonus and history
    pub fn patterns(&self) -> &PatternTracker {
        &self.patterns
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_rejected_placement_changes_nothing() {
        let mut session = GameSession::new();
        let shape = BlockShape::from_rows("line3_h", &["###"]);
        let outcome = session.attempt_placement(&shape, 0, 7, Difficulty::Normal);

        assert!(!outcome.success);
        assert_eq!(outcome.error, Some(GameError::OutOfBounds { row: 0, col: 9 }));
        assert_eq!(outcome.score_delta, 0);
        assert!(session.board().is_empty());
        assert_eq!(session.score(), 0);
        assert_eq!(session.stats().placements, 0);
    }

    #[test]
    fn test_plain_placement_scores_cells() {
        let mut session = GameSession::new();
        let shape = BlockShape::from_rows("line3_h", &["###"]);
        let outcome = session.attempt_placement(&shape, 2, 2, Difficulty::Normal);

        assert!(outcome.success);
        assert!(outcome.clear_result.is_empty());
        assert_eq!(outcome.score_delta, 6);
        assert_eq!(
            session.board().filled_positions(),
            vec![Position::new(2, 2), Position::new(2, 3), Position::new(2, 4)]
        );
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = GameSession::new();
        let shape = BlockShape::from_rows("square", &["##", "##"]);
        session.attempt_placement(&shape, 0, 0, Difficulty::Hard);
        assert!(session.score() > 0);

        session.reset();
        assert!(session.board().is_empty());
        assert_eq!(session.score(), 0);
        assert_eq!(session.patterns().total_bonus(), 0);
        assert!(session.patterns().history().is_empty());
        assert_eq!(*session.stats(), GameStats::default());
    }
}
