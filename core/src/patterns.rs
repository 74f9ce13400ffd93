// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decorative pattern detection and bonuses
//!
//! Patterns are fixed groups of filled cells found anywhere on the board
//! after clearing. Detection never changes the board and is independent of
//! line clears and the multiplier chain. Overlapping matches are all
//! reported, both across pattern kinds and across anchors of one kind.

use crate::{board::Board, Position, GRID_SIZE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The pattern shapes that earn bonuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Centre cell plus its four orthogonal neighbours
    Cross,
    /// Three cells of a 2x2 box, in any of four rotations
    LShape,
    /// Same cells as `Cross`, scored under its own name
    Diamond,
    /// Eight cells winding inwards through a 3x3 box
    Spiral,
    /// A filled 2x2 block
    Checkerboard,
}

const PLUS: &[(i32, i32)] = &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)];

const L_ROTATIONS: &[&[(i32, i32)]] = &[
    &[(0, 0), (1, 0), (1, 1)],
    &[(0, 0), (0, 1), (1, 0)],
    &[(0, 0), (0, 1), (1, 1)],
    &[(0, 1), (1, 0), (1, 1)],
];

// Clockwise around the top, right and bottom edges, then into the centre
const SPIRAL: &[(i32, i32)] = &[
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 2),
    (2, 2),
    (2, 1),
    (2, 0),
    (1, 1),
];

const BLOCK: &[(i32, i32)] = &[(0, 0), (0, 1), (1, 0), (1, 1)];

impl PatternKind {
    /// Every kind, in scoring order
    pub const ALL: [PatternKind; 5] = [
        PatternKind::Cross,
        PatternKind::LShape,
        PatternKind::Diamond,
        PatternKind::Spiral,
        PatternKind::Checkerboard,
    ];

    /// Offset sets this kind matches; each variant is checked at every anchor
    fn variants(self) -> &'static [&'static [(i32, i32)]] {
        match self {
            PatternKind::Cross | PatternKind::Diamond => &[PLUS],
            PatternKind::LShape => L_ROTATIONS,
            PatternKind::Spiral => &[SPIRAL],
            PatternKind::Checkerboard => &[BLOCK],
        }
    }

    /// Find every match of this kind on the board
    pub fn detect(self, board: &Board) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for offsets in self.variants() {
            let height = offsets.iter().map(|&(r, _)| r).max().unwrap_or(0);
            let width = offsets.iter().map(|&(_, c)| c).max().unwrap_or(0);

            for row in 0..(GRID_SIZE as i32 - height) {
                for col in 0..(GRID_SIZE as i32 - width) {
                    if offsets
                        .iter()
                        .all(|&(dr, dc)| board.is_filled_at(row + dr, col + dc))
                    {
                        matches.push(PatternMatch {
                            kind: self,
                            anchor: Position::new(row as usize, col as usize),
                            cells: offsets
                                .iter()
                                .map(|&(dr, dc)| {
                                    Position::new((row + dr) as usize, (col + dc) as usize)
                                })
                                .collect(),
                        });
                    }
                }
            }
        }
        matches
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternKind::Cross => "cross",
            PatternKind::LShape => "l_shape",
            PatternKind::Diamond => "diamond",
            PatternKind::Spiral => "spiral",
            PatternKind::Checkerboard => "checkerboard",
        };
        f.write_str(name)
    }
}

/// One occurrence of a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub kind: PatternKind,
    /// Top-left corner of the pattern's bounding box
    pub anchor: Position,
    /// The filled cells that make up the match
    pub cells: Vec<Position>,
}

/// Run every detector over the board
pub fn detect_patterns(board: &Board) -> Vec<PatternMatch> {
    PatternKind::ALL
        .iter()
        .flat_map(|kind| kind.detect(board))
        .collect()
}

/// Point weight for one pattern kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternWeight {
    pub base_points: u32,
    pub multiplier: f64,
}

impl PatternWeight {
    const fn new(base_points: u32, multiplier: f64) -> Self {
        Self {
            base_points,
            multiplier,
        }
    }
}

/// Pattern bonus settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Whether patterns are scanned and scored
    pub enabled: bool,
    pub cross: PatternWeight,
    pub l_shape: PatternWeight,
    pub diamond: PatternWeight,
    pub spiral: PatternWeight,
    pub checkerboard: PatternWeight,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cross: PatternWeight::new(30, 1.0),
            l_shape: PatternWeight::new(5, 1.0),
            diamond: PatternWeight::new(30, 1.0),
            spiral: PatternWeight::new(60, 1.0),
            checkerboard: PatternWeight::new(10, 1.0),
        }
    }
}

impl PatternConfig {
    /// Weight for a kind
    pub fn weight(&self, kind: PatternKind) -> PatternWeight {
        match kind {
            PatternKind::Cross => self.cross,
            PatternKind::LShape => self.l_shape,
            PatternKind::Diamond => self.diamond,
            PatternKind::Spiral => self.spiral,
            PatternKind::Checkerboard => self.checkerboard,
        }
    }
}

/// Count matches per kind
pub fn count_by_kind(matches: &[PatternMatch]) -> BTreeMap<PatternKind, u64> {
    let mut counts = BTreeMap::new();
    for m in matches {
        *counts.entry(m.kind).or_insert(0) += 1;
    }
    counts
}

/// Bonus for a set of matches.
///
/// Each kind contributes `floor(base_points * multiplier * count * difficulty)`.
pub fn calculate_pattern_bonus(
    matches: &[PatternMatch],
    config: &PatternConfig,
    difficulty: f64,
) -> u64 {
    let difficulty = crate::scoring::sanitize_multiplier(difficulty);
    count_by_kind(matches)
        .into_iter()
        .map(|(kind, count)| {
            let weight = config.weight(kind);
            let multiplier = crate::scoring::sanitize_multiplier(weight.multiplier);
            (f64::from(weight.base_points) * multiplier * count as f64 * difficulty).floor() as u64
        })
        .sum()
}

/// A scan that found at least one pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub patterns: Vec<PatternMatch>,
    pub total: usize,
    pub timestamp: DateTime<Utc>,
}

/// Result of one tracked scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternScan {
    pub matches: Vec<PatternMatch>,
    pub bonus: u64,
}

/// Session-scoped pattern statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternTracker {
    config: PatternConfig,
    history: Vec<PatternRecord>,
    counts: BTreeMap<PatternKind, u64>,
    total_bonus: u64,
}

impl PatternTracker {
    /// Create a tracker with no history
    pub fn new(config: PatternConfig) -> Self {
        Self {
            config,
            history: Vec::new(),
            counts: BTreeMap::new(),
            total_bonus: 0,
        }
    }

    /// Detect and score patterns without recording them
    pub fn preview(&self, board: &Board, difficulty: f64) -> PatternScan {
        if !self.config.enabled {
            return PatternScan::default();
        }

        let matches = detect_patterns(board);
        let bonus = calculate_pattern_bonus(&matches, &self.config, difficulty);
        PatternScan { matches, bonus }
    }

    /// Detect patterns, score them and append them to the history
    pub fn scan(&mut self, board: &Board, difficulty: f64) -> PatternScan {
        let PatternScan { matches, bonus } = self.preview(board, difficulty);
        if matches.is_empty() {
            return PatternScan::default();
        }

        for (kind, count) in count_by_kind(&matches) {
            *self.counts.entry(kind).or_insert(0) += count;
        }
        self.total_bonus = self.total_bonus.saturating_add(bonus);

        tracing::trace!("Detected {} patterns worth {} points", matches.len(), bonus);

        self.history.push(PatternRecord {
            patterns: matches.clone(),
            total: matches.len(),
            timestamp: Utc::now(),
        });

        PatternScan { matches, bonus }
    }

    /// Matches seen per kind over the whole game
    pub fn counts(&self) -> &BTreeMap<PatternKind, u64> {
        &self.counts
    }

    /// Matches seen for one kind
    pub fn count(&self, kind: PatternKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Sum of all pattern bonuses
    pub fn total_bonus(&self) -> u64 {
        self.total_bonus
    }

    /// Every scan that found something, oldest first
    pub fn history(&self) -> &[PatternRecord] {
        &self.history
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Clear history and counters (new game)
    pub fn reset(&mut self) {
        self.history.clear();
        self.counts.clear();
        self.total_bonus = 0;
    }
}

impl Default for PatternTracker {
    fn default() -> Self {
        Self::new(PatternConfig::default())
    }
}
