// SPDX-License-Identifier: MIT OR Apache-2.0

//! Point values for placements, clears and combos

use crate::{clearing::ClearResult, shapes::BlockShape};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Baseline point table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Points for every occupied cell of a placed shape
    pub points_per_cell: u32,
    /// Points per completed row or column
    pub line_points: u32,
    /// Points per completed 3x3 square
    pub square_points: u32,
    /// One-off bonus when a placement completes `combo_threshold` or more units
    pub combo_bonus: u32,
    /// Minimum simultaneous clears for the combo bonus
    pub combo_threshold: usize,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            points_per_cell: 2,
            line_points: 18,
            square_points: 35,
            combo_bonus: 25,
            combo_threshold: 2,
        }
    }
}

impl ScoringRules {
    /// Points for putting the shape on the board
    pub fn placement_points(&self, shape: &BlockShape) -> u32 {
        self.points_per_cell
            .saturating_mul(shape.cell_count() as u32)
    }

    /// Whether the result earns the combo bonus
    pub fn is_combo(&self, result: &ClearResult) -> bool {
        result.total_clears() >= self.combo_threshold.max(1)
    }

    /// Points for the lines and squares in the result, including the combo bonus
    pub fn clear_points(&self, result: &ClearResult) -> u32 {
        let lines = self.line_points.saturating_mul(result.line_count() as u32);
        let squares = self
            .square_points
            .saturating_mul(result.squares.len() as u32);
        let combo = if self.is_combo(result) {
            self.combo_bonus
        } else {
            0
        };
        lines.saturating_add(squares).saturating_add(combo)
    }

    /// Placement points plus clear points, before difficulty, chain and pattern bonuses
    pub fn total_score(&self, shape: &BlockShape, result: &ClearResult) -> u32 {
        self.placement_points(shape)
            .saturating_add(self.clear_points(result))
    }
}

/// Scale integer points by a multiplier, flooring the result
pub fn scale_points(points: u32, multiplier: f64) -> u64 {
    let scaled = f64::from(points) * sanitize_multiplier(multiplier);
    scaled.floor() as u64
}

/// Clamp NaN, infinite and negative multipliers to zero
pub fn sanitize_multiplier(multiplier: f64) -> f64 {
    if multiplier.is_finite() && multiplier > 0.0 {
        multiplier
    } else {
        0.0
    }
}

/// Difficulty setting supplying the score multiplier
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Half points
    Easy,
    /// Baseline points
    #[default]
    Normal,
    /// 1.5x points
    Hard,
    /// Double points
    Expert,
    /// Arbitrary multiplier supplied by the host
    Custom(f64),
}

impl Difficulty {
    /// The multiplier applied to placement and clear points
    pub fn multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
            Difficulty::Expert => 2.0,
            Difficulty::Custom(value) => sanitize_multiplier(*value),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Normal => write!(f, "normal"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Expert => write!(f, "expert"),
            Difficulty::Custom(value) => write!(f, "{}", value),
        }
    }
}

/// Error for unrecognised difficulty strings
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown difficulty '{0}' (expected easy, normal, hard, expert or a number)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            other => match other.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => Ok(Difficulty::Custom(value)),
                _ => Err(ParseDifficultyError(s.to_string())),
            },
        }
    }
}

/// Itemised points for one accepted placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Difficulty-scaled placement points
    pub placement: u64,
    /// Difficulty-scaled line, square and combo points
    pub clear: u64,
    /// Whether the combo bonus was part of `clear`
    pub combo: bool,
    /// `placement + clear`
    pub base: u64,
    /// Extra points from the consecutive-clear multiplier
    pub chain_bonus: u64,
    /// Points from decorative patterns
    pub pattern_bonus: u64,
    /// Everything added to the running score
    pub total: u64,
}

impl ScoreBreakdown {
    /// Compute the base portion for a placement at the given difficulty
    pub fn base(
        rules: &ScoringRules,
        shape: &BlockShape,
        result: &ClearResult,
        difficulty: f64,
    ) -> Self {
        let placement = scale_points(rules.placement_points(shape), difficulty);
        let clear = scale_points(rules.clear_points(result), difficulty);
        let base = placement + clear;
        Self {
            placement,
            clear,
            combo: rules.is_combo(result),
            base,
            chain_bonus: 0,
            pattern_bonus: 0,
            total: base,
        }
    }

    /// Add chain and pattern bonuses and recompute the total
    pub fn with_bonuses(mut self, chain_bonus: u64, pattern_bonus: u64) -> Self {
        self.chain_bonus = chain_bonus;
        self.pattern_bonus = pattern_bonus;
        self.total = self
            .base
            .saturating_add(chain_bonus)
            .saturating_add(pattern_bonus);
        self
    }
}
