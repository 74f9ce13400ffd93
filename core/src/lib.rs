// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blockdoku Core - Placement, Clearing and Scoring
//!
//! This crate provides the core game functionality including:
//! - 9x9 board representation and placement validation
//! - Row, column and 3x3 square clear detection
//! - Placement, line, square and combo scoring
//! - Consecutive-clear multiplier chains
//! - Decorative pattern detection and bonuses
//! - Session bookkeeping, configuration and snapshots

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod chain;
pub mod clearing;
pub mod config;
pub mod engine;
pub mod logging;
pub mod patterns;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width and height of the board
pub const GRID_SIZE: usize = 9;

/// Width and height of one of the nine 3x3 squares
pub const SQUARE_SIZE: usize = 3;

/// State of a single board cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed here
    #[default]
    Empty,
    /// Covered by a placed block
    Filled,
}

impl Cell {
    /// Returns true for `Cell::Filled`
    pub fn is_filled(self) -> bool {
        self == Cell::Filled
    }
}

/// Absolute board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row index (0 is the top row)
    pub row: usize,
    /// Column index (0 is the left column)
    pub col: usize,
}

impl Position {
    /// Create a new position
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Index of the 3x3 square containing this position, as (square_row, square_col)
    pub fn square(&self) -> (usize, usize) {
        (self.row / SQUARE_SIZE, self.col / SQUARE_SIZE)
    }
}

/// Reasons a placement is rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A shape cell would land outside the 9x9 grid
    #[error("Cell ({row}, {col}) is outside the board")]
    OutOfBounds {
        /// Absolute row of the offending cell
        row: i32,
        /// Absolute column of the offending cell
        col: i32,
    },

    /// A shape cell would land on a filled cell
    #[error("Cell ({row}, {col}) is already filled")]
    Occupied {
        /// Row of the filled cell
        row: usize,
        /// Column of the filled cell
        col: usize,
    },
}

pub use board::Board;
pub use chain::{ChainConfig, ChainEvent, ChainStats, MultiplierChain};
pub use clearing::{clear_lines, find_completed_lines, ClearResult};
pub use config::EngineConfig;
pub use engine::ShapeSource;
pub use patterns::{PatternConfig, PatternKind, PatternMatch, PatternTracker};
pub use rules::{can_place, check_game_over, place, valid_positions, PlacementValidator};
pub use scoring::{Difficulty, ScoreBreakdown, ScoringRules};
pub use session::{GameSession, GameStats, PlacementOutcome};
pub use shapes::{BlockShape, ShapeCatalog};
