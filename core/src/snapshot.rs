// SPDX-License-Identifier: MIT OR Apache-2.0

//! Save and restore helpers for game sessions
//!
//! Storage itself belongs to the host. This module only turns a session
//! into bytes and back, as CBOR for compact storage or JSON for debugging.

use crate::chain::MultiplierChain;
use crate::config::EngineConfig;
use crate::patterns::PatternTracker;
use crate::scoring::ScoringRules;
use crate::session::{GameSession, GameStats};
use crate::board::Board;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors while encoding or decoding a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("CBOR error: {0}")]
    Cbor(#[from] serde_cbor::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty snapshot data")]
    Empty,

    #[error("Unsupported snapshot version {0}")]
    Version(u32),
}

/// Complete saved state of one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub board: Board,
    pub score: u64,
    pub stats: GameStats,
    pub scoring: ScoringRules,
    pub chain: MultiplierChain,
    pub patterns: PatternTracker,
    pub saved_at: DateTime<Utc>,
}

impl GameSnapshot {
    /// Serialize to CBOR
    pub fn to_cbor(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(serde_cbor::to_vec(self)?)
    }

    /// Deserialize from CBOR
    pub fn from_cbor(data: &[u8]) -> Result<Self, SnapshotError> {
        if data.is_empty() {
            return Err(SnapshotError::Empty);
        }
        let snapshot: Self = serde_cbor::from_slice(data)?;
        snapshot.check_version()
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        if json.trim().is_empty() {
            return Err(SnapshotError::Empty);
        }
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            tracing::error!("Rejecting snapshot with version {}", self.version);
            return Err(SnapshotError::Version(self.version));
        }
        Ok(self)
    }
}

impl GameSession {
    /// Capture the full session state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            version: SNAPSHOT_VERSION,
            board: self.board().clone(),
            score: self.score(),
            stats: *self.stats(),
            scoring: self.config().scoring.clone(),
            chain: self.chain().clone(),
            patterns: self.patterns().clone(),
            saved_at: Utc::now(),
        }
    }

    /// Resume a session from a snapshot
    pub fn from_snapshot(snapshot: GameSnapshot) -> Self {
        let config = EngineConfig {
            scoring: snapshot.scoring,
            chain: snapshot.chain.config().clone(),
            patterns: snapshot.patterns.config().clone(),
        };
        GameSession::from_parts(
            snapshot.board,
            config,
            snapshot.chain,
            snapshot.patterns,
            snapshot.score,
            snapshot.stats,
        )
    }
}
