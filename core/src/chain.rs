// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consecutive-clear multiplier chains
//!
//! Every placement that clears at least one line or square extends the
//! chain. The first clearing placement is worth its normal points; from the
//! second one on the clear points are multiplied by the chain length, up to
//! a configurable cap. A placement without clears breaks the chain.

use crate::clearing::ClearResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Multiplier chain settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Whether chains award bonuses at all
    pub enabled: bool,
    /// Highest multiplier a chain can reach
    pub max_multiplier: u32,
    /// Drop back to 1x when a placement clears nothing
    pub reset_on_non_clear: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_multiplier: 10,
            reset_on_non_clear: true,
        }
    }
}

/// One clearing placement as seen by the chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainEvent {
    /// Chain length including this placement
    pub consecutive_clears: u32,
    /// Multiplier applied to this placement
    pub multiplier: u32,
    /// Difficulty-scaled clear points the bonus was derived from
    pub base_clear_score: u64,
    /// Bonus awarded on top of the base score
    pub bonus: u64,
    /// When the event was recorded
    pub timestamp: DateTime<Utc>,
}

/// Result of feeding one placement into the chain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainUpdate {
    /// Multiplier after the placement
    pub multiplier: u32,
    /// Chain length after the placement
    pub consecutive_clears: u32,
    /// Bonus points earned by this placement
    pub bonus: u64,
    /// An active chain was broken by this placement
    pub broken: bool,
}

/// Summary for end-of-game screens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStats {
    pub current_multiplier: u32,
    pub consecutive_clears: u32,
    pub max_multiplier: u32,
    pub max_consecutive_clears: u32,
    pub total_bonus: u64,
}

/// Session-scoped chain state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierChain {
    config: ChainConfig,
    current_multiplier: u32,
    consecutive_clears: u32,
    max_multiplier: u32,
    max_consecutive_clears: u32,
    total_bonus: u64,
    events: Vec<ChainEvent>,
}

impl MultiplierChain {
    /// Create an idle chain
    pub fn new(config: ChainConfig) -> Self {
        Self {
            config,
            current_multiplier: 1,
            consecutive_clears: 0,
            max_multiplier: 1,
            max_consecutive_clears: 0,
            total_bonus: 0,
            events: Vec::new(),
        }
    }

    /// What feeding this placement into the chain would produce, without
    /// changing any state.
    ///
    /// `base_clear_score` is the clear portion of the placement's score
    /// after difficulty scaling; the bonus is that amount times
    /// `multiplier - 1`, floored.
    pub fn preview(
        &self,
        result: &ClearResult,
        base_clear_score: u64,
        difficulty: f64,
    ) -> ChainUpdate {
        let (consecutive_clears, multiplier, broken) = self.advance(result);
        let bonus = if self.config.enabled && !result.is_empty() {
            chain_bonus(base_clear_score, multiplier, difficulty)
        } else {
            0
        };

        ChainUpdate {
            multiplier,
            consecutive_clears,
            bonus,
            broken,
        }
    }

    /// Feed one placement outcome into the chain
    pub fn record_placement(
        &mut self,
        result: &ClearResult,
        base_clear_score: u64,
        difficulty: f64,
    ) -> ChainUpdate {
        let update = self.preview(result, base_clear_score, difficulty);
        if !self.config.enabled {
            return update;
        }

        if update.broken {
            tracing::debug!(
                "Chain broken after {} clears at {}x",
                self.consecutive_clears,
                self.current_multiplier
            );
        }
        self.consecutive_clears = update.consecutive_clears;
        self.current_multiplier = update.multiplier;

        if result.is_empty() {
            return update;
        }

        self.total_bonus = self.total_bonus.saturating_add(update.bonus);

        if self.current_multiplier > self.max_multiplier {
            self.max_multiplier = self.current_multiplier;
            tracing::info!("New best chain multiplier: {}x", self.max_multiplier);
        }
        self.max_consecutive_clears = self.max_consecutive_clears.max(self.consecutive_clears);

        self.events.push(ChainEvent {
            consecutive_clears: self.consecutive_clears,
            multiplier: self.current_multiplier,
            base_clear_score,
            bonus: update.bonus,
            timestamp: Utc::now(),
        });

        update
    }

    /// Chain length, multiplier and broken flag after the given result
    fn advance(&self, result: &ClearResult) -> (u32, u32, bool) {
        if !self.config.enabled {
            return (self.consecutive_clears, self.current_multiplier, false);
        }

        if result.is_empty() {
            if self.config.reset_on_non_clear && self.is_chaining() {
                return (0, 1, true);
            }
            return (self.consecutive_clears, self.current_multiplier, false);
        }

        let consecutive = self.consecutive_clears.saturating_add(1);
        let multiplier = if consecutive >= 2 {
            consecutive.min(self.config.max_multiplier.max(1))
        } else {
            1
        };
        (consecutive, multiplier, false)
    }

    /// Whether at least one clearing placement is in the current chain
    pub fn is_chaining(&self) -> bool {
        self.consecutive_clears >= 1
    }

    /// Multiplier that applied to the most recent clearing placement
    pub fn current_multiplier(&self) -> u32 {
        self.current_multiplier
    }

    /// Current chain length
    pub fn consecutive_clears(&self) -> u32 {
        self.consecutive_clears
    }

    /// Highest multiplier reached this game
    pub fn max_multiplier(&self) -> u32 {
        self.max_multiplier
    }

    /// Longest chain this game
    pub fn max_consecutive_clears(&self) -> u32 {
        self.max_consecutive_clears
    }

    /// Sum of all chain bonuses this game
    pub fn total_bonus(&self) -> u64 {
        self.total_bonus
    }

    /// Clearing placements recorded this game
    pub fn events(&self) -> &[ChainEvent] {
        &self.events
    }

    /// Active settings
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> ChainStats {
        ChainStats {
            current_multiplier: self.current_multiplier,
            consecutive_clears: self.consecutive_clears,
            max_multiplier: self.max_multiplier,
            max_consecutive_clears: self.max_consecutive_clears,
            total_bonus: self.total_bonus,
        }
    }

    /// Forget everything, including high-water marks (new game)
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }
}

impl Default for MultiplierChain {
    fn default() -> Self {
        Self::new(ChainConfig::default())
    }
}

/// Bonus for a clear at the given multiplier.
///
/// `base_clear_score` is already scaled by difficulty.
fn chain_bonus(base_clear_score: u64, multiplier: u32, difficulty: f64) -> u64 {
    if multiplier <= 1 || base_clear_score == 0 {
        return 0;
    }
    let difficulty = crate::scoring::sanitize_multiplier(difficulty);
    if difficulty == 0.0 {
        return 0;
    }
    let neutral = base_clear_score as f64 / difficulty;
    (neutral * f64::from(multiplier - 1) * difficulty).floor() as u64
}
