// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine configuration
//!
//! All sections default to the baseline rule set, so a config file only
//! needs the values it changes:
//!
//! ```json
//! { "chain": { "max_multiplier": 5 }, "patterns": { "enabled": false } }
//! ```

use crate::chain::ChainConfig;
use crate::patterns::{PatternConfig, PatternKind};
use crate::scoring::ScoringRules;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors produced while reading or checking a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The multiplier cap must allow at least 1x
    #[error("chain.max_multiplier must be at least 1")]
    ZeroMultiplierCap,

    /// A pattern multiplier is NaN, infinite or negative
    #[error("Pattern multiplier for {kind} must be a finite, non-negative number (got {value})")]
    BadPatternMultiplier {
        /// Offending pattern kind
        kind: PatternKind,
        /// The rejected value
        value: f64,
    },
}

/// Complete rule configuration for a game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Point table
    pub scoring: ScoringRules,
    /// Multiplier chain settings
    pub chain: ChainConfig,
    /// Pattern bonus settings
    pub patterns: PatternConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        tracing::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make scoring ill-defined
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain.max_multiplier == 0 {
            return Err(ConfigError::ZeroMultiplierCap);
        }

        for kind in PatternKind::ALL {
            let value = self.patterns.weight(kind).multiplier;
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::BadPatternMultiplier { kind, value });
            }
        }

        Ok(())
    }
}
