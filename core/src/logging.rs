// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured logging with per-session correlation tags

use crate::session::PlacementOutcome;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

static GAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Identifies which session and game a log entry belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionTag {
    /// Unique id of the player session
    pub session_id: String,
    /// Process-wide game sequence number
    pub game_number: u64,
    /// Free-form label set by the host (player name, seed, ...)
    pub label: Option<String>,
}

impl SessionTag {
    /// Create a tag for a new game
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().simple().to_string(),
            game_number: GAME_COUNTER.fetch_add(1, Ordering::SeqCst),
            label: None,
        }
    }

    /// Add a label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Same session, next game
    pub fn next_game(&self) -> Self {
        Self {
            session_id: self.session_id.clone(),
            game_number: GAME_COUNTER.fetch_add(1, Ordering::SeqCst),
            label: self.label.clone(),
        }
    }
}

impl Default for SessionTag {
    fn default() -> Self {
        Self::new()
    }
}

/// Structured log entry
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// ISO 8601 timestamp
    pub timestamp: String,
    /// Log level
    pub level: String,
    /// Event name
    pub event: String,
    /// Session tag
    pub session: SessionTag,
    /// Additional context fields
    #[serde(flatten)]
    pub fields: serde_json::Value,
}

impl LogEntry {
    pub fn new(level: &str, event: &str, session: SessionTag) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level: level.to_string(),
            event: event.to_string(),
            session,
            fields: serde_json::json!({}),
        }
    }

    /// Add additional context fields
    pub fn with_fields(mut self, fields: serde_json::Value) -> Self {
        self.fields = fields;
        self
    }

    /// Entry describing one placement attempt
    pub fn placement(
        session: SessionTag,
        shape: &str,
        row: i32,
        col: i32,
        outcome: &PlacementOutcome,
    ) -> Self {
        let level = if outcome.success { "INFO" } else { "DEBUG" };
        Self::new(level, "placement", session).with_fields(serde_json::json!({
            "shape": shape,
            "row": row,
            "col": col,
            "success": outcome.success,
            "error": outcome.error.as_ref().map(|e| e.to_string()),
            "clears": outcome.clear_result,
            "multiplier": outcome.multiplier,
            "patterns": outcome.patterns.len(),
            "breakdown": outcome.breakdown,
        }))
    }
}

/// Structured logger trait
pub trait StructuredLogger: Send + Sync {
    /// Log a structured entry
    fn log(&self, entry: LogEntry);
}

/// Writes one JSON object per line to stdout
pub struct JsonLogger;

impl StructuredLogger for JsonLogger {
    fn log(&self, entry: LogEntry) {
        match serde_json::to_string(&entry) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!("Failed to serialize log entry: {}", e),
        }
    }
}

/// Keeps entries in memory, for tests and in-process inspection
#[derive(Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything logged so far
    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl StructuredLogger for MemoryLogger {
    fn log(&self, entry: LogEntry) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}
