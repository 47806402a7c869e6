//! Punch events and their validation boundary.
//!
//! A punch is the raw unit of input: one employee identifier and one
//! timestamp from an attendance terminal. Everything downstream is derived.
//! Timestamp text is validated here; once a `PunchEvent` exists the engine
//! cannot fail.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accepted input timestamp formats, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid timestamp {0:?}: expected YYYY-MM-DD HH:MM:SS")]
    Timestamp(String),
    #[error("malformed punch record: {0}")]
    Record(#[from] serde_json::Error),
}

/// Direction assigned to a punch: arrival or departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    CheckIn,
    CheckOut,
}

impl Direction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CheckIn => "check_in",
            Self::CheckOut => "check_out",
        }
    }

    /// The direction the alternation rule picks after this one.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::CheckIn => Self::CheckOut,
            Self::CheckOut => Self::CheckIn,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A punch record as it appears on the wire, timestamp still unvalidated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPunch {
    pub employee_id: i64,
    pub timestamp: String,
}

/// A validated attendance punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchEvent {
    pub employee_id: i64,
    #[serde(with = "crate::timefmt")]
    pub timestamp: NaiveDateTime,
}

impl PunchEvent {
    #[must_use]
    pub const fn new(employee_id: i64, timestamp: NaiveDateTime) -> Self {
        Self {
            employee_id,
            timestamp,
        }
    }

    /// Parse raw timestamp text into a typed punch.
    pub fn parse(employee_id: i64, timestamp: &str) -> Result<Self, InputError> {
        let trimmed = timestamp.trim();
        TIMESTAMP_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(|parsed| Self::new(employee_id, parsed))
            .ok_or_else(|| InputError::Timestamp(timestamp.to_string()))
    }

    /// Parse one JSONL line (`{"employee_id": 1, "timestamp": "..."}`).
    pub fn from_json_line(line: &str) -> Result<Self, InputError> {
        let raw: RawPunch = serde_json::from_str(line)?;
        Self::parse(raw.employee_id, &raw.timestamp)
    }
}

impl TryFrom<RawPunch> for PunchEvent {
    type Error = InputError;

    fn try_from(raw: RawPunch) -> Result<Self, Self::Error> {
        Self::parse(raw.employee_id, &raw.timestamp)
    }
}
