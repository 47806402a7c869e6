//! Reconciliation thresholds.
//!
//! Every behavioral constant of the engine lives here so that rules are
//! tunable and testable without code changes. Historical iterations of this
//! logic disagreed on some values (1.5h vs 2h break threshold, review bound
//! vs pairing bound); the defaults below are the canonical rule set.

use serde::{Deserialize, Serialize};

/// Thresholds governing deduplication, classification, pairing, and flagging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Adjacent punches for one employee at most this many minutes apart are
    /// merged into one representative event. Default: 5.
    pub dedup_window_minutes: i64,

    /// Punches with hour-of-day strictly below this are forced `CHECK_OUT`
    /// (departure from an overnight shift). Default: 6.
    pub night_cutoff_hour: u32,

    /// A gap strictly above this many hours since the previous punch starts
    /// an unrelated new shift (`CHECK_IN`). Default: 12.
    pub max_gap_hours: f64,

    /// After a `CHECK_OUT`, a gap of at least this many hours means the
    /// employee is returning for a new session rather than resuming the old
    /// one. Default: 2.
    pub break_threshold_hours: f64,

    /// Hard pairing bound: no session may span more than this many hours.
    /// Default: 16.
    pub max_shift_hours: f64,

    /// Review bound: sessions longer than this are flagged for human review
    /// but still emitted. Kept below `max_shift_hours` so the flag can fire
    /// on sessions the pairing bound admits. Default: 12.
    pub excessive_duration_hours: f64,

    /// Baseline shift length; hours beyond it count as overtime. Default: 8.
    pub standard_shift_hours: f64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            dedup_window_minutes: 5,
            night_cutoff_hour: 6,
            max_gap_hours: 12.0,
            break_threshold_hours: 2.0,
            max_shift_hours: 16.0,
            excessive_duration_hours: 12.0,
            standard_shift_hours: 8.0,
        }
    }
}
