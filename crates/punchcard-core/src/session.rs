//! Reconciled output records: sessions, unpaired punches, summaries.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::classify::hours_between;
use crate::config::ReconcileConfig;
use crate::event::Direction;

/// Advisory flag attached to a suspicious session.
///
/// Flags never remove a session from the output; they mark it for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Duration came out zero or negative. The pairing bound excludes this,
    /// so seeing it means a session was constructed outside the pairer.
    NegativeOrZero,
    /// Duration exceeds the review bound (`excessive_duration_hours`).
    ExcessiveDuration,
}

impl AnomalyKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NegativeOrZero => "negative_or_zero",
            Self::ExcessiveDuration => "excessive_duration",
        }
    }
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reconciled work period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub employee_id: i64,
    /// Calendar date of the check-in (an overnight session keeps the date it
    /// started on).
    pub date: NaiveDate,
    #[serde(with = "crate::timefmt")]
    pub check_in: NaiveDateTime,
    #[serde(with = "crate::timefmt")]
    pub check_out: NaiveDateTime,
    /// Rounded to 2 decimals.
    pub hours_worked: f64,
    /// Hours beyond the standard shift, rounded to 2 decimals.
    pub overtime_hours: f64,
    pub flag: Option<AnomalyKind>,
}

impl Session {
    /// Build a session from a matched pair, computing hours, overtime, and
    /// any anomaly flag.
    #[must_use]
    pub fn new(
        employee_id: i64,
        check_in: NaiveDateTime,
        check_out: NaiveDateTime,
        config: &ReconcileConfig,
    ) -> Self {
        let raw_hours = hours_between(check_in, check_out);
        let flag = if raw_hours <= 0.0 {
            Some(AnomalyKind::NegativeOrZero)
        } else if raw_hours > config.excessive_duration_hours {
            Some(AnomalyKind::ExcessiveDuration)
        } else {
            None
        };

        Self {
            employee_id,
            date: check_in.date(),
            check_in,
            check_out,
            hours_worked: round2(raw_hours),
            overtime_hours: round2((raw_hours - config.standard_shift_hours).max(0.0)),
            flag,
        }
    }
}

/// A classified punch the pairer could not match.
///
/// An open `CHECK_IN` signals an incomplete session; an open `CHECK_OUT` a
/// departure with no recorded arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpairedEvent {
    pub employee_id: i64,
    #[serde(with = "crate::timefmt")]
    pub timestamp: NaiveDateTime,
    pub direction: Direction,
}

/// Per-employee rollup of reconciled sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub employee_id: i64,
    pub total_hours: f64,
    pub total_overtime: f64,
    pub session_count: usize,
}

impl EmployeeSummary {
    /// Zero-valued summary for an employee with no reconciled sessions.
    #[must_use]
    pub const fn empty(employee_id: i64) -> Self {
        Self {
            employee_id,
            total_hours: 0.0,
            total_overtime: 0.0,
            session_count: 0,
        }
    }
}

/// Fold one employee's sessions into a summary.
///
/// Totals are folded from the already-rounded per-session values and
/// re-rounded, so a summary is always explainable from its visible sessions.
pub fn summarize(employee_id: i64, sessions: &[Session]) -> EmployeeSummary {
    EmployeeSummary {
        employee_id,
        total_hours: round2(sessions.iter().map(|s| s.hours_worked).sum()),
        total_overtime: round2(sessions.iter().map(|s| s.overtime_hours).sum()),
        session_count: sessions.len(),
    }
}

/// Round hour values to 2 decimals, the precision of the output contract.
#[must_use]
pub fn round2(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
