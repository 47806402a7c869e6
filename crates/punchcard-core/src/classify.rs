//! Direction classification.
//!
//! A deterministic state machine over one employee's deduplicated,
//! time-ordered punches. For each punch, in order:
//!
//! 1. hour-of-day below the night cutoff: `CHECK_OUT`, unconditionally
//!    (departure from an overnight shift);
//! 2. no prior punch: `CHECK_IN`;
//! 3. gap strictly above `max_gap_hours`: `CHECK_IN` (unrelated new shift);
//! 4. prior punch was `CHECK_OUT` and the gap is at least
//!    `break_threshold_hours`: `CHECK_IN` (returning from a real break);
//! 5. otherwise: the opposite of the prior direction.
//!
//! State is an explicit value folded across the sequence, never shared
//! mutable variables, so each step is testable in isolation.

use chrono::{NaiveDateTime, Timelike};

use crate::config::ReconcileConfig;
use crate::event::Direction;

/// Which rule resolved a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyRule {
    NightCutoff,
    FirstEvent,
    GapReset,
    BreakReturn,
    Alternation,
}

/// Classifier state carried across one employee's timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierState {
    last: Option<(Direction, NaiveDateTime)>,
}

impl ClassifierState {
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Resolve the direction for a punch at `timestamp` without advancing.
    #[must_use]
    pub fn classify(
        self,
        timestamp: NaiveDateTime,
        config: &ReconcileConfig,
    ) -> (Direction, ClassifyRule) {
        if timestamp.hour() < config.night_cutoff_hour {
            return (Direction::CheckOut, ClassifyRule::NightCutoff);
        }
        let Some((last_direction, last_timestamp)) = self.last else {
            return (Direction::CheckIn, ClassifyRule::FirstEvent);
        };
        let gap_hours = hours_between(last_timestamp, timestamp);
        if gap_hours > config.max_gap_hours {
            return (Direction::CheckIn, ClassifyRule::GapReset);
        }
        if last_direction == Direction::CheckOut && gap_hours >= config.break_threshold_hours {
            return (Direction::CheckIn, ClassifyRule::BreakReturn);
        }
        (last_direction.opposite(), ClassifyRule::Alternation)
    }

    /// State after a resolved punch. The prior state is fully replaced.
    #[must_use]
    pub const fn after(direction: Direction, timestamp: NaiveDateTime) -> Self {
        Self {
            last: Some((direction, timestamp)),
        }
    }

    /// Classify and advance in one step.
    #[must_use]
    pub fn step(
        self,
        timestamp: NaiveDateTime,
        config: &ReconcileConfig,
    ) -> (Direction, ClassifyRule, Self) {
        let (direction, rule) = self.classify(timestamp, config);
        (direction, rule, Self::after(direction, timestamp))
    }
}

/// Signed gap between two timestamps in fractional hours.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn hours_between(earlier: NaiveDateTime, later: NaiveDateTime) -> f64 {
    (later - earlier).num_seconds() as f64 / 3600.0
}
