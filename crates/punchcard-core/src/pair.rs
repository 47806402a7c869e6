//! Session pairing.
//!
//! Two passes over one employee's classified punches. The forward pass
//! matches each open `CHECK_IN` to the nearest later `CHECK_OUT` within the
//! shift bound. The backward pass then salvages orphan `CHECK_OUT`s (night
//! departures forced by the cutoff rule) by scanning back to the nearest
//! open `CHECK_IN`. Whatever survives both passes is reported unpaired.

use chrono::NaiveDateTime;

use crate::classify::hours_between;
use crate::config::ReconcileConfig;
use crate::event::Direction;

/// A directed punch awaiting pairing.
///
/// `consumed` is set at most once, by whichever pass matches the punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedEvent {
    pub timestamp: NaiveDateTime,
    pub direction: Direction,
    pub consumed: bool,
}

impl ClassifiedEvent {
    #[must_use]
    pub const fn new(timestamp: NaiveDateTime, direction: Direction) -> Self {
        Self {
            timestamp,
            direction,
            consumed: false,
        }
    }
}

/// Which pass produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairPass {
    Forward,
    Backward,
}

/// A matched check-in/check-out pair, not yet a full session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedPair {
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub pass: PairPass,
}

/// Forward pass: match each open `CHECK_IN` to the nearest later open
/// `CHECK_OUT` with `0 < duration <= max_shift_hours`.
///
/// Events must be sorted ascending by timestamp.
pub fn pair_forward(events: &mut [ClassifiedEvent], config: &ReconcileConfig) -> Vec<MatchedPair> {
    let mut pairs = Vec::new();

    for i in 0..events.len() {
        if events[i].consumed || events[i].direction != Direction::CheckIn {
            continue;
        }
        for j in (i + 1)..events.len() {
            if events[j].consumed || events[j].direction != Direction::CheckOut {
                continue;
            }
            let duration = hours_between(events[i].timestamp, events[j].timestamp);
            if duration > config.max_shift_hours {
                // Later check-outs are further still.
                break;
            }
            if duration > 0.0 {
                events[i].consumed = true;
                events[j].consumed = true;
                pairs.push(MatchedPair {
                    check_in: events[i].timestamp,
                    check_out: events[j].timestamp,
                    pass: PairPass::Forward,
                });
                break;
            }
        }
    }

    pairs
}

/// Backward pass: match each still-open `CHECK_OUT` to the nearest earlier
/// open `CHECK_IN` under the same duration bound.
pub fn pair_backward(events: &mut [ClassifiedEvent], config: &ReconcileConfig) -> Vec<MatchedPair> {
    let mut pairs = Vec::new();

    for i in 0..events.len() {
        if events[i].consumed || events[i].direction != Direction::CheckOut {
            continue;
        }
        for j in (0..i).rev() {
            if events[j].consumed || events[j].direction != Direction::CheckIn {
                continue;
            }
            let duration = hours_between(events[j].timestamp, events[i].timestamp);
            if duration > config.max_shift_hours {
                // Earlier check-ins are further still.
                break;
            }
            if duration > 0.0 {
                events[i].consumed = true;
                events[j].consumed = true;
                pairs.push(MatchedPair {
                    check_in: events[j].timestamp,
                    check_out: events[i].timestamp,
                    pass: PairPass::Backward,
                });
                break;
            }
        }
    }

    pairs
}

/// Run both passes and return all matches ordered by check-in time.
pub fn pair_events(events: &mut [ClassifiedEvent], config: &ReconcileConfig) -> Vec<MatchedPair> {
    let mut pairs = pair_forward(events, config);
    pairs.extend(pair_backward(events, config));
    pairs.sort_by_key(|pair| pair.check_in);
    pairs
}
