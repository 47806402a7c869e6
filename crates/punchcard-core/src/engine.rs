//! End-to-end punch reconciliation.
//!
//! One batch flows through four stages per employee: duplicate bursts are
//! merged, survivors are classified as check-ins or check-outs, opposite
//! directions are paired into sessions, and sessions are rolled up into a
//! per-employee summary. Employees never share state, so the engine fans
//! out across them with rayon and stitches the results back together in a
//! deterministic order.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ReconcileConfig;
use crate::dedup::{cluster_bursts, resolve_clusters};
use crate::event::PunchEvent;
use crate::observer::{NoopObserver, ReconcileObserver};
use crate::pair::{ClassifiedEvent, pair_events};
use crate::session::{EmployeeSummary, Session, UnpairedEvent, summarize};

/// Everything the engine produces for one batch of punches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileOutput {
    /// Paired work periods, sorted by employee then check-in time.
    pub sessions: Vec<Session>,
    /// Punches no pairing pass could match, sorted by employee then time.
    pub unpaired: Vec<UnpairedEvent>,
    /// One rollup per employee present in the input, sorted by employee.
    pub summaries: Vec<EmployeeSummary>,
}

/// Reconcile a batch of punches with default (silent) observation.
#[must_use]
pub fn reconcile(events: &[PunchEvent], config: &ReconcileConfig) -> ReconcileOutput {
    reconcile_with_observer(events, config, &NoopObserver)
}

/// Reconcile a batch of punches, reporting each pipeline step to `observer`.
///
/// Input order never matters: punches are grouped by employee, sorted by
/// timestamp within each group, and the merged output is sorted at the end.
pub fn reconcile_with_observer<O: ReconcileObserver>(
    events: &[PunchEvent],
    config: &ReconcileConfig,
    observer: &O,
) -> ReconcileOutput {
    let mut grouped: HashMap<i64, Vec<NaiveDateTime>> = HashMap::new();
    for event in events {
        grouped
            .entry(event.employee_id)
            .or_default()
            .push(event.timestamp);
    }
    let mut groups: Vec<(i64, Vec<NaiveDateTime>)> = grouped.into_iter().collect();
    groups.sort_by_key(|(employee_id, _)| *employee_id);

    tracing::debug!(
        employees = groups.len(),
        punches = events.len(),
        "reconciling punch batch"
    );

    let results: Vec<EmployeeResult> = groups
        .into_par_iter()
        .map(|(employee_id, mut timestamps)| {
            timestamps.sort_unstable();
            reconcile_employee(employee_id, &timestamps, config, observer)
        })
        .collect();

    let mut output = ReconcileOutput::default();
    for result in results {
        output.sessions.extend(result.sessions);
        output.unpaired.extend(result.unpaired);
        output.summaries.push(result.summary);
    }

    output
        .sessions
        .sort_by_key(|session| (session.employee_id, session.check_in));
    output
        .unpaired
        .sort_by_key(|event| (event.employee_id, event.timestamp));
    output.summaries.sort_by_key(|summary| summary.employee_id);

    output
}

struct EmployeeResult {
    sessions: Vec<Session>,
    unpaired: Vec<UnpairedEvent>,
    summary: EmployeeSummary,
}

/// Run the full pipeline for one employee's sorted timestamps.
fn reconcile_employee<O: ReconcileObserver>(
    employee_id: i64,
    timestamps: &[NaiveDateTime],
    config: &ReconcileConfig,
    observer: &O,
) -> EmployeeResult {
    let clusters = cluster_bursts(timestamps, config.dedup_window_minutes);
    let resolved = resolve_clusters(&clusters, config);

    for punch in &resolved {
        if punch.cluster.size > 1 {
            observer.cluster_collapsed(employee_id, &punch.cluster);
        }
        observer.event_classified(employee_id, punch.timestamp(), punch.direction, punch.rule);
    }

    let mut classified: Vec<ClassifiedEvent> = resolved
        .iter()
        .map(|punch| ClassifiedEvent::new(punch.timestamp(), punch.direction))
        .collect();
    let pairs = pair_events(&mut classified, config);

    let mut sessions = Vec::with_capacity(pairs.len());
    for pair in &pairs {
        observer.session_paired(employee_id, pair.check_in, pair.check_out, pair.pass);
        sessions.push(Session::new(
            employee_id,
            pair.check_in,
            pair.check_out,
            config,
        ));
    }

    let mut unpaired = Vec::new();
    for event in &classified {
        if !event.consumed {
            observer.event_unpaired(employee_id, event.timestamp, event.direction);
            unpaired.push(UnpairedEvent {
                employee_id,
                timestamp: event.timestamp,
                direction: event.direction,
            });
        }
    }

    let summary = summarize(employee_id, &sessions);

    EmployeeResult {
        sessions,
        unpaired,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;

    use super::*;
    use crate::classify::ClassifyRule;
    use crate::dedup::Cluster;
    use crate::event::Direction;
    use crate::pair::PairPass;
    use crate::session::AnomalyKind;

    fn ts(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .expect("valid test date")
            .and_hms_opt(hour, minute, 0)
            .expect("valid test time")
    }

    fn punch(employee_id: i64, day: u32, hour: u32, minute: u32) -> PunchEvent {
        PunchEvent::new(employee_id, ts(day, hour, minute))
    }

    #[test]
    fn plain_day_yields_one_session_with_overtime() {
        let events = [punch(1, 1, 8, 0), punch(1, 1, 17, 0)];
        let output = reconcile(&events, &ReconcileConfig::default());

        assert_eq!(output.sessions.len(), 1);
        let session = &output.sessions[0];
        assert_eq!(session.check_in, ts(1, 8, 0));
        assert_eq!(session.check_out, ts(1, 17, 0));
        assert!((session.hours_worked - 9.0).abs() < f64::EPSILON);
        assert!((session.overtime_hours - 1.0).abs() < f64::EPSILON);
        assert!(output.unpaired.is_empty());
        assert_eq!(
            output.summaries,
            vec![EmployeeSummary {
                employee_id: 1,
                total_hours: 9.0,
                total_overtime: 1.0,
                session_count: 1,
            }]
        );
    }

    #[test]
    fn duplicate_burst_collapses_before_pairing() {
        let events = [punch(1, 1, 8, 0), punch(1, 1, 8, 2), punch(1, 1, 17, 0)];
        let output = reconcile(&events, &ReconcileConfig::default());

        assert_eq!(output.sessions.len(), 1);
        assert_eq!(output.sessions[0].check_in, ts(1, 8, 0));
        assert!((output.sessions[0].hours_worked - 9.0).abs() < f64::EPSILON);
        assert!(output.unpaired.is_empty());
    }

    #[test]
    fn overnight_shift_pairs_across_midnight() {
        let events = [punch(3, 1, 22, 0), punch(3, 2, 5, 30)];
        let output = reconcile(&events, &ReconcileConfig::default());

        assert_eq!(output.sessions.len(), 1);
        let session = &output.sessions[0];
        assert_eq!(session.date, ts(1, 0, 0).date());
        assert_eq!(session.check_in, ts(1, 22, 0));
        assert_eq!(session.check_out, ts(2, 5, 30));
        assert!((session.hours_worked - 7.5).abs() < f64::EPSILON);
        assert!(output.unpaired.is_empty());
    }

    #[test]
    fn lone_punch_is_reported_unpaired_with_zero_summary() {
        let output = reconcile(&[punch(7, 1, 9, 0)], &ReconcileConfig::default());

        assert!(output.sessions.is_empty());
        assert_eq!(
            output.unpaired,
            vec![UnpairedEvent {
                employee_id: 7,
                timestamp: ts(1, 9, 0),
                direction: Direction::CheckIn,
            }]
        );
        assert_eq!(output.summaries, vec![EmployeeSummary::empty(7)]);
    }

    #[test]
    fn return_from_break_opens_a_second_session() {
        let events = [punch(2, 1, 8, 0), punch(2, 1, 12, 30), punch(2, 1, 18, 0)];
        let output = reconcile(&events, &ReconcileConfig::default());

        assert_eq!(output.sessions.len(), 1);
        assert!((output.sessions[0].hours_worked - 4.5).abs() < f64::EPSILON);
        assert_eq!(
            output.unpaired,
            vec![UnpairedEvent {
                employee_id: 2,
                timestamp: ts(1, 18, 0),
                direction: Direction::CheckIn,
            }]
        );
        let summary = &output.summaries[0];
        assert!((summary.total_hours - 4.5).abs() < f64::EPSILON);
        assert_eq!(summary.session_count, 1);
    }

    #[test]
    fn employees_are_reconciled_independently() {
        let events = [
            punch(2, 1, 9, 0),
            punch(1, 1, 8, 0),
            punch(2, 1, 17, 30),
            punch(1, 1, 17, 0),
        ];
        let output = reconcile(&events, &ReconcileConfig::default());

        assert_eq!(output.sessions.len(), 2);
        assert_eq!(output.sessions[0].employee_id, 1);
        assert_eq!(output.sessions[1].employee_id, 2);
        assert_eq!(output.summaries.len(), 2);
        assert_eq!(output.summaries[0].employee_id, 1);
        assert_eq!(output.summaries[1].employee_id, 2);
    }

    #[test]
    fn output_is_independent_of_input_order() {
        let events = vec![
            punch(4, 1, 8, 0),
            punch(4, 1, 8, 2),
            punch(4, 1, 12, 30),
            punch(4, 1, 18, 0),
            punch(9, 1, 22, 0),
            punch(9, 2, 5, 30),
            punch(2, 1, 9, 0),
        ];
        let baseline = reconcile(&events, &ReconcileConfig::default());

        let mut reversed = events.clone();
        reversed.reverse();
        assert_eq!(reconcile(&reversed, &ReconcileConfig::default()), baseline);

        let mut rotated = events;
        rotated.rotate_left(3);
        assert_eq!(reconcile(&rotated, &ReconcileConfig::default()), baseline);
    }

    #[test]
    fn every_kept_punch_lands_in_exactly_one_place() {
        let config = ReconcileConfig::default();
        let events = [
            punch(1, 1, 8, 0),
            punch(1, 1, 8, 3),
            punch(1, 1, 12, 30),
            punch(1, 1, 18, 0),
            punch(1, 1, 23, 50),
            punch(1, 2, 5, 0),
        ];
        let output = reconcile(&events, &config);

        let mut timestamps: Vec<NaiveDateTime> = events.iter().map(|e| e.timestamp).collect();
        timestamps.sort_unstable();
        let resolved = resolve_clusters(
            &cluster_bursts(&timestamps, config.dedup_window_minutes),
            &config,
        );

        for punch in &resolved {
            let timestamp = punch.timestamp();
            let in_sessions = output
                .sessions
                .iter()
                .filter(|s| s.check_in == timestamp || s.check_out == timestamp)
                .count();
            let in_unpaired = output
                .unpaired
                .iter()
                .filter(|u| u.timestamp == timestamp)
                .count();
            assert_eq!(
                in_sessions + in_unpaired,
                1,
                "punch {timestamp} must appear exactly once"
            );
        }
    }

    #[test]
    fn paired_durations_never_exceed_the_shift_bound() {
        let config = ReconcileConfig {
            max_gap_hours: 24.0,
            ..ReconcileConfig::default()
        };
        let events = [
            // 16h apart: pairs exactly at the bound, flagged for review.
            punch(2, 1, 6, 0),
            punch(2, 1, 22, 0),
            // 17h apart: neither pass may match them.
            punch(3, 1, 6, 0),
            punch(3, 1, 23, 0),
        ];
        let output = reconcile(&events, &config);

        assert_eq!(output.sessions.len(), 1);
        assert_eq!(output.sessions[0].employee_id, 2);
        assert!((output.sessions[0].hours_worked - 16.0).abs() < f64::EPSILON);
        assert_eq!(output.sessions[0].flag, Some(AnomalyKind::ExcessiveDuration));
        assert_eq!(output.unpaired.len(), 2);
        assert!(output.unpaired.iter().all(|u| u.employee_id == 3));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let output = reconcile(&[], &ReconcileConfig::default());
        assert_eq!(output, ReconcileOutput::default());
    }

    #[test]
    fn observer_sees_each_pipeline_step() {
        #[derive(Default)]
        struct Counts {
            collapsed: AtomicUsize,
            classified: AtomicUsize,
            paired: AtomicUsize,
            unpaired: AtomicUsize,
        }

        impl ReconcileObserver for Counts {
            fn cluster_collapsed(&self, _: i64, _: &Cluster) {
                self.collapsed.fetch_add(1, Ordering::Relaxed);
            }

            fn event_classified(&self, _: i64, _: NaiveDateTime, _: Direction, _: ClassifyRule) {
                self.classified.fetch_add(1, Ordering::Relaxed);
            }

            fn session_paired(&self, _: i64, _: NaiveDateTime, _: NaiveDateTime, _: PairPass) {
                self.paired.fetch_add(1, Ordering::Relaxed);
            }

            fn event_unpaired(&self, _: i64, _: NaiveDateTime, _: Direction) {
                self.unpaired.fetch_add(1, Ordering::Relaxed);
            }
        }

        let counts = Counts::default();
        let events = [
            punch(1, 1, 8, 0),
            punch(1, 1, 8, 2),
            punch(1, 1, 12, 30),
            punch(1, 1, 18, 0),
        ];
        let _ = reconcile_with_observer(&events, &ReconcileConfig::default(), &counts);

        assert_eq!(counts.collapsed.load(Ordering::Relaxed), 1);
        assert_eq!(counts.classified.load(Ordering::Relaxed), 3);
        assert_eq!(counts.paired.load(Ordering::Relaxed), 1);
        assert_eq!(counts.unpaired.load(Ordering::Relaxed), 1);
    }
}
