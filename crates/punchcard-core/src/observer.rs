//! Hooks into the reconciliation pipeline.
//!
//! The engine reports each merged burst, classified punch, paired session,
//! and leftover punch as it works. [`TraceObserver`] turns those reports
//! into `tracing` events; callers wanting structured audit trails can
//! implement [`ReconcileObserver`] themselves.

use chrono::NaiveDateTime;

use crate::classify::ClassifyRule;
use crate::dedup::Cluster;
use crate::event::Direction;
use crate::pair::PairPass;

/// Callbacks fired while reconciling one employee's punches.
///
/// Employees are reconciled in parallel, so implementations must be `Sync`.
/// Every method defaults to a no-op.
pub trait ReconcileObserver: Sync {
    /// A burst of near-duplicate punches was merged into one.
    ///
    /// Only fires for clusters that actually collapsed something
    /// (`cluster.size > 1`).
    fn cluster_collapsed(&self, _employee_id: i64, _cluster: &Cluster) {}

    /// A deduplicated punch was assigned a direction.
    fn event_classified(
        &self,
        _employee_id: i64,
        _timestamp: NaiveDateTime,
        _direction: Direction,
        _rule: ClassifyRule,
    ) {
    }

    /// A check-in and check-out were matched into a session.
    fn session_paired(
        &self,
        _employee_id: i64,
        _check_in: NaiveDateTime,
        _check_out: NaiveDateTime,
        _pass: PairPass,
    ) {
    }

    /// A classified punch survived both pairing passes unmatched.
    fn event_unpaired(&self, _employee_id: i64, _timestamp: NaiveDateTime, _direction: Direction) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ReconcileObserver for NoopObserver {}

/// Observer that emits a `tracing` debug event per callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceObserver;

impl ReconcileObserver for TraceObserver {
    fn cluster_collapsed(&self, employee_id: i64, cluster: &Cluster) {
        tracing::debug!(
            employee_id,
            merged = cluster.size,
            first = %cluster.first,
            last = %cluster.last,
            "collapsed duplicate punch burst"
        );
    }

    fn event_classified(
        &self,
        employee_id: i64,
        timestamp: NaiveDateTime,
        direction: Direction,
        rule: ClassifyRule,
    ) {
        tracing::debug!(
            employee_id,
            timestamp = %timestamp,
            direction = %direction,
            rule = ?rule,
            "classified punch"
        );
    }

    fn session_paired(
        &self,
        employee_id: i64,
        check_in: NaiveDateTime,
        check_out: NaiveDateTime,
        pass: PairPass,
    ) {
        tracing::debug!(
            employee_id,
            check_in = %check_in,
            check_out = %check_out,
            pass = ?pass,
            "paired session"
        );
    }

    fn event_unpaired(&self, employee_id: i64, timestamp: NaiveDateTime, direction: Direction) {
        tracing::debug!(
            employee_id,
            timestamp = %timestamp,
            direction = %direction,
            "punch left unpaired"
        );
    }
}
