//! Duplicate-punch collapsing.
//!
//! Terminals emit bursts: an employee scans two or three times within a few
//! seconds and each scan lands as a separate punch. A burst is a maximal run
//! of same-employee timestamps whose adjacent gaps stay within the dedup
//! window (chain rule, so a long burst may span more than one window). Each
//! burst collapses to one representative punch.
//!
//! The right representative depends on the burst's direction: an arrival
//! keeps the earliest scan, a departure the latest. Direction is therefore
//! resolved per cluster, on the cluster's first timestamp with the state
//! carried in from prior clusters, and the state advances on the
//! representative that was actually kept.

use chrono::{Duration, NaiveDateTime};

use crate::classify::{ClassifierState, ClassifyRule};
use crate::config::ReconcileConfig;
use crate::event::Direction;

/// A maximal run of punches within the dedup window.
///
/// Member timestamps are sorted, so `first` is the earliest scan and `last`
/// the latest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    pub first: NaiveDateTime,
    pub last: NaiveDateTime,
    pub size: usize,
}

/// A cluster collapsed to one directed punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPunch {
    pub cluster: Cluster,
    pub direction: Direction,
    pub rule: ClassifyRule,
}

impl ResolvedPunch {
    /// The representative timestamp: earliest scan for an arrival, latest
    /// scan for a departure.
    #[must_use]
    pub const fn timestamp(&self) -> NaiveDateTime {
        match self.direction {
            Direction::CheckIn => self.cluster.first,
            Direction::CheckOut => self.cluster.last,
        }
    }
}

/// Partition one employee's timestamps into bursts.
///
/// Timestamps must be sorted ascending. A timestamp joins the current
/// cluster when it is within `window_minutes` of the cluster's latest
/// member.
pub fn cluster_bursts(timestamps: &[NaiveDateTime], window_minutes: i64) -> Vec<Cluster> {
    let window = Duration::minutes(window_minutes);
    let mut clusters: Vec<Cluster> = Vec::new();

    for &timestamp in timestamps {
        match clusters.last_mut() {
            Some(cluster) if timestamp - cluster.last <= window => {
                cluster.last = timestamp;
                cluster.size += 1;
            }
            _ => clusters.push(Cluster {
                first: timestamp,
                last: timestamp,
                size: 1,
            }),
        }
    }

    clusters
}

/// Resolve a direction for each cluster and pick its representative.
pub fn resolve_clusters(clusters: &[Cluster], config: &ReconcileConfig) -> Vec<ResolvedPunch> {
    let mut state = ClassifierState::new();
    let mut resolved = Vec::with_capacity(clusters.len());

    for &cluster in clusters {
        let (direction, rule) = state.classify(cluster.first, config);
        let punch = ResolvedPunch {
            cluster,
            direction,
            rule,
        };
        state = ClassifierState::after(direction, punch.timestamp());
        resolved.push(punch);
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .expect("valid test date")
            .and_hms_opt(hour, minute, 0)
            .expect("valid test time")
    }

    #[test]
    fn separate_punches_stay_separate() {
        let clusters = cluster_bursts(&[ts(1, 9, 0), ts(1, 17, 0)], 5);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].size, 1);
        assert_eq!(clusters[1].size, 1);
    }

    #[test]
    fn burst_collapses_to_one_cluster() {
        let clusters = cluster_bursts(&[ts(1, 8, 59), ts(1, 9, 0), ts(1, 9, 3)], 5);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].first, ts(1, 8, 59));
        assert_eq!(clusters[0].last, ts(1, 9, 3));
        assert_eq!(clusters[0].size, 3);
    }

    #[test]
    fn chain_rule_spans_beyond_one_window() {
        // Adjacent gaps are 4m each; the ends are 8m apart, past the window.
        let clusters = cluster_bursts(&[ts(1, 9, 0), ts(1, 9, 4), ts(1, 9, 8)], 5);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].size, 3);
    }

    #[test]
    fn gap_exactly_at_window_merges() {
        let clusters = cluster_bursts(&[ts(1, 9, 0), ts(1, 9, 5)], 5);
        assert_eq!(clusters.len(), 1);
    }

    #[test]
    fn gap_just_past_window_splits() {
        let clusters = cluster_bursts(&[ts(1, 9, 0), ts(1, 9, 6)], 5);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn any_burst_within_window_yields_one_representative() {
        for k in 1..=6 {
            let timestamps: Vec<NaiveDateTime> = (0..k).map(|i| ts(1, 9, i)).collect();
            let clusters = cluster_bursts(&timestamps, 5);
            assert_eq!(clusters.len(), 1, "burst of {k} should collapse to 1");
            let resolved = resolve_clusters(&clusters, &ReconcileConfig::default());
            assert_eq!(resolved.len(), 1);
        }
    }

    #[test]
    fn empty_input_yields_no_clusters() {
        assert!(cluster_bursts(&[], 5).is_empty());
    }

    #[test]
    fn arrival_keeps_earliest_scan() {
        let clusters = cluster_bursts(&[ts(1, 8, 59), ts(1, 9, 0), ts(1, 9, 3)], 5);
        let resolved = resolve_clusters(&clusters, &ReconcileConfig::default());
        assert_eq!(resolved[0].direction, Direction::CheckIn);
        assert_eq!(resolved[0].timestamp(), ts(1, 8, 59));
    }

    #[test]
    fn departure_keeps_latest_scan() {
        let timestamps = [ts(1, 9, 0), ts(1, 17, 0), ts(1, 17, 2)];
        let clusters = cluster_bursts(&timestamps, 5);
        let resolved = resolve_clusters(&clusters, &ReconcileConfig::default());
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[1].direction, Direction::CheckOut);
        assert_eq!(resolved[1].timestamp(), ts(1, 17, 2));
    }

    #[test]
    fn burst_straddling_night_cutoff_is_decided_on_first_member() {
        // First member is 05:58 (night), so the whole burst is a departure
        // even though its second member falls past the cutoff.
        let clusters = cluster_bursts(&[ts(2, 5, 58), ts(2, 6, 1)], 5);
        assert_eq!(clusters.len(), 1);
        let resolved = resolve_clusters(&clusters, &ReconcileConfig::default());
        assert_eq!(resolved[0].direction, Direction::CheckOut);
        assert_eq!(resolved[0].rule, ClassifyRule::NightCutoff);
        assert_eq!(resolved[0].timestamp(), ts(2, 6, 1));
    }

    #[test]
    fn state_advances_on_the_kept_representative() {
        // Departure burst 17:00/17:02 keeps 17:02. The 19:01 punch is then
        // 1h59m later, under the break threshold, so it alternates rather
        // than firing the break rule (which measuring from 17:00 would).
        let timestamps = [ts(1, 9, 0), ts(1, 17, 0), ts(1, 17, 2), ts(1, 19, 1)];
        let clusters = cluster_bursts(&timestamps, 5);
        let resolved = resolve_clusters(&clusters, &ReconcileConfig::default());
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[2].direction, Direction::CheckIn);
        assert_eq!(resolved[2].rule, ClassifyRule::Alternation);
    }
}
