//! Core domain logic for attendance reconciliation.
//!
//! This crate contains the fundamental types and logic for:
//! - Deduplication: collapsing bursts of near-duplicate punches
//! - Classification: deciding whether a punch is a check-in or check-out
//! - Pairing: matching opposite punches into work sessions
//! - Aggregation: per-employee hour, overtime, and anomaly rollups

mod classify;
mod config;
mod dedup;
mod engine;
mod event;
mod observer;
mod pair;
mod session;
pub mod timefmt;

pub use classify::{ClassifierState, ClassifyRule};
pub use config::ReconcileConfig;
pub use dedup::{Cluster, ResolvedPunch, cluster_bursts, resolve_clusters};
pub use engine::{ReconcileOutput, reconcile, reconcile_with_observer};
pub use event::{Direction, InputError, PunchEvent, RawPunch};
pub use observer::{NoopObserver, ReconcileObserver, TraceObserver};
pub use pair::{ClassifiedEvent, MatchedPair, PairPass, pair_backward, pair_events, pair_forward};
pub use session::{AnomalyKind, EmployeeSummary, Session, UnpairedEvent, round2, summarize};
