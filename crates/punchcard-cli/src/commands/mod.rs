//! CLI subcommand implementations.

pub mod marks;
pub mod reconcile;
pub mod thresholds;
