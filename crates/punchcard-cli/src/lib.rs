//! Attendance reconciliation CLI library.
//!
//! This crate provides the CLI interface for the punch reconciliation engine.

mod cli;
pub mod commands;
pub mod config;
pub mod input;

pub use cli::{Cli, Commands};
