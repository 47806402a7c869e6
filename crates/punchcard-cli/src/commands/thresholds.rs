//! Thresholds command for showing the effective configuration.

use std::io::Write;

use anyhow::Result;
use punchcard_core::ReconcileConfig;

/// Runs the thresholds command.
pub fn run<W: Write>(writer: &mut W, config: &ReconcileConfig, json: bool) -> Result<()> {
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(config)?)?;
        return Ok(());
    }

    writeln!(writer, "RECONCILIATION THRESHOLDS")?;
    writeln!(writer, "─────────────────────────")?;
    writeln!(
        writer,
        "  {:<24}  {}",
        "dedup_window_minutes", config.dedup_window_minutes
    )?;
    writeln!(
        writer,
        "  {:<24}  {}",
        "night_cutoff_hour", config.night_cutoff_hour
    )?;
    writeln!(writer, "  {:<24}  {:.1}", "max_gap_hours", config.max_gap_hours)?;
    writeln!(
        writer,
        "  {:<24}  {:.1}",
        "break_threshold_hours", config.break_threshold_hours
    )?;
    writeln!(
        writer,
        "  {:<24}  {:.1}",
        "max_shift_hours", config.max_shift_hours
    )?;
    writeln!(
        writer,
        "  {:<24}  {:.1}",
        "excessive_duration_hours", config.excessive_duration_hours
    )?;
    writeln!(
        writer,
        "  {:<24}  {:.1}",
        "standard_shift_hours", config.standard_shift_hours
    )?;

    Ok(())
}
