//! Reconcile command for producing the full attendance report.
//!
//! This module implements `punchcard reconcile` with human-readable and
//! JSON output formats.

use std::io::Write;

use anyhow::Result;
use punchcard_core::{
    PunchEvent, ReconcileConfig, ReconcileOutput, TraceObserver, reconcile_with_observer,
};

/// Runs the reconcile command.
pub fn run<W: Write>(
    writer: &mut W,
    events: &[PunchEvent],
    config: &ReconcileConfig,
    json: bool,
) -> Result<()> {
    let output = reconcile_with_observer(events, config, &TraceObserver);
    tracing::debug!(
        sessions = output.sessions.len(),
        unpaired = output.unpaired.len(),
        "reconciliation complete"
    );

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        write!(writer, "{}", format_output(&output))?;
    }

    Ok(())
}

/// Formats the human-readable attendance report.
pub fn format_output(output: &ReconcileOutput) -> String {
    use std::fmt::Write as _;

    let mut text = String::new();

    if output.summaries.is_empty() {
        writeln!(text, "No punches to reconcile.").unwrap();
        return text;
    }

    writeln!(text, "SESSIONS").unwrap();
    writeln!(text, "────────").unwrap();
    if output.sessions.is_empty() {
        writeln!(text, "(none)").unwrap();
    }
    let mut current_employee = None;
    for session in &output.sessions {
        if current_employee != Some(session.employee_id) {
            if current_employee.is_some() {
                writeln!(text).unwrap();
            }
            writeln!(text, "Employee {}", session.employee_id).unwrap();
            current_employee = Some(session.employee_id);
        }
        let flag = session
            .flag
            .map_or_else(String::new, |flag| format!("  [{flag}]"));
        writeln!(
            text,
            "  {} - {}  {:>6.2}h  {:>5.2}h overtime{flag}",
            session.check_in, session.check_out, session.hours_worked, session.overtime_hours,
        )
        .unwrap();
    }

    if !output.unpaired.is_empty() {
        writeln!(text).unwrap();
        writeln!(text, "UNPAIRED PUNCHES").unwrap();
        writeln!(text, "────────────────").unwrap();
        for event in &output.unpaired {
            writeln!(
                text,
                "  Employee {}  {}  {}",
                event.employee_id, event.timestamp, event.direction
            )
            .unwrap();
        }
    }

    writeln!(text).unwrap();
    writeln!(text, "SUMMARY").unwrap();
    writeln!(text, "───────").unwrap();
    for summary in &output.summaries {
        writeln!(
            text,
            "  Employee {}  total {:.2}h  overtime {:.2}h  sessions {}",
            summary.employee_id, summary.total_hours, summary.total_overtime, summary.session_count
        )
        .unwrap();
    }

    text
}
