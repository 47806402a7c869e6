//! Marks command for listing deduplicated punches.
//!
//! `punchcard marks` stops the pipeline after deduplication: it shows which
//! punch marks survive burst merging, without classifying or pairing them.
//! Each burst is represented by its earliest punch.

use std::collections::HashMap;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use punchcard_core::timefmt::DATETIME_FORMAT;
use punchcard_core::{PunchEvent, ReconcileConfig, cluster_bursts};
use serde::Serialize;

/// One deduplicated punch mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mark {
    pub employee_id: i64,
    pub datetime: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Serialize)]
struct MarkReport<'a> {
    total: usize,
    marks: &'a [Mark],
}

/// Collects the surviving punch marks, ordered by employee then time.
pub fn collect_marks(events: &[PunchEvent], config: &ReconcileConfig) -> Vec<Mark> {
    let mut grouped: HashMap<i64, Vec<NaiveDateTime>> = HashMap::new();
    for event in events {
        grouped
            .entry(event.employee_id)
            .or_default()
            .push(event.timestamp);
    }
    let mut groups: Vec<(i64, Vec<NaiveDateTime>)> = grouped.into_iter().collect();
    groups.sort_by_key(|(employee_id, _)| *employee_id);

    let mut marks = Vec::new();
    for (employee_id, mut timestamps) in groups {
        timestamps.sort_unstable();
        for cluster in cluster_bursts(&timestamps, config.dedup_window_minutes) {
            marks.push(Mark {
                employee_id,
                datetime: cluster.first.format(DATETIME_FORMAT).to_string(),
                date: cluster.first.format("%Y-%m-%d").to_string(),
                time: cluster.first.format("%H:%M:%S").to_string(),
            });
        }
    }
    marks
}

/// Runs the marks command.
pub fn run<W: Write>(
    writer: &mut W,
    events: &[PunchEvent],
    config: &ReconcileConfig,
    json: bool,
) -> Result<()> {
    let marks = collect_marks(events, config);

    if json {
        let report = MarkReport {
            total: marks.len(),
            marks: &marks,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(writer, "PUNCH MARKS")?;
        writeln!(writer, "───────────")?;
        for mark in &marks {
            writeln!(
                writer,
                "  Employee {}  {}  {}",
                mark.employee_id, mark.date, mark.time
            )?;
        }
        writeln!(writer)?;
        writeln!(writer, "Total: {}", marks.len())?;
    }

    Ok(())
}
