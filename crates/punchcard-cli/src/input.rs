//! Punch log input.
//!
//! Punch logs arrive as JSONL, one `{"employee_id": ..., "timestamp": ...}`
//! object per line, either on stdin or from a file. Blank lines are ignored.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use punchcard_core::PunchEvent;

/// How to treat lines that fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnInvalid {
    /// Abort on the first malformed line.
    Fail,
    /// Log malformed lines and drop them.
    Skip,
}

/// Reads punches from `input`, or stdin when no path is given.
pub fn read_punches(input: Option<&Path>, on_invalid: OnInvalid) -> Result<Vec<PunchEvent>> {
    match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            parse_punches(BufReader::new(file), on_invalid)
        }
        None => parse_punches(io::stdin().lock(), on_invalid),
    }
}

/// Parses one punch per non-blank line.
pub fn parse_punches<R: BufRead>(reader: R, on_invalid: OnInvalid) -> Result<Vec<PunchEvent>> {
    let mut punches = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("failed to read input line")?;
        if line.trim().is_empty() {
            continue;
        }
        match PunchEvent::from_json_line(&line) {
            Ok(punch) => punches.push(punch),
            Err(error) => match on_invalid {
                OnInvalid::Fail => {
                    return Err(error)
                        .with_context(|| format!("invalid punch on line {}", index + 1));
                }
                OnInvalid::Skip => {
                    tracing::warn!(line = index + 1, error = %error, "skipping invalid punch");
                }
            },
        }
    }
    Ok(punches)
}
