//! Machine-readable export of a report.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::verdict::{ComparisonVerdict, Tally};
use crate::reporting::console::Labels;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Local>,
    pub primary: &'a str,
    pub secondary: &'a str,
    pub verdicts: &'a [ComparisonVerdict],
    pub tally: Tally,
}

impl<'a> JsonReport<'a> {
    pub fn new(verdicts: &'a [ComparisonVerdict], labels: &'a Labels) -> Self {
        Self {
            generated_at: Local::now(),
            primary: &labels.primary,
            secondary: &labels.secondary,
            verdicts,
            tally: Tally::from_verdicts(verdicts),
        }
    }
}

/// Writes the verdicts as pretty-printed JSON to `output_path`.
pub fn write_json_report(
    verdicts: &[ComparisonVerdict],
    labels: &Labels,
    output_path: &Path,
) -> Result<()> {
    let report = JsonReport::new(verdicts, labels);
    let body = serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;
    fs::write(output_path, body)
        .with_context(|| format!("Failed to write JSON report: {}", output_path.display()))
}
