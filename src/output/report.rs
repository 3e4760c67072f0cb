//! Machine-readable run reports
//!
//! Writes a finished [`RunSummary`] to disk as JSON or CSV, chosen by the
//! file extension.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use crate::models::RunSummary;

/// Report file formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
}

impl ReportFormat {
    /// `.csv` selects CSV, anything else JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ReportFormat::Csv,
            _ => ReportFormat::Json,
        }
    }
}

/// Export a run summary to `path`
pub fn export_summary(summary: &RunSummary, path: &Path) -> Result<()> {
    match ReportFormat::from_path(path) {
        ReportFormat::Json => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create report: {}", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), summary)
                .context("Failed to write JSON report")?;
        }
        ReportFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("Failed to create report: {}", path.display()))?;

            writer.write_record(["test_number", "test_name", "status", "duration_ms", "message"])?;

            for result in &summary.results {
                writer.write_record([
                    result.test_case.number().to_string(),
                    result.test_case.name().to_string(),
                    result.status.to_string(),
                    result.duration_ms.to_string(),
                    result.message.clone().unwrap_or_default(),
                ])?;
            }
            writer.flush()?;
        }
    }

    info!("Exported results to {}", path.display());
    Ok(())
}
