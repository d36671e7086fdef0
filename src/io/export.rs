//! Export comparison records to JSON or CSV.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::analytics::IndicatorSummary;
use crate::app::pipeline::DashboardRun;
use crate::domain::YearWindow;
use crate::error::AppError;

/// Serialized form of a dashboard run.
#[derive(Debug, Serialize)]
pub struct SummaryExport<'a> {
    pub tool: &'static str,
    pub generated_at: DateTime<Local>,
    pub source: String,
    pub currency: Option<&'a str>,
    pub window: Option<YearWindow>,
    pub indicators: &'a [IndicatorSummary],
}

impl<'a> SummaryExport<'a> {
    pub fn from_run(run: &'a DashboardRun) -> Self {
        Self {
            tool: "taxdash",
            generated_at: Local::now(),
            source: run.source.to_string(),
            currency: run.dataset.meta.currency.as_deref(),
            window: run.window,
            indicators: &run.summaries,
        }
    }
}

/// Write the run's comparison records as pretty JSON.
pub fn write_summary_json(path: &Path, run: &DashboardRun) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, &SummaryExport::from_run(run))
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;
    Ok(())
}

/// Render the run's comparison records as a JSON string (for `--json` output).
pub fn summary_json_string(run: &DashboardRun) -> Result<String, AppError> {
    serde_json::to_string_pretty(&SummaryExport::from_run(run))
        .map_err(|e| AppError::new(4, format!("Failed to serialize summary: {e}")))
}

/// Write one CSV row per indicator.
pub fn write_summary_csv(path: &Path, summaries: &[IndicatorSummary]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary CSV '{}': {e}", path.display())))?;
    write_summary_csv_to(file, summaries)
}

/// Column order of the summary CSV.
const CSV_HEADER: [&str; 10] = [
    "indicator",
    "cadence",
    "prior_at",
    "prior",
    "current_at",
    "current",
    "delta",
    "relative_change_pct",
    "diagnosis",
    "provisional_quarter",
];

fn write_summary_csv_to<W: Write>(
    out: W,
    summaries: &[IndicatorSummary],
) -> Result<(), AppError> {
    // Series keys are free-form, so fields go through the csv writer for quoting.
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| AppError::new(2, format!("Failed to write summary CSV header: {e}")))?;

    for s in summaries {
        let c = &s.comparison;
        let cadence = format!("{:?}", c.cadence).to_lowercase();
        writer
            .write_record([
                s.indicator.to_string(),
                cadence,
                c.prior_at.map(|p| p.to_string()).unwrap_or_default(),
                fmt_opt(c.prior_period),
                c.current_at.map(|p| p.to_string()).unwrap_or_default(),
                fmt_opt(c.current_period),
                fmt_opt(c.delta),
                fmt_opt(c.relative_change_pct),
                c.diagnosis.to_string(),
                c.current_provisional_quarter
                    .map(|q| q.label().to_string())
                    .unwrap_or_default(),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write summary CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush summary CSV: {e}")))?;
    Ok(())
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.4}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cadence, ComparisonResult, Diagnosis, Indicator, PeriodRef, Quarter};

    #[test]
    fn csv_rows_leave_absent_cells_empty() {
        let summaries = vec![
            IndicatorSummary {
                indicator: Indicator::new("PIT"),
                comparison: ComparisonResult::unavailable(Cadence::Quarterly),
            },
            IndicatorSummary {
                indicator: Indicator::new("CIT"),
                comparison: ComparisonResult {
                    cadence: Cadence::Annual,
                    prior_period: Some(100.0),
                    current_period: Some(50.0),
                    delta: Some(-50.0),
                    relative_change_pct: Some(-50.0),
                    diagnosis: Diagnosis::Red,
                    prior_at: Some(PeriodRef { year: 2024, quarter: Quarter::Q4 }),
                    current_at: Some(PeriodRef { year: 2025, quarter: Quarter::Q2 }),
                    current_provisional_quarter: Some(Quarter::Q2),
                },
            },
        ];

        let mut buf = Vec::new();
        write_summary_csv_to(&mut buf, &summaries).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "PIT,quarterly,,,,,,,yellow,");
        assert_eq!(
            lines[2],
            "CIT,annual,2024 Q4,100.0000,2025 Q2,50.0000,-50.0000,-50.0000,red,Q2"
        );
    }

    #[test]
    fn csv_quotes_series_keys_with_separators() {
        let summaries = vec![
            IndicatorSummary {
                indicator: Indicator::new("VAT, net"),
                comparison: ComparisonResult::unavailable(Cadence::Quarterly),
            },
            IndicatorSummary {
                indicator: Indicator::new("PIT \"gross\""),
                comparison: ComparisonResult::unavailable(Cadence::Quarterly),
            },
        ];

        let mut buf = Vec::new();
        write_summary_csv_to(&mut buf, &summaries).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "\"VAT, net\",quarterly,,,,,,,yellow,");
        assert_eq!(lines[2], "\"PIT \"\"gross\"\"\",quarterly,,,,,,,yellow,");

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.len() == CSV_HEADER.len()));
        assert_eq!(&records[0][0], "VAT, net");
        assert_eq!(&records[1][0], "PIT \"gross\"");
    }
}
