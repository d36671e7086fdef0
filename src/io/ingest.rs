//! JSON ingest and validation.
//!
//! This module turns the dashboard JSON document into `DataPoint` rows that are
//! safe to hand to the store.
//!
//! Design goals:
//! - **Strict document schema** (`data` must be an array; clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows/cells, but report what happened)
//! - **Absent is not zero**: `null` becomes `value: None`, `0` stays `Some(0.0)`
//! - **Separation of concerns**: no comparison logic here
//!
//! Expected shape:
//!
//! ```json
//! { "meta": { "series": ["PIT", "VAT", "CIT"], "currency": "VND" },
//!   "data": [ { "year": 2025, "quarter": "Q1", "PIT": 1200, "VAT": null, "CIT": 300 } ] }
//! ```

use std::fs;
use std::io::{self, Read};
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{
    DataPoint, DataSource, DatasetMeta, Indicator, MAX_YEAR, MIN_YEAR, Quarter,
};
use crate::error::AppError;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A row-level (or cell-level) problem encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 0-based position in the `data` array.
    pub index: usize,
    /// Offending field, when the problem is a single cell.
    pub field: Option<String>,
    pub message: String,
}

/// Ingest output: metadata + rows + what was rejected.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub meta: DatasetMeta,
    /// One row per (data row, declared series); `value` may be `None`.
    pub rows: Vec<DataPoint>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl LoadedDataset {
    /// Number of rows carrying an actual value.
    pub fn values_reported(&self) -> usize {
        self.rows.iter().filter(|r| r.value.is_some()).count()
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    meta: Option<RawMeta>,
    data: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMeta {
    #[serde(default)]
    series: Option<Vec<String>>,
    #[serde(default)]
    currency: Option<String>,
}

/// Read and validate the dataset from `source`.
pub fn load_dataset(source: &DataSource) -> Result<LoadedDataset, AppError> {
    let text = read_source(source)?;
    let dataset = parse_dataset(&text)?;

    log::info!(
        "loaded {} rows ({} reported values) from {source}",
        dataset.rows_read,
        dataset.values_reported()
    );
    for err in &dataset.row_errors {
        match &err.field {
            Some(field) => log::warn!("row {} `{field}`: {}", err.index, err.message),
            None => log::warn!("row {}: {}", err.index, err.message),
        }
    }

    Ok(dataset)
}

fn read_source(source: &DataSource) -> Result<String, AppError> {
    match source {
        DataSource::Path(path) => fs::read_to_string(path)
            .map_err(|e| AppError::new(2, format!("Failed to open data file '{}': {e}", path.display()))),
        DataSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .lock()
                .read_to_string(&mut buffer)
                .map_err(|e| AppError::new(2, format!("Failed to read stdin: {e}")))?;
            if buffer.trim().is_empty() {
                return Err(AppError::new(
                    2,
                    "No input received. Provide a file or pipe data to stdin.",
                ));
            }
            Ok(buffer)
        }
        DataSource::Url(url) => fetch_url(url),
    }
}

fn fetch_url(url: &str) -> Result<String, AppError> {
    let client = Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))?;
    let response = client
        .get(url)
        .send()
        .map_err(|e| AppError::new(2, format!("Failed to fetch '{url}': {e}")))?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::new(2, format!("Fetching '{url}' returned HTTP {status}.")));
    }
    response
        .text()
        .map_err(|e| AppError::new(2, format!("Failed to read response from '{url}': {e}")))
}

/// Parse and validate a dataset document.
pub fn parse_dataset(text: &str) -> Result<LoadedDataset, AppError> {
    let doc: RawDocument =
        serde_json::from_str(text).map_err(|e| AppError::new(2, format!("Invalid dataset JSON: {e}")))?;

    let raw_meta = doc.meta.unwrap_or_default();
    let mut meta = DatasetMeta::default();
    if let Some(series) = raw_meta.series {
        let mut keys: Vec<Indicator> = Vec::with_capacity(series.len());
        for key in series {
            let key = key.trim();
            if key.is_empty() || matches!(key, "year" | "quarter") {
                return Err(AppError::new(2, format!("Invalid series key in meta.series: `{key}`")));
            }
            let indicator = Indicator::new(key);
            if !keys.contains(&indicator) {
                keys.push(indicator);
            }
        }
        meta.series = keys;
    }
    meta.currency = raw_meta.currency.filter(|c| !c.trim().is_empty());

    let data = match doc.data {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(AppError::new(2, "Dataset field `data` must be an array.")),
        None => return Err(AppError::new(2, "Dataset is missing the `data` array.")),
    };

    let mut rows = Vec::with_capacity(data.len() * meta.series.len());
    let mut row_errors = Vec::new();

    for (index, item) in data.iter().enumerate() {
        let Some(obj) = item.as_object() else {
            row_errors.push(RowError {
                index,
                field: None,
                message: "row is not an object".to_string(),
            });
            continue;
        };

        let year = match obj.get("year").map(parse_year) {
            Some(Ok(y)) => y,
            Some(Err(message)) => {
                row_errors.push(RowError { index, field: Some("year".to_string()), message });
                continue;
            }
            None => {
                row_errors.push(RowError {
                    index,
                    field: Some("year".to_string()),
                    message: "missing required field".to_string(),
                });
                continue;
            }
        };

        let quarter = match obj.get("quarter").map(parse_quarter) {
            Some(Ok(q)) => q,
            Some(Err(message)) => {
                row_errors.push(RowError { index, field: Some("quarter".to_string()), message });
                continue;
            }
            None => {
                row_errors.push(RowError {
                    index,
                    field: Some("quarter".to_string()),
                    message: "missing required field".to_string(),
                });
                continue;
            }
        };

        for indicator in &meta.series {
            match parse_value(obj.get(indicator.as_str())) {
                Ok(value) => rows.push(DataPoint {
                    year,
                    quarter,
                    indicator: indicator.clone(),
                    value,
                }),
                Err(message) => row_errors.push(RowError {
                    index,
                    field: Some(indicator.to_string()),
                    message,
                }),
            }
        }
    }

    Ok(LoadedDataset {
        meta,
        rows,
        row_errors,
        rows_read: data.len(),
    })
}

fn parse_year(v: &Value) -> Result<i32, String> {
    let n = match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    let year = n
        .and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| format!("invalid year {v}"))?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(format!("year {year} outside {MIN_YEAR}..={MAX_YEAR}"));
    }
    Ok(year)
}

fn parse_quarter(v: &Value) -> Result<Quarter, String> {
    let q = match v {
        Value::String(s) => Quarter::parse(s),
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .and_then(Quarter::from_index),
        _ => None,
    };
    q.ok_or_else(|| format!("invalid quarter {v} (expected Q1..Q4)"))
}

fn parse_value(v: Option<&Value>) -> Result<Option<f64>, String> {
    let parsed = match v {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(f) if f.is_finite() => Ok(Some(f)),
        _ => Err(format!(
            "unparseable value {}",
            v.map(Value::to_string).unwrap_or_default()
        )),
    }
}
