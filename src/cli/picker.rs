//! Interactive dataset picker.
//!
//! Used when neither `--data` nor `TAXDASH_DATA` names a dataset. Every `*.json`
//! file under the working directory is parsed with the dataset loader; only
//! files that are actual dashboard datasets are offered, each listed with its
//! declared series and row counts so the user can tell them apart.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::domain::Indicator;
use crate::error::AppError;
use crate::io::ingest::parse_dataset;

/// Directory recursion depth when scanning for datasets.
const SEARCH_DEPTH: usize = 4;

/// Directories never scanned (build output, VCS, our own debug bundles).
const SKIP_DIRS: [&str; 4] = [".git", "target", "node_modules", "debug"];

/// A JSON file that parsed as a dashboard dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetCandidate {
    pub path: PathBuf,
    pub series: Vec<Indicator>,
    pub currency: Option<String>,
    pub rows_read: usize,
    pub values_reported: usize,
}

impl DatasetCandidate {
    /// One-line menu entry: `data/taxes.json  [PIT, VAT, CIT] 11 rows, 24 values, VND`.
    pub fn describe(&self) -> String {
        let series: Vec<&str> = self.series.iter().map(Indicator::as_str).collect();
        let mut line = format!(
            "{}  [{}] {} rows, {} values",
            display_path(&self.path),
            series.join(", "),
            self.rows_read,
            self.values_reported
        );
        if let Some(currency) = &self.currency {
            line.push_str(&format!(", {currency}"));
        }
        line
    }
}

/// Parse `path` as a dataset. Fails for unreadable files and non-dataset JSON.
pub fn inspect_dataset(path: &Path) -> Result<DatasetCandidate, AppError> {
    if !path.is_file() {
        return Err(AppError::new(2, format!("Not a dataset file: {}", path.display())));
    }
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", path.display())))?;
    let dataset = parse_dataset(&text).map_err(|e| {
        AppError::new(2, format!("{} is not a dashboard dataset: {e}", path.display()))
    })?;

    Ok(DatasetCandidate {
        path: path.to_path_buf(),
        values_reported: dataset.values_reported(),
        series: dataset.meta.series,
        currency: dataset.meta.currency,
        rows_read: dataset.rows_read,
    })
}

/// Datasets under `root`, sorted by path. Non-dataset JSON is skipped.
pub fn discover_datasets(root: &Path) -> Vec<DatasetCandidate> {
    let mut found: Vec<DatasetCandidate> = json_files(root)
        .into_iter()
        .filter_map(|path| match inspect_dataset(&path) {
            Ok(candidate) => Some(candidate),
            Err(err) => {
                log::debug!("picker skipped {}: {err}", path.display());
                None
            }
        })
        .collect();
    found.sort_by_key(|c| display_path(&c.path));
    found
}

/// Ask the user to choose a dataset from the working directory.
///
/// Accepts a menu number or a path; `q` cancels.
pub fn prompt_for_dataset_path() -> Result<PathBuf, AppError> {
    let candidates = discover_datasets(Path::new("."));
    if candidates.is_empty() {
        return Err(AppError::new(
            2,
            "No dataset JSON found. Provide one with `taxdash -d <data.json>` or set TAXDASH_DATA.",
        ));
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();
    choose(&candidates, &mut input, &mut output).map(|c| c.path)
}

/// Menu loop over arbitrary reader/writer, so it can be driven from tests.
fn choose<R: BufRead, W: Write>(
    candidates: &[DatasetCandidate],
    input: &mut R,
    output: &mut W,
) -> Result<DatasetCandidate, AppError> {
    let io_err = |e: io::Error| AppError::new(2, format!("Picker I/O failed: {e}"));

    writeln!(output, "Found {} dataset(s):", candidates.len()).map_err(io_err)?;
    for (idx, candidate) in candidates.iter().enumerate() {
        writeln!(output, "{:>3}) {}", idx + 1, candidate.describe()).map_err(io_err)?;
    }

    loop {
        write!(output, "Dataset number (1-{}), path, or q: ", candidates.len()).map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(AppError::new(2, "No selection made. Pass a dataset with `-d`."));
        }
        let answer = line.trim();

        if answer.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }
        if answer.is_empty() {
            continue;
        }

        let picked = match answer.parse::<usize>() {
            Ok(n) => candidates
                .get(n.wrapping_sub(1))
                .cloned()
                .ok_or_else(|| AppError::new(2, format!("No dataset numbered {n}."))),
            Err(_) => inspect_dataset(Path::new(answer)),
        };

        match picked {
            Ok(candidate) => return Ok(candidate),
            Err(err) => writeln!(output, "{err}").map_err(io_err)?,
        }
    }
}

/// All `*.json` files under `root` up to `SEARCH_DEPTH` levels deep.
fn json_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut pending = vec![(root.to_path_buf(), 0usize)];

    while let Some((dir, depth)) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(kind) = entry.file_type() else {
                continue;
            };
            if kind.is_dir() {
                let skipped = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| SKIP_DIRS.contains(&n));
                if !skipped && depth < SEARCH_DEPTH {
                    pending.push((path, depth + 1));
                }
            } else if kind.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            {
                out.push(path);
            }
        }
    }
    out
}

fn display_path(path: &Path) -> String {
    path.strip_prefix("./").unwrap_or(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"{
        "meta": { "series": ["VAT", "CIT"], "currency": "VND" },
        "data": [
            { "year": 2025, "quarter": "Q1", "VAT": 10, "CIT": null },
            { "year": 2025, "quarter": "Q2", "VAT": 12, "CIT": 5 }
        ]
    }"#;

    fn scratch_dir(tag: &str) -> PathBuf {
        let root = std::env::temp_dir()
            .join(format!("taxdash-picker-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::create_dir_all(root.join("target")).unwrap();
        root
    }

    #[test]
    fn only_dashboard_datasets_are_offered() {
        let root = scratch_dir("discover");
        fs::write(root.join("nested/taxes.json"), DATASET).unwrap();
        fs::write(root.join("package.json"), r#"{ "name": "web" }"#).unwrap();
        fs::write(root.join("broken.json"), "{ not json").unwrap();
        fs::write(root.join("target/build.json"), DATASET).unwrap();

        let found = discover_datasets(&root);
        assert_eq!(found.len(), 1);
        let c = &found[0];
        assert!(c.path.ends_with("nested/taxes.json"));
        assert_eq!(c.series, vec![Indicator::new("VAT"), Indicator::new("CIT")]);
        assert_eq!(c.rows_read, 2);
        assert_eq!(c.values_reported, 3);
        assert!(c.describe().ends_with("[VAT, CIT] 2 rows, 3 values, VND"));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn menu_retries_until_a_valid_choice() {
        let root = scratch_dir("menu");
        let path = root.join("taxes.json");
        fs::write(&path, DATASET).unwrap();
        fs::write(root.join("other.json"), "[1, 2]").unwrap();
        let candidates = vec![inspect_dataset(&path).unwrap()];

        let answers = format!("7\n{}\n\n1\n", root.join("other.json").display());
        let mut input = answers.as_bytes();
        let mut output = Vec::new();
        let picked = choose(&candidates, &mut input, &mut output).unwrap();
        assert_eq!(picked.path, path);

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("No dataset numbered 7."));
        assert!(shown.contains("is not a dashboard dataset"));

        let mut input = "q\n".as_bytes();
        let err = choose(&candidates, &mut input, &mut Vec::new()).unwrap_err();
        assert_eq!(err.message(), "Canceled.");

        let _ = fs::remove_dir_all(&root);
    }
}
