//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the analytics layer
//! - exported to JSON/CSV
//! - rendered by any of the front-ends (report, ASCII plot, TUI)

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Series keys assumed when the dataset does not declare `meta.series`.
pub const DEFAULT_SERIES: [&str; 3] = ["PIT", "VAT", "CIT"];

/// Order in which indicator tabs are presented.
pub const TAB_ORDER: [&str; 3] = ["VAT", "PIT", "CIT"];

/// Indicators reported on an annual cadence unless overridden.
pub const DEFAULT_ANNUAL: [&str; 1] = ["CIT"];

/// Maximum number of years shown on the annual axis.
pub const MAX_AXIS_YEARS: usize = 4;

/// Calendar years accepted from datasets and `--year`.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Calendar quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// Chronological order (Q1 → Q4).
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Latest-first order (Q4 → Q1).
    pub const LATEST_FIRST: [Quarter; 4] = [Quarter::Q4, Quarter::Q3, Quarter::Q2, Quarter::Q1];

    /// 1-based quarter index (Q1 = 1 … Q4 = 4).
    pub fn index(self) -> u8 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 2,
            Quarter::Q3 => 3,
            Quarter::Q4 => 4,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Quarter::Q1),
            2 => Some(Quarter::Q2),
            3 => Some(Quarter::Q3),
            4 => Some(Quarter::Q4),
            _ => None,
        }
    }

    /// Share of the calendar year covered through the end of this quarter.
    pub fn progress_fraction(self) -> f64 {
        f64::from(self.index()) / 4.0
    }

    /// `true` for the closing quarter of the year.
    pub fn is_final(self) -> bool {
        self == Quarter::Q4
    }

    pub fn label(self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }

    /// Parse `Q1`..`Q4` (case-insensitive) or a bare `1`..`4`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let digits = s
            .strip_prefix('Q')
            .or_else(|| s.strip_prefix('q'))
            .unwrap_or(s);
        digits.parse::<u8>().ok().and_then(Quarter::from_index)
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A tracked tax series, identified by its dataset key (e.g. `PIT`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Indicator(String);

impl Indicator {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Indicator {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Reporting cadence of an indicator; selects the comparison strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    /// Compared quarter-over-quarter, drawn as one line per year.
    Quarterly,
    /// Compared year-over-year with provisional normalization, drawn as bars.
    Annual,
}

/// Traffic-light severity of a period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diagnosis {
    /// Change below 10%.
    Green,
    /// Change in `[10%, 20%)`, or not enough signal to compare.
    Yellow,
    /// Change of 20% or more.
    Red,
}

impl Diagnosis {
    pub fn label(self) -> &'static str {
        match self {
            Diagnosis::Green => "green",
            Diagnosis::Yellow => "yellow",
            Diagnosis::Red => "red",
        }
    }

    /// Terminal glyph used in tables and tab headers.
    pub fn symbol(self) -> &'static str {
        match self {
            Diagnosis::Green => "●",
            Diagnosis::Yellow => "◐",
            Diagnosis::Red => "○",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One raw observation as handed over by the loader.
///
/// `value == None` means "not yet reported", which is distinct from `Some(0.0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub year: i32,
    pub quarter: Quarter,
    pub indicator: Indicator,
    pub value: Option<f64>,
}

/// A `(year, quarter)` position on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeriodRef {
    pub year: i32,
    pub quarter: Quarter,
}

impl fmt::Display for PeriodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.year, self.quarter)
    }
}

/// Two-year display window for quarterly indicators: `current` and the year before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearWindow {
    pub current: i32,
}

impl YearWindow {
    pub fn new(current: i32) -> Self {
        Self { current }
    }

    /// Year before `current`; pinned at `i32::MIN`.
    pub fn previous(self) -> i32 {
        self.current.saturating_sub(1)
    }

    /// Window years in ascending order. Collapses to one year at `i32::MIN`.
    pub fn years(self) -> Vec<i32> {
        match self.current.checked_sub(1) {
            Some(previous) => vec![previous, self.current],
            None => vec![self.current],
        }
    }

    /// All `(year, quarter)` slots of the window in strict chronological order.
    pub fn timeline(self) -> impl Iterator<Item = PeriodRef> {
        self.years().into_iter().flat_map(|year| {
            Quarter::ALL
                .into_iter()
                .map(move |quarter| PeriodRef { year, quarter })
        })
    }
}

/// Outcome of comparing an indicator's latest period with the one before it.
///
/// Invariants:
/// - `delta` is `Some` iff both `prior_period` and `current_period` are `Some`
/// - `relative_change_pct` is `Some` iff `delta` is `Some` and the prior is non-zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub cadence: Cadence,
    /// Prior value (scaled for annual comparisons when normalization applied).
    pub prior_period: Option<f64>,
    /// Current value (scaled for annual comparisons when normalization applied).
    pub current_period: Option<f64>,
    pub delta: Option<f64>,
    /// Signed change relative to the prior magnitude, in percent.
    pub relative_change_pct: Option<f64>,
    pub diagnosis: Diagnosis,
    /// Source period of `prior_period`.
    pub prior_at: Option<PeriodRef>,
    /// Source period of `current_period`.
    pub current_at: Option<PeriodRef>,
    /// Raw quarter of the current annual figure when it is provisional.
    pub current_provisional_quarter: Option<Quarter>,
}

impl ComparisonResult {
    /// A result with no data on either side.
    pub fn unavailable(cadence: Cadence) -> Self {
        Self {
            cadence,
            prior_period: None,
            current_period: None,
            delta: None,
            relative_change_pct: None,
            diagnosis: Diagnosis::Yellow,
            prior_at: None,
            current_at: None,
            current_provisional_quarter: None,
        }
    }
}

/// Dataset-level metadata from the JSON `meta` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMeta {
    /// Declared series keys, in declaration order.
    pub series: Vec<Indicator>,
    pub currency: Option<String>,
}

impl Default for DatasetMeta {
    fn default() -> Self {
        Self {
            series: DEFAULT_SERIES.iter().map(|k| Indicator::new(*k)).collect(),
            currency: None,
        }
    }
}

/// Where the dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Stdin,
    Url(String),
}

impl DataSource {
    /// Interpret a user-supplied location (`-`, `http(s)://…`, or a path).
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == "-" {
            DataSource::Stdin
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(p) => write!(f, "{}", p.display()),
            DataSource::Stdin => f.write_str("<stdin>"),
            DataSource::Url(u) => f.write_str(u),
        }
    }
}

/// A dashboard run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags, the environment, and defaults.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub source: DataSource,
    /// Indicators compared year-over-year; everything else is quarterly.
    pub annual: Vec<Indicator>,
    /// Current year of the quarterly window. `None` means "latest year with data".
    pub window_year: Option<i32>,
}

impl DashboardConfig {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            annual: DEFAULT_ANNUAL.iter().map(|k| Indicator::new(*k)).collect(),
            window_year: None,
        }
    }

    /// Annual keys match case-insensitively (`--annual cit`).
    pub fn cadence_of(&self, indicator: &Indicator) -> Cadence {
        if self
            .annual
            .iter()
            .any(|a| a.as_str().eq_ignore_ascii_case(indicator.as_str()))
        {
            Cadence::Annual
        } else {
            Cadence::Quarterly
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_parse_accepts_common_forms() {
        assert_eq!(Quarter::parse("Q3"), Some(Quarter::Q3));
        assert_eq!(Quarter::parse("q1"), Some(Quarter::Q1));
        assert_eq!(Quarter::parse(" 4 "), Some(Quarter::Q4));
        assert_eq!(Quarter::parse("Q5"), None);
        assert_eq!(Quarter::parse("first"), None);
    }

    #[test]
    fn window_timeline_is_chronological() {
        let slots: Vec<PeriodRef> = YearWindow::new(2025).timeline().collect();
        assert_eq!(slots.len(), 8);
        assert_eq!(slots[0], PeriodRef { year: 2024, quarter: Quarter::Q1 });
        assert_eq!(slots[7], PeriodRef { year: 2025, quarter: Quarter::Q4 });
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn window_at_earliest_year_does_not_wrap() {
        let w = YearWindow::new(i32::MIN);
        assert_eq!(w.previous(), i32::MIN);
        assert_eq!(w.years(), vec![i32::MIN]);
        assert_eq!(w.timeline().count(), 4);
    }

    #[test]
    fn data_source_parse() {
        assert_eq!(DataSource::parse("-"), DataSource::Stdin);
        assert_eq!(
            DataSource::parse("https://example.org/data.json"),
            DataSource::Url("https://example.org/data.json".to_string())
        );
        assert_eq!(
            DataSource::parse("data/taxes.json"),
            DataSource::Path(PathBuf::from("data/taxes.json"))
        );
    }

    #[test]
    fn cadence_follows_annual_list() {
        let config = DashboardConfig::new(DataSource::Stdin);
        assert_eq!(config.cadence_of(&Indicator::new("CIT")), Cadence::Annual);
        assert_eq!(config.cadence_of(&Indicator::new("VAT")), Cadence::Quarterly);
    }
}
