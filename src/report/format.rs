//! Formatted terminal output: numbers, legends, summary tables.
//!
//! We keep formatting code in one place so:
//! - the analytics code stays clean and testable
//! - output changes are localized (the TUI and the plain report share labels)

use crate::analytics::chart::{AnnualBar, YearLine};
use crate::analytics::{IndicatorSummary, Tab};
use crate::app::pipeline::DashboardRun;
use crate::domain::{Cadence, ComparisonResult, Indicator, Quarter};

/// Placeholder for a value that has not been reported.
pub const ABSENT: &str = "—";

/// A legend entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendItem {
    pub label: String,
    /// `true` for the "this year" entry.
    pub is_current: bool,
}

/// Format a number with `.` thousands grouping, `,` decimals, and negatives in
/// parentheses: `-1234.5` → `(1.234,5)`. Non-finite input gives an empty string.
pub fn format_number(n: f64, currency: Option<&str>) -> String {
    if !n.is_finite() {
        return String::new();
    }
    let base = group_thousands(n.abs());
    let suffix = currency
        .filter(|c| !c.trim().is_empty())
        .map(|c| format!(" {}", c.trim()))
        .unwrap_or_default();
    if n < 0.0 {
        format!("({base}{suffix})")
    } else {
        format!("{base}{suffix}")
    }
}

/// Like [`format_number`] but renders `None` as the absent placeholder.
pub fn format_opt(n: Option<f64>, currency: Option<&str>) -> String {
    n.map(|v| format_number(v, currency))
        .unwrap_or_else(|| ABSENT.to_string())
}

fn group_thousands(v: f64) -> String {
    let fixed = format!("{v:.3}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some(parts) => parts,
        None => (fixed.as_str(), ""),
    };
    let frac_part = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*ch);
    }

    if frac_part.is_empty() {
        grouped
    } else {
        format!("{grouped},{frac_part}")
    }
}

/// Absolute delta, rounded magnitude percentage, and a direction arrow.
pub fn format_delta(c: &ComparisonResult) -> String {
    let Some(delta) = c.delta else {
        return ABSENT.to_string();
    };
    let mut out = format_number(delta.abs(), None);
    if let Some(pct) = c.relative_change_pct {
        out.push_str(&format!(" ({:.0}%)", pct.abs().round()));
    }
    if delta > 0.0 {
        out.push_str(" ▲");
    } else if delta < 0.0 {
        out.push_str(" ▼");
    }
    out
}

/// Summary table headers: prior, current, delta, diagnosis.
pub fn table_headers(cadence: Cadence, provisional: Option<Quarter>) -> [String; 4] {
    match cadence {
        Cadence::Quarterly => [
            "Last quarter".to_string(),
            "This quarter".to_string(),
            "Δ".to_string(),
            "Diagnose".to_string(),
        ],
        Cadence::Annual => {
            let suffix = provisional.map(|q| format!(" ({q})")).unwrap_or_default();
            [
                format!("Last year{suffix}"),
                format!("This year{suffix}"),
                "Δ".to_string(),
                "Diagnose".to_string(),
            ]
        }
    }
}

/// The summary row cells matching [`table_headers`].
pub fn table_cells(c: &ComparisonResult) -> [String; 4] {
    [
        format_opt(c.prior_period, None),
        format_opt(c.current_period, None),
        format_delta(c),
        format!("{} {}", c.diagnosis.symbol(), c.diagnosis),
    ]
}

pub fn quarterly_legend(lines: &[YearLine]) -> Vec<LegendItem> {
    lines
        .iter()
        .map(|line| LegendItem {
            label: if line.is_current {
                format!("This year ({})", line.year)
            } else {
                format!("Last year ({})", line.year)
            },
            is_current: line.is_current,
        })
        .collect()
}

pub fn annual_legend(bars: &[AnnualBar]) -> Vec<LegendItem> {
    let Some(latest) = bars.iter().find(|b| b.is_current) else {
        return Vec::new();
    };
    let mut items = vec![LegendItem {
        label: if latest.provisional {
            "This year (Provisional)".to_string()
        } else {
            "This year".to_string()
        },
        is_current: true,
    }];
    if bars.iter().any(|b| !b.is_current) {
        items.push(LegendItem {
            label: if bars.len() > 2 {
                "Last recent years".to_string()
            } else {
                "Last year".to_string()
            },
            is_current: false,
        });
    }
    items
}

/// Value label for a bar; provisional bars name their source quarter.
pub fn bar_label(bar: &AnnualBar) -> String {
    let value = format_number(bar.value, None);
    if bar.provisional {
        format!("{value} (Provisional – {})", bar.quarter)
    } else {
        value
    }
}

/// One-line tab strip: active tab in brackets, disabled tabs in parentheses.
pub fn format_tabs(tabs: &[Tab], active: Option<&Indicator>) -> String {
    tabs.iter()
        .map(|t| {
            let body = format!("{} {}", t.indicator, t.diagnosis.symbol());
            if Some(&t.indicator) == active {
                format!("[{body}]")
            } else if !t.enabled {
                format!("({body})")
            } else {
                format!(" {body} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run header: source, currency, window.
pub fn format_header(run: &DashboardRun) -> String {
    let mut out = String::new();
    out.push_str("=== taxdash - Tax indicator dashboard ===\n");
    out.push_str(&format!("Source: {}\n", run.source));
    if let Some(currency) = &run.dataset.meta.currency {
        out.push_str(&format!("Currency: {currency}\n"));
    }
    match run.window {
        Some(w) => out.push_str(&format!("Quarterly window: {}–{}\n", w.previous(), w.current)),
        None => out.push_str("Quarterly window: -\n"),
    }
    out.push_str(&format!(
        "Rows: {} read | {} values | {} rejected\n",
        run.dataset.rows_read,
        run.store.len(),
        run.dataset.row_errors.len()
    ));
    out
}

/// Focused view of one indicator: legend + summary table.
pub fn format_indicator(run: &DashboardRun, summary: &IndicatorSummary, legend: &[LegendItem]) -> String {
    let c = &summary.comparison;
    let mut out = String::new();
    out.push_str(&format!("{} ({:?})\n", summary.indicator, c.cadence));

    if !legend.is_empty() {
        let labels: Vec<&str> = legend.iter().map(|l| l.label.as_str()).collect();
        out.push_str(&format!("Legend: {}\n", labels.join(" | ")));
    }

    let headers = table_headers(c.cadence, c.current_provisional_quarter);
    let cells = table_cells(c);
    out.push_str(&table_line(&headers));
    out.push_str(&table_line(&std::array::from_fn(|_| "-".repeat(20))));
    out.push_str(&table_line(&cells));

    if let (Some(prior), Some(current)) = (c.prior_at, c.current_at) {
        out.push_str(&format!("Compared: {prior} → {current}\n"));
    }
    if let Some(currency) = &run.dataset.meta.currency {
        out.push_str(&format!("Values in {currency}\n"));
    }
    out
}

/// One row per indicator, in tab order.
pub fn format_overview(run: &DashboardRun) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<10} {:<10} {:>18} {:>18} {:>24} {:<10}",
            "indicator", "cadence", "prior", "current", "delta", "diagnose"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<10} {:-<10} {:-<18} {:-<18} {:-<24} {:-<10}",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for s in &run.summaries {
        let c = &s.comparison;
        let cadence = match c.cadence {
            Cadence::Quarterly => "quarterly",
            Cadence::Annual => "annual",
        };
        out.push_str(
            format!(
                "{:<10} {:<10} {:>18} {:>18} {:>24} {} {:<8}",
                truncate(s.indicator.as_str(), 10),
                cadence,
                format_opt(c.prior_period, None),
                format_opt(c.current_period, None),
                format_delta(c),
                c.diagnosis.symbol(),
                c.diagnosis.label(),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn table_line(cells: &[String; 4]) -> String {
    let line = format!("{:>20} {:>20} {:>24} {:<12}", cells[0], cells[1], cells[2], cells[3]);
    format!("{}\n", line.trim_end())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
