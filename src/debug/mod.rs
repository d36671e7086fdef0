//! Debug bundle writer for inspecting the loaded store and every comparison.

use std::fs::{File, create_dir_all};
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Local;

use crate::analytics::chart::annual_bars;
use crate::analytics::select_years;
use crate::app::pipeline::DashboardRun;
use crate::domain::Cadence;
use crate::error::AppError;

/// Write a markdown bundle under `debug/` and return its path.
pub fn write_debug_bundle(run: &DashboardRun) -> Result<PathBuf, AppError> {
    let dir = PathBuf::from("debug");
    create_dir_all(&dir).map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("taxdash_debug_{ts}.md"));

    let mut file = File::create(&path)
        .map_err(|e| AppError::new(4, format!("Failed to create debug file: {e}")))?;
    write_bundle(&mut file, run).map_err(|e| AppError::new(4, format!("Failed to write debug: {e}")))?;

    log::info!("wrote debug bundle {}", path.display());
    Ok(path)
}

fn write_bundle<W: Write>(out: &mut W, run: &DashboardRun) -> io::Result<()> {
    writeln!(out, "# taxdash debug bundle")?;
    writeln!(out, "- generated: {}", Local::now().to_rfc3339())?;
    writeln!(out, "- source: {}", run.source)?;
    writeln!(out, "- currency: {}", run.dataset.meta.currency.as_deref().unwrap_or("-"))?;
    match run.window {
        Some(w) => writeln!(out, "- window: {}..{}", w.previous(), w.current)?,
        None => writeln!(out, "- window: -")?,
    }
    writeln!(
        out,
        "- rows: read={} values={} rejected={}",
        run.dataset.rows_read,
        run.store.len(),
        run.dataset.row_errors.len()
    )?;

    if !run.dataset.row_errors.is_empty() {
        writeln!(out, "\n## Rejected input")?;
        writeln!(out, "| row | field | message |")?;
        writeln!(out, "| - | - | - |")?;
        for err in &run.dataset.row_errors {
            writeln!(
                out,
                "| {} | {} | {} |",
                err.index,
                err.field.as_deref().unwrap_or("-"),
                err.message
            )?;
        }
    }

    writeln!(out, "\n## Comparisons")?;
    writeln!(out, "| indicator | cadence | prior_at | prior | current_at | current | delta | pct | diagnosis |")?;
    writeln!(out, "| - | - | - | - | - | - | - | - | - |")?;
    for s in &run.summaries {
        let c = &s.comparison;
        writeln!(
            out,
            "| {} | {:?} | {} | {} | {} | {} | {} | {} | {} |",
            s.indicator,
            c.cadence,
            fmt_period(c.prior_at.map(|p| p.to_string())),
            fmt_opt(c.prior_period),
            fmt_period(c.current_at.map(|p| p.to_string())),
            fmt_opt(c.current_period),
            fmt_opt(c.delta),
            fmt_opt(c.relative_change_pct),
            c.diagnosis.label()
        )?;
    }

    for tab in &run.tabs {
        let indicator = &tab.indicator;
        writeln!(out, "\n## {indicator}")?;
        writeln!(out, "- cadence: {:?} | enabled: {}", tab.cadence, tab.enabled)?;

        if tab.cadence == Cadence::Annual {
            let years: Vec<String> = select_years(&run.store, indicator)
                .into_iter()
                .map(|y| y.to_string())
                .collect();
            writeln!(out, "- axis years: [{}]", years.join(", "))?;

            writeln!(out, "\n### Picked bars")?;
            writeln!(out, "| year | quarter | value | provisional |")?;
            writeln!(out, "| - | - | - | - |")?;
            for bar in annual_bars(&run.store, indicator) {
                writeln!(
                    out,
                    "| {} | {} | {:.3} | {} |",
                    bar.year, bar.quarter, bar.value, bar.provisional
                )?;
            }
        }

        writeln!(out, "\n### Stored points")?;
        writeln!(out, "| period | value |")?;
        writeln!(out, "| - | - |")?;
        for (period, value) in run.store.points(indicator) {
            writeln!(out, "| {period} | {value:.3} |")?;
        }
    }

    Ok(())
}

fn fmt_period(period: Option<String>) -> String {
    period.unwrap_or_else(|| "-".to_string())
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.3}"),
        _ => "-".to_string(),
    }
}
