//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the data source (flag, environment, picker)
//! - runs the dashboard pipeline
//! - prints summaries/plots or launches the TUI
//! - writes optional exports

use clap::Parser;

use crate::analytics::chart::{annual_bars, quarterly_lines};
use crate::cli::{Command, DataArgs, PlotArgs, SummaryArgs};
use crate::domain::{Cadence, DashboardConfig, DataSource, Indicator};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable naming the default dataset.
pub const DATA_ENV: &str = "TAXDASH_DATA";

/// Entry point for the `taxdash` binary.
pub fn run() -> Result<(), AppError> {
    // A missing `.env` file is fine; variables may come from the shell.
    if let Err(err) = dotenvy::dotenv() {
        log::debug!("no .env loaded: {err}");
    }

    // We want `taxdash` and `taxdash -d data.json` to behave like `taxdash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Summary(args) => handle_summary(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args.data)?;
    let run = pipeline::run_dashboard(&config)?;
    if !run.has_data() {
        return Err(AppError::no_data("No data available."));
    }

    let focus = args
        .indicator
        .as_deref()
        .map(|key| pipeline::find_indicator(&run, key))
        .transpose()?;

    if args.json {
        println!("{}", crate::io::export::summary_json_string(&run)?);
    } else {
        println!("{}", crate::report::format_header(&run));
        println!("{}", crate::report::format_tabs(&run.tabs, focus.as_ref()));
        println!();

        match &focus {
            Some(indicator) => println!("{}", indicator_section(&run, indicator)?),
            None => {
                println!("{}", crate::report::format_overview(&run));
                for tab in run.tabs.iter().filter(|t| t.enabled) {
                    println!("{}", indicator_section(&run, &tab.indicator)?);
                }
            }
        }
    }

    // Optional exports.
    if let Some(path) = &args.export_json {
        crate::io::export::write_summary_json(path, &run)?;
        log::info!("wrote {}", path.display());
    }
    if let Some(path) = &args.export_csv {
        crate::io::export::write_summary_csv(path, &run.summaries)?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args.data)?;
    let run = pipeline::run_dashboard(&config)?;
    if !run.has_data() {
        return Err(AppError::no_data("No data available."));
    }

    let indicator = pipeline::active_indicator(&run, args.indicator.as_deref())?;
    let plot = match pipeline::cadence_of(&run, &indicator) {
        Cadence::Quarterly => {
            let window = run
                .window
                .ok_or_else(|| AppError::no_data("No data available."))?;
            let lines = quarterly_lines(&run.store, &indicator, window);
            crate::plot::render_quarterly_plot(&lines, args.width, args.height)
        }
        Cadence::Annual => {
            let bars = annual_bars(&run.store, &indicator);
            crate::plot::render_annual_plot(&bars, args.width)
        }
    };

    println!("{indicator}");
    println!("{plot}");
    Ok(())
}

fn handle_tui(args: DataArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args)?;
    crate::tui::run(config)
}

/// Focused view of one indicator: legend + summary table.
fn indicator_section(run: &pipeline::DashboardRun, indicator: &Indicator) -> Result<String, AppError> {
    let summary = run
        .summary(indicator)
        .ok_or_else(|| AppError::no_data(format!("No summary for {indicator}.")))?;

    let legend = match summary.comparison.cadence {
        Cadence::Quarterly => run
            .window
            .map(|w| crate::report::quarterly_legend(&quarterly_lines(&run.store, indicator, w)))
            .unwrap_or_default(),
        Cadence::Annual => crate::report::annual_legend(&annual_bars(&run.store, indicator)),
    };

    Ok(crate::report::format_indicator(run, summary, &legend))
}

/// Resolve shared data flags into an immutable config.
///
/// Source precedence: `--data`, then `TAXDASH_DATA`, then the interactive picker.
pub fn dashboard_config_from_args(args: &DataArgs) -> Result<DashboardConfig, AppError> {
    let source = match resolve_source_arg(args.data.as_deref(), std::env::var(DATA_ENV).ok()) {
        Some(raw) => DataSource::parse(&raw),
        None => DataSource::Path(crate::cli::picker::prompt_for_dataset_path()?),
    };
    log::debug!("data source: {source}");

    let annual = args
        .annual
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(Indicator::new)
        .collect();

    Ok(DashboardConfig {
        source,
        annual,
        window_year: args.year,
    })
}

fn resolve_source_arg(flag: Option<&str>, env: Option<String>) -> Option<String> {
    flag.map(str::to_string)
        .or(env)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Rewrite argv so `taxdash` defaults to `taxdash tui`.
///
/// Rules:
/// - `taxdash`                       -> `taxdash tui`
/// - `taxdash -d data.json ...`      -> `taxdash tui -d data.json ...`
/// - `taxdash --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "summary" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["taxdash"])), argv(&["taxdash", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["taxdash", "-d", "x.json"])),
            argv(&["taxdash", "tui", "-d", "x.json"])
        );
        assert_eq!(
            rewrite_args(argv(&["taxdash", "summary", "--json"])),
            argv(&["taxdash", "summary", "--json"])
        );
        assert_eq!(rewrite_args(argv(&["taxdash", "--help"])), argv(&["taxdash", "--help"]));
    }

    #[test]
    fn flag_beats_environment() {
        assert_eq!(
            resolve_source_arg(Some("a.json"), Some("b.json".to_string())),
            Some("a.json".to_string())
        );
        assert_eq!(resolve_source_arg(None, Some(" b.json ".to_string())), Some("b.json".to_string()));
        assert_eq!(resolve_source_arg(None, Some("  ".to_string())), None);
        assert_eq!(resolve_source_arg(None, None), None);
    }

    #[test]
    fn config_from_flags() {
        let args = DataArgs {
            data: Some("-".to_string()),
            year: Some(2024),
            annual: vec!["cit".to_string(), " ".to_string()],
        };
        let config = dashboard_config_from_args(&args).unwrap();
        assert_eq!(config.source, DataSource::Stdin);
        assert_eq!(config.window_year, Some(2024));
        assert_eq!(config.annual, vec![Indicator::new("cit")]);
    }
}
