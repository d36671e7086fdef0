//! Command-line parsing for the tax indicator dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the analytics code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "taxdash", version, about = "Tax indicator dashboard (VAT, PIT, CIT)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the tab strip and summary tables, optionally exporting them.
    Summary(SummaryArgs),
    /// Print a text chart for one indicator.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying pipeline as `taxdash summary`, but renders
    /// tabs, charts and summary rows in a terminal UI using Ratatui.
    Tui(DataArgs),
}

/// Dataset and comparison options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Dataset JSON: a file path, `-` for stdin, or an http(s) URL.
    ///
    /// Falls back to `TAXDASH_DATA`, then to an interactive picker.
    #[arg(short = 'd', long, value_name = "JSON")]
    pub data: Option<String>,

    /// Current year of the quarterly window (defaults to the latest year with data).
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=9999))]
    pub year: Option<i32>,

    /// Indicators compared year over year with provisional progress normalization.
    #[arg(long, value_delimiter = ',', default_value = "CIT")]
    pub annual: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Show only this indicator (case-insensitive).
    #[arg(short = 'i', long)]
    pub indicator: Option<String>,

    /// Print the summary as JSON instead of tables.
    #[arg(long)]
    pub json: bool,

    /// Write the summary to a JSON file.
    #[arg(long = "export-json", value_name = "PATH")]
    pub export_json: Option<PathBuf>,

    /// Write one CSV row per indicator.
    #[arg(long = "export-csv", value_name = "PATH")]
    pub export_csv: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Indicator to plot (defaults to the first enabled tab).
    #[arg(short = 'i', long)]
    pub indicator: Option<String>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}
