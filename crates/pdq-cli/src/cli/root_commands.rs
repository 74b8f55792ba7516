use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Clean, join and score the datasets, then export tables and reports.
    Run(RunArgs),
    /// Print one or all quality reports.
    Report(ReportArgs),
    /// Print the effective configuration.
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Directory holding the three dataset CSVs
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory exports are written into
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Persist the scored table to this DuckDB file
    #[arg(long)]
    pub lake: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// Which report to print
    #[arg(value_enum)]
    pub kind: ReportKind,

    /// Query this DuckDB file instead of re-running the pipeline
    #[arg(long)]
    pub lake: Option<PathBuf>,

    /// Dataset directory used when no persisted lake is available
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ReportKind {
    QualityStats,
    FieldCompletion,
    EanCorrelation,
    MissingFields,
    BestManufacturer,
    All,
}
