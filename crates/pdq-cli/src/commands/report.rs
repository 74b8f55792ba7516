use anyhow::Context;
use pdq_config::PdqConfig;
use pdq_lake::ProductLake;

use crate::cli::root_commands::{ReportArgs, ReportKind};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;
use crate::pipeline::{lake_path, open_lake, run_pipeline};

/// Handle `pdq report`.
pub fn handle(args: &ReportArgs, config: &PdqConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let lake = report_lake(args, config)?;
    let format = flags.format;

    match args.kind {
        ReportKind::QualityStats => output(&lake.manufacturer_quality_stats()?, format),
        ReportKind::FieldCompletion => output(&lake.field_completion_rates()?, format),
        ReportKind::EanCorrelation => output(&lake.ean_correlation()?, format),
        ReportKind::MissingFields => output(&lake.missing_field_tally()?, format),
        ReportKind::BestManufacturer => output(&lake.best_manufacturer()?, format),
        ReportKind::All if format == OutputFormat::Table => {
            let report = lake.quality_report()?;
            println!("Manufacturer quality");
            output(&report.manufacturer_quality, format)?;
            println!("\nField completion rates");
            output(&report.field_completion, format)?;
            println!("\nEAN vs description quality");
            output(&report.ean_correlation, format)?;
            println!("\nMissing fields");
            output(&report.missing_fields, format)?;
            println!("\nBest manufacturer");
            output(&report.best_manufacturer, format)
        }
        ReportKind::All => output(&lake.quality_report()?, format),
    }
}

/// A persisted lake holding a loaded table, else a fresh in-memory run.
fn report_lake(args: &ReportArgs, config: &PdqConfig) -> anyhow::Result<ProductLake> {
    if let Some(path) = lake_path(args.lake.as_deref(), config) {
        if path.exists() {
            let lake = open_lake(Some(&path))?;
            if lake.columns().is_ok() {
                tracing::info!(path = %path.display(), "reporting from persisted lake");
                return Ok(lake);
            }
            tracing::warn!(path = %path.display(), "lake has no scored table; re-running pipeline");
        }
    }

    let result = run_pipeline(config, args.data_dir.as_deref())?;
    let mut lake = open_lake(None)?;
    lake.load_scored(&result.scored)
        .context("failed to load scored records into the lake")?;
    Ok(lake)
}
