use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use pdq_config::{OutputConfig, PdqConfig, ascii_delimiter};
use pdq_core::{DescriptionQuality, ScoreSummary};
use pdq_lake::{
    BestManufacturerRow, EanCorrelationRow, FieldCompletionRow, ManufacturerQualityRow,
    MissingFieldTally, QualityReport,
};
use pdq_pipeline::StageStats;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RunArgs;
use crate::io::{write_report_rows, write_scored};
use crate::output::output;
use crate::pipeline::{lake_path, open_lake, run_pipeline};
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct RunResponse {
    total_records: usize,
    complete_records: usize,
    incomplete_records: usize,
    good_quality_records: usize,
    bad_quality_records: usize,
    best_manufacturer: Option<String>,
    output_dir: String,
    lake: String,
    files_written: usize,
}

/// Written next to the exports as `run_summary.json`.
#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    generated_at: DateTime<Utc>,
    data_dir: String,
    lake: Option<String>,
    summary: &'a ScoreSummary,
    stages: &'a StageStats,
    files: &'a [String],
}

/// Handle `pdq run`.
pub fn handle(args: &RunArgs, config: &PdqConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = execute(args, config)?;
    output(&response, flags.format)
}

fn execute(args: &RunArgs, config: &PdqConfig) -> anyhow::Result<RunResponse> {
    let mut out = config.output.clone();
    if let Some(dir) = &args.out {
        out.dir.clone_from(dir);
    }
    let delimiter = ascii_delimiter("output.delimiter", out.delimiter)?;
    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| config.input.data_dir.clone());

    let result = run_pipeline(config, Some(&data_dir))?;
    let scored = &result.scored;
    let summary = scored.summary();

    let mut files = Vec::new();
    let mut written = |path: PathBuf| files.push(path.display().to_string());

    let export = Progress::spinner("Writing scored tables");
    let good = scored.with_quality(DescriptionQuality::Good);
    let bad = scored.with_quality(DescriptionQuality::Bad);
    for (name, table) in [(&out.merged, scored), (&out.good, &good), (&out.bad, &bad)] {
        let path = out.path(name);
        let rows = write_scored(&path, table, delimiter)?;
        tracing::info!(path = %path.display(), rows, "wrote scored table");
        written(path);
    }
    export.finish_ok("Wrote scored tables");

    let lake_file = lake_path(args.lake.as_deref(), config);
    let report = Progress::stage(
        "Running quality reports",
        |_: &QualityReport| "Ran quality reports".to_string(),
        || {
            let mut lake = open_lake(lake_file.as_deref())?;
            lake.load_scored(scored)
                .context("failed to load scored records into the lake")?;
            lake.quality_report().context("quality report queries failed")
        },
    )?;

    for path in write_reports(&out, &report, delimiter)? {
        written(path);
    }

    let summary_path = out.path(&out.summary);
    write_summary(
        &summary_path,
        &RunSummary {
            generated_at: Utc::now(),
            data_dir: data_dir.display().to_string(),
            lake: lake_file.as_ref().map(|p| p.display().to_string()),
            summary: &summary,
            stages: &result.stats,
            files: &files,
        },
    )?;
    files.push(summary_path.display().to_string());

    Ok(RunResponse {
        total_records: summary.total_records,
        complete_records: summary.complete_records,
        incomplete_records: summary.incomplete_records,
        good_quality_records: summary.good_quality_records,
        bad_quality_records: summary.bad_quality_records,
        best_manufacturer: report
            .best_manufacturer
            .and_then(|best| best.manufacturer_name),
        output_dir: out.dir.display().to_string(),
        lake: lake_file.map_or_else(|| "in-memory".to_string(), |p| p.display().to_string()),
        files_written: files.len(),
    })
}

fn write_reports(
    out: &OutputConfig,
    report: &QualityReport,
    delimiter: u8,
) -> anyhow::Result<Vec<PathBuf>> {
    let targets = [
        out.path(&out.manufacturer_quality),
        out.path(&out.field_completion),
        out.path(&out.ean_correlation),
        out.path(&out.missing_fields),
        out.path(&out.best_manufacturer),
    ];
    write_report_rows(
        &targets[0],
        &ManufacturerQualityRow::HEADERS,
        &report.manufacturer_quality,
        delimiter,
    )?;
    write_report_rows(
        &targets[1],
        &FieldCompletionRow::HEADERS,
        &report.field_completion,
        delimiter,
    )?;
    write_report_rows(
        &targets[2],
        &EanCorrelationRow::HEADERS,
        &report.ean_correlation,
        delimiter,
    )?;
    write_report_rows(
        &targets[3],
        &MissingFieldTally::HEADERS,
        std::slice::from_ref(&report.missing_fields),
        delimiter,
    )?;
    write_report_rows(
        &targets[4],
        &BestManufacturerRow::HEADERS,
        report.best_manufacturer.as_slice(),
        delimiter,
    )?;
    Ok(targets.into())
}

fn write_summary(path: &Path, summary: &RunSummary<'_>) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write_datasets(dir: &Path) {
        fs::write(
            dir.join("manufacturers.csv"),
            "Manufacturernumber;Manufacturername\nM1;Acme\nM2;Bosch\n",
        )
        .unwrap();
        fs::write(
            dir.join("product_descriptions.csv"),
            "Articlenumber;Short description;Short description 2;Long description;EAN;Picture normal reduced;Technical details\n\
             A1;Drill;;Cordless drill;400100;a1.jpg;18V\n\
             A2;Saw;-;;N/A;a2.jpg;1200W\n\
             A3;Sander;x;y;400300;a3.jpg;250W\n",
        )
        .unwrap();
        fs::write(
            dir.join("product_properties.csv"),
            "Manufacturernumber;Articlenumber\nM1;A1\nM1;A2\nM2;A3\nM9;A3\n",
        )
        .unwrap();
    }

    fn config_for(dir: &TempDir) -> PdqConfig {
        let mut config = PdqConfig::default();
        config.input.data_dir = dir.path().join("data");
        config.output.dir = dir.path().join("out");
        config
    }

    #[test]
    fn run_writes_every_export() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        fs::create_dir_all(&config.input.data_dir).unwrap();
        write_datasets(&config.input.data_dir);

        let args = RunArgs {
            data_dir: None,
            out: None,
            lake: None,
        };
        let response = execute(&args, &config).expect("run succeeds");

        assert_eq!(response.total_records, 3);
        assert_eq!(response.good_quality_records, 2);
        assert_eq!(response.bad_quality_records, 1);
        assert_eq!(response.complete_records, 1);
        assert_eq!(response.best_manufacturer.as_deref(), Some("Bosch"));
        assert_eq!(response.lake, "in-memory");
        assert_eq!(response.files_written, 9);

        let out = &config.output;
        let stats = fs::read_to_string(out.path(&out.manufacturer_quality)).unwrap();
        assert_eq!(
            stats,
            "Manufacturer name,total_products,bad_quality_count,bad_quality_percentage\n\
             Acme,2,1,50.0\n\
             Bosch,1,0,0.0\n"
        );

        let bad = fs::read_to_string(out.path(&out.bad)).unwrap();
        assert_eq!(bad.lines().count(), 2);
        assert!(bad.lines().nth(1).unwrap().starts_with("M1,A2,Saw,,,"));

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.path(&out.summary)).unwrap()).unwrap();
        assert_eq!(summary["summary"]["total_records"], 3);
        assert_eq!(summary["stages"]["joined"], 3);
        assert!(summary["generated_at"].is_string());
    }

    #[test]
    fn run_persists_lake_when_asked() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        let data = dir.path().join("elsewhere");
        fs::create_dir_all(&data).unwrap();
        write_datasets(&data);

        let lake = dir.path().join("lake").join("pdq.duckdb");
        let args = RunArgs {
            data_dir: Some(data),
            out: Some(dir.path().join("custom-out")),
            lake: Some(lake.clone()),
        };
        let response = execute(&args, &config).expect("run succeeds");

        assert!(lake.exists());
        assert_eq!(response.lake, lake.display().to_string());
        assert!(dir.path().join("custom-out").join("run_summary.json").exists());

        let reopened = pdq_lake::ProductLake::open_local(&lake).unwrap();
        assert_eq!(reopened.record_count().unwrap(), 3);
    }

    #[test]
    fn missing_dataset_fails_with_context() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        let args = RunArgs {
            data_dir: None,
            out: None,
            lake: None,
        };
        let err = execute(&args, &config).unwrap_err();
        assert!(format!("{err:#}").contains("manufacturers.csv"));
    }
}
