//! Pipeline and lake wiring shared by `run` and `report`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use pdq_config::{PdqConfig, ascii_delimiter};
use pdq_lake::ProductLake;
use pdq_pipeline::{BadValues, Pipeline, PipelineOutput};

use crate::io::CsvSource;
use crate::progress::Progress;

/// Clean, join and score the configured datasets.
pub fn run_pipeline(config: &PdqConfig, data_dir: Option<&Path>) -> anyhow::Result<PipelineOutput> {
    let mut input = config.input.clone();
    if let Some(dir) = data_dir {
        input.data_dir = dir.to_path_buf();
    }
    let delimiter = ascii_delimiter("input.delimiter", input.delimiter)?;
    let data_dir = input.data_dir.clone();
    let source = CsvSource::new(input, delimiter);
    let pipeline = Pipeline::new(BadValues::from_tokens(&config.cleaning.bad_values));

    Progress::stage(
        "Cleaning, joining and scoring datasets",
        |out: &PipelineOutput| format!("Scored {} records", out.scored.len()),
        || {
            pipeline
                .run(&source)
                .with_context(|| format!("pipeline failed for {}", data_dir.display()))
        },
    )
}

/// The lake file to use: the command-line path, else the configured one.
pub fn lake_path(cli: Option<&Path>, config: &PdqConfig) -> Option<PathBuf> {
    cli.map(Path::to_path_buf).or_else(|| config.lake.file())
}

/// Open a file-backed lake at `path`, or an in-memory one.
pub fn open_lake(path: Option<&Path>) -> anyhow::Result<ProductLake> {
    match path {
        Some(path) => ProductLake::open_local(path)
            .with_context(|| format!("failed to open lake at {}", path.display())),
        None => ProductLake::open_in_memory().context("failed to open in-memory lake"),
    }
}
