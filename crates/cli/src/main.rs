use anyhow::Context;
use chrono::Local;
use clap::Parser;
use hotspot::storage::run_directory_name;
use hotspot::{CsvLoader, CsvResultWriter, LogProgress, Pipeline, RunConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H-%M-%S";

/// Find points with at least one neighbor inside a fixed search radius.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Run configuration, TOML or JSON by extension
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Search radius in feet
    #[arg(short, long)]
    radius: Option<f64>,

    /// Worker threads per scan
    #[arg(short, long)]
    workers: Option<usize>,

    #[arg(long)]
    input_dir: Option<PathBuf>,

    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Read at most this many rows from each input file
    #[arg(long)]
    limit: Option<usize>,

    /// Query points between progress notices, 0 to disable
    #[arg(long)]
    progress_interval: Option<usize>,

    /// Datasets to run (default: every configured dataset)
    datasets: Vec<String>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                RunConfig::load(path)
                    .with_context(|| format!("failed to load {}", path.display()))?
            }
            None => RunConfig::default(),
        };

        if let Some(radius) = self.radius {
            config.search = config.search.with_search_radius_feet(radius);
        }
        if let Some(workers) = self.workers {
            config.search = config.search.with_worker_count(workers);
        }
        if let Some(dir) = self.input_dir {
            config = config.with_input_dir(dir);
        }
        if let Some(dir) = self.output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(limit) = self.limit {
            config = config.with_max_points(limit);
        }
        if let Some(interval) = self.progress_interval {
            config = config.with_progress_interval(interval);
        }

        let config = config.select_datasets(&self.datasets);
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotspot=info,hotspot_cli=info,info".into()),
        )
        .init();

    let config = Args::parse().into_config()?;

    let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    let run_dir = config
        .output_dir
        .join(run_directory_name(config.search.search_radius_feet, &timestamp));
    let writer = CsvResultWriter::create(&run_dir)
        .with_context(|| format!("failed to create {}", run_dir.display()))?;

    info!(
        "Searching {} datasets, radius {} ft, {} workers, writing to {}",
        config.datasets.len(),
        config.search.search_radius_feet,
        config.search.worker_count,
        run_dir.display()
    );

    // Progress goes through the `log` facade, which the subscriber bridges.
    let loader = CsvLoader::new(config.columns.clone());
    let summary = Pipeline::new(&config, &loader, &writer)
        .with_progress(&LogProgress)
        .run();

    for report in &summary.reports {
        info!(
            dataset = report.name.as_str(),
            hotspots = report.stats.hotspots,
            comparisons = report.stats.comparisons,
            elapsed_ms = report.stats.elapsed_ms,
            "wrote {}",
            report.output.display()
        );
    }
    for failure in &summary.failures {
        error!(dataset = failure.name.as_str(), "{}", failure.error);
    }

    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
