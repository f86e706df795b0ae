//! howzat CLI: ingest raw match documents and preprocess the resulting delivery dataset.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use howzat::config::{Config, DEFAULT_CONFIG_PATH};
use howzat::ingestion::{CorpusIngestor, IngestionSeverity, TracingObserver};
use howzat::logging::init_logging;
use howzat::persist::{load_from_parquet, save_to_parquet};
use howzat::processing::Preprocessor;
use howzat::PipelineResult;

const INGESTED_DESCRIPTION: &str = "Ingested data";
const PREPROCESSED_DESCRIPTION: &str = "Preprocessed data";

#[derive(Parser)]
#[command(name = "howzat")]
#[command(about = "Flatten ball-by-ball cricket match data into an analysis-ready delivery table")]
#[command(version)]
struct Cli {
    /// Path to the YAML settings file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten every JSON match document in the raw data directory and save the deliveries
    Ingest,

    /// Filter the ingested deliveries by year and validate match outcomes
    Preprocess {
        /// Keep matches starting in this year or later (overrides the settings file)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Run ingest followed by preprocess
    All {
        /// Keep matches starting in this year or later (overrides the settings file)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load {}: {e}", cli.config.display());
            return ExitCode::from(1);
        }
    };
    if let Err(e) = init_logging(&config) {
        eprintln!("failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_missing_input() => {
            error!("{e}");
            ExitCode::from(2)
        }
        Err(e) => {
            error!("Pipeline failed: {e}");
            ExitCode::from(1)
        }
    }
}

fn run(command: Commands, config: &Config) -> PipelineResult<()> {
    match command {
        Commands::Ingest => ingest(config),
        Commands::Preprocess { year } => preprocess(config, year),
        Commands::All { year } => {
            ingest(config)?;
            preprocess(config, year)
        }
    }
}

fn ingest(config: &Config) -> PipelineResult<()> {
    info!("Starting ingestion from {}", config.paths.raw_data.display());
    let report = CorpusIngestor::new(&config.paths.raw_data)?
        .with_observer(Arc::new(TracingObserver))
        .with_alert_threshold(IngestionSeverity::Critical)
        .ingest();
    let failed = report.failed();
    let deliveries = report.into_dataset();

    save_to_parquet(
        &deliveries,
        &config.paths.ingested_data,
        INGESTED_DESCRIPTION,
    )?;
    info!(
        rows = deliveries.row_count(),
        columns = deliveries.schema.fields.len(),
        failed,
        "Ingestion complete"
    );
    Ok(())
}

fn preprocess(config: &Config, year: Option<i32>) -> PipelineResult<()> {
    let cutoff_year = year.unwrap_or(config.preprocess.cutoff_year);
    let deliveries = load_from_parquet(&config.paths.ingested_data, INGESTED_DESCRIPTION)?;

    let report = Preprocessor::new(cutoff_year).clean(deliveries)?;
    save_to_parquet(
        &report.dataset,
        &config.paths.preprocessed_data,
        PREPROCESSED_DESCRIPTION,
    )?;
    info!(
        cutoff_year,
        rows_removed = report.rows_removed,
        discrepancies = report.discrepancies.len(),
        "Preprocessing saved"
    );
    Ok(())
}
