//! `howzat` turns a directory of ball-by-ball cricket match documents into one flat, tabular
//! delivery dataset, then cleans it for analysis.
//!
//! Every delivery bowled becomes one row carrying its match's metadata (teams, venue, toss,
//! outcome, officials) next to the per-ball facts (batter, bowler, runs, extras, wicket, review).
//!
//! ## Pipeline
//!
//! 1. **Ingest** ([`ingestion::CorpusIngestor`]): read each `*.json` document, flatten it with
//!    [`cricket::flatten_match`], and concatenate the per-match results. A document that fails to
//!    parse is logged and skipped.
//! 2. **Persist** ([`persist::save_to_parquet`] / [`persist::load_from_parquet`]).
//! 3. **Preprocess** ([`processing::Preprocessor`]): keep matches from a cutoff year onwards and
//!    report matches whose recorded winner disagrees with the summed runs.
//!
//! ## Quick example
//!
//! ```no_run
//! use howzat::ingestion::CorpusIngestor;
//! use howzat::persist::save_to_parquet;
//! use howzat::processing::Preprocessor;
//!
//! # fn main() -> howzat::PipelineResult<()> {
//! let deliveries = CorpusIngestor::new("data/raw")?.ingest_all();
//! save_to_parquet(&deliveries, "data/ingested.parquet", "Ingested data")?;
//!
//! let report = Preprocessor::new(2015).clean(deliveries)?;
//! println!(
//!     "rows={} removed={} discrepancies={}",
//!     report.dataset.row_count(),
//!     report.rows_removed,
//!     report.discrepancies.len()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! A single document can be flattened without touching the filesystem:
//!
//! ```no_run
//! use howzat::cricket::flatten_match;
//! use howzat::ingestion::parse_match_document;
//!
//! # fn main() -> howzat::PipelineResult<()> {
//! let doc = parse_match_document(&std::fs::read_to_string("data/raw/1234567.json")?)?;
//! let rows = flatten_match(&doc, "1234567");
//! println!("deliveries={}", rows.row_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`cricket`]: match document model and flattening
//! - [`ingestion`]: corpus discovery and per-document ingestion
//! - [`persist`]: parquet persistence between stages
//! - [`processing`]: temporal filter and outcome validation
//! - [`types`]: schema + in-memory dataset types
//! - [`config`], [`logging`], [`error`]: the ambient pieces used by the `howzat` binary

pub mod config;
pub mod cricket;
pub mod error;
pub mod ingestion;
pub mod logging;
pub mod persist;
pub mod processing;
pub mod types;

pub use error::{PipelineError, PipelineResult};
