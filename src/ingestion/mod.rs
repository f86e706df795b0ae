//! Ingestion of raw match documents, and reading back persisted datasets.
//!
//! Most callers should use [`CorpusIngestor`], which:
//!
//! - discovers the `*.json` documents of a directory
//! - reads and flattens each one into delivery rows, skipping documents that fail
//! - optionally reports per-document success/failure/alerts to an [`IngestionObserver`]
//!
//! Lower-level pieces are available under:
//! - [`json`]: one document at a time
//! - [`parquet`]: datasets previously written by [`crate::persist`]

pub mod corpus;
pub mod json;
pub mod observability;
pub mod parquet;

pub use corpus::{discover_match_files, CorpusIngestor, FileOutcome, IngestReport};
pub use json::{match_id_from_path, parse_match_document, read_match_document};
pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
