use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type returned by ingestion, persistence and preprocessing.
///
/// Per-file ingestion failures are captured in an [`crate::ingestion::IngestReport`] and never
/// escape the corpus boundary; everything else propagates to the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A match document is not valid JSON or does not have the expected shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parquet read/write error.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// The directory glob could not be built (e.g. non-UTF-8 or malformed path).
    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// The YAML configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// The raw data directory contains no eligible match documents.
    #[error("no JSON files found in {}", dir.display())]
    NoInput { dir: PathBuf },

    /// A dataset that a later stage depends on has not been produced yet.
    #[error("{description} not found at {}. Run 'ingest' first.", path.display())]
    MissingDataset { description: String, path: PathBuf },

    /// The dataset does not have the shape an operation needs (missing columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A `start_date` value is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid start_date at row {row}: '{raw}'")]
    InvalidDate { row: usize, raw: String },

    /// The tracing subscriber could not be installed.
    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

impl PipelineError {
    /// True for the errors that mean "there is nothing to work on" rather than "something broke".
    ///
    /// The CLI uses this to exit with a distinct status code.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::NoInput { .. } | Self::MissingDataset { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineError;
    use std::path::PathBuf;

    #[test]
    fn missing_input_classification() {
        let no_input = PipelineError::NoInput {
            dir: PathBuf::from("data/raw"),
        };
        let missing = PipelineError::MissingDataset {
            description: "Ingested data".to_string(),
            path: PathBuf::from("data/ingested.parquet"),
        };
        let other = PipelineError::SchemaMismatch {
            message: "nope".to_string(),
        };

        assert!(no_input.is_missing_input());
        assert!(missing.is_missing_input());
        assert!(!other.is_missing_input());
        assert!(missing.to_string().contains("Run 'ingest' first"));
        assert_eq!(no_input.to_string(), "no JSON files found in data/raw");
    }
}
