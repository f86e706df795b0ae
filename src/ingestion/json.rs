//! Match document reading.
//!
//! One file holds one match as a single JSON object. The match identifier is not part of the
//! document; it is the file stem.

use std::fs;
use std::path::Path;

use crate::cricket::MatchDocument;
use crate::error::{PipelineError, PipelineResult};

/// Read and parse one match document from disk.
pub fn read_match_document(path: impl AsRef<Path>) -> PipelineResult<MatchDocument> {
    let text = fs::read_to_string(path)?;
    parse_match_document(&text)
}

/// Parse one match document from an in-memory string.
pub fn parse_match_document(input: &str) -> PipelineResult<MatchDocument> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PipelineError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    let value = serde_json::from_str::<serde_json::Value>(trimmed)?;
    if !value.is_object() {
        return Err(PipelineError::SchemaMismatch {
            message: "match document must be a json object".to_string(),
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// The match identifier for a document path (its file stem), e.g. `1234567` for `1234567.json`.
pub fn match_id_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
