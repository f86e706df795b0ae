//! Directory-level ingestion.
//!
//! A corpus is a flat directory of `*.json` match documents. Each file is read and flattened on
//! its own; a file that fails is recorded as a [`FileOutcome::Failed`] and the run carries on.
//! Only an empty corpus is fatal.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::cricket::{flatten_match, MatchDocument};
use crate::error::{PipelineError, PipelineResult};
use crate::types::DataSet;

use super::json::{match_id_from_path, read_match_document};
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Extension of eligible match documents.
pub const MATCH_FILE_EXTENSION: &str = "json";

/// List the match documents directly inside `dir` (non-recursive), in discovery order.
///
/// Files with any other extension are ignored. Returns [`PipelineError::NoInput`] when nothing
/// eligible is found (including when `dir` does not exist).
pub fn discover_match_files(dir: impl AsRef<Path>) -> PipelineResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join(format!("*.{MATCH_FILE_EXTENSION}"));

    let mut files = Vec::new();
    for entry in glob::glob(&pattern.to_string_lossy())? {
        let path = entry.map_err(std::io::Error::from)?;
        if path.is_file() {
            files.push(path);
        }
    }

    info!("Found {} JSON files in {}", files.len(), dir.display());
    if files.is_empty() {
        return Err(PipelineError::NoInput {
            dir: dir.to_path_buf(),
        });
    }
    Ok(files)
}

/// Outcome of ingesting a single document.
#[derive(Debug)]
pub enum FileOutcome {
    /// The document was flattened. `dataset` may have zero rows.
    Parsed {
        path: PathBuf,
        match_id: String,
        dataset: DataSet,
    },
    /// The document could not be read or parsed and was skipped.
    Failed {
        path: PathBuf,
        match_id: String,
        error: PipelineError,
    },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Parsed { path, .. } | FileOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

/// Per-file outcomes of one corpus pass, in discovery order.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub outcomes: Vec<FileOutcome>,
}

impl IngestReport {
    pub fn files_total(&self) -> usize {
        self.outcomes.len()
    }

    /// Documents that parsed, including those that produced no rows.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_failed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// Failed documents with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &PipelineError)> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Failed { path, error, .. } => Some((path.as_path(), error)),
            FileOutcome::Parsed { .. } => None,
        })
    }

    /// Combine the parsed documents into one dataset.
    ///
    /// Empty per-file results are dropped, and so is every column that is entirely null within a
    /// given file, before the files are concatenated in discovery order. If nothing is left the
    /// result is an empty dataset, not an error.
    pub fn into_dataset(self) -> DataSet {
        let frames: Vec<DataSet> = self
            .outcomes
            .into_iter()
            .filter_map(|o| match o {
                FileOutcome::Parsed { dataset, .. } if !dataset.is_empty() => {
                    Some(dataset.drop_all_null_columns())
                }
                _ => None,
            })
            .collect();

        if frames.is_empty() {
            warn!("All parsed files resulted in empty datasets");
            return DataSet::empty();
        }
        DataSet::concat(frames)
    }
}

/// Ingests every match document of a directory into one delivery dataset.
pub struct CorpusIngestor {
    raw_data_dir: PathBuf,
    files: Vec<PathBuf>,
    observer: Option<Arc<dyn IngestionObserver>>,
    alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for CorpusIngestor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorpusIngestor")
            .field("raw_data_dir", &self.raw_data_dir)
            .field("files", &self.files.len())
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl CorpusIngestor {
    /// Discover the documents in `raw_data_dir`.
    ///
    /// Fails with [`PipelineError::NoInput`] if the directory holds no `*.json` files.
    pub fn new(raw_data_dir: impl AsRef<Path>) -> PipelineResult<Self> {
        let raw_data_dir = raw_data_dir.as_ref().to_path_buf();
        let files = discover_match_files(&raw_data_dir)?;
        Ok(Self {
            raw_data_dir,
            files,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        })
    }

    /// Attach an observer for per-document outcomes.
    pub fn with_observer(mut self, observer: Arc<dyn IngestionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Severity threshold at which `on_alert` is invoked (default: `Critical`).
    pub fn with_alert_threshold(mut self, severity: IngestionSeverity) -> Self {
        self.alert_at_or_above = severity;
        self
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Read and flatten every discovered document, sequentially, collecting one outcome per file.
    pub fn ingest(&self) -> IngestReport {
        let outcomes: Vec<FileOutcome> = self.files.iter().map(|p| self.ingest_file(p)).collect();
        let report = IngestReport { outcomes };

        info!(
            "Successfully parsed {}/{} files",
            report.succeeded(),
            report.files_total()
        );
        if report.failed() > 0 {
            warn!(failed = report.failed(), "Failed to parse {} files", report.failed());
        }
        report
    }

    /// [`Self::ingest`] followed by [`IngestReport::into_dataset`].
    pub fn ingest_all(&self) -> DataSet {
        self.ingest().into_dataset()
    }

    fn ingest_file(&self, path: &Path) -> FileOutcome {
        let ctx = IngestionContext {
            path: path.to_path_buf(),
            match_id: match_id_from_path(path),
        };

        match read_match_document(path) {
            Ok(doc) => {
                let dataset = flatten_match(&doc, &ctx.match_id);
                if dataset.is_empty() {
                    warn!("No deliveries found in {}", file_name(path));
                }
                if let Some(obs) = self.observer.as_ref() {
                    obs.on_success(&ctx, stats_for(&doc, &dataset));
                }
                FileOutcome::Parsed {
                    path: ctx.path,
                    match_id: ctx.match_id,
                    dataset,
                }
            }
            Err(e) => {
                error!("Failed to parse {}: {e}", file_name(path));
                if let Some(obs) = self.observer.as_ref() {
                    let sev = IngestionSeverity::for_error(&e);
                    obs.on_failure(&ctx, sev, &e);
                    if sev >= self.alert_at_or_above {
                        obs.on_alert(&ctx, sev, &e);
                    }
                }
                FileOutcome::Failed {
                    path: ctx.path,
                    match_id: ctx.match_id,
                    error: e,
                }
            }
        }
    }
}

fn stats_for(doc: &MatchDocument, dataset: &DataSet) -> IngestionStats {
    IngestionStats {
        rows: dataset.row_count(),
        innings: doc.innings.len(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
