use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error};

use crate::error::PipelineError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the document was skipped).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

impl IngestionSeverity {
    /// Classify a per-file failure.
    pub fn for_error(e: &PipelineError) -> Self {
        match e {
            PipelineError::Io(_) => Self::Critical,
            PipelineError::Json(err) => {
                if err.is_io() {
                    Self::Critical
                } else {
                    Self::Error
                }
            }
            PipelineError::Parquet(err) => {
                if error_chain_contains_io(err) {
                    Self::Critical
                } else {
                    Self::Error
                }
            }
            _ => Self::Error,
        }
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

/// The document an event refers to.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    pub path: PathBuf,
    /// File stem of `path`.
    pub match_id: String,
}

/// Stats reported when a document is flattened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of delivery rows produced (may be zero).
    pub rows: usize,
    pub innings: usize,
}

/// Observer interface for per-document ingestion outcomes.
///
/// Implementors can record metrics or trigger alerts. The corpus ingestor already logs every
/// outcome through `tracing`; observers are for anything beyond that.
pub trait IngestionObserver: Send + Sync {
    /// Called when a document is flattened.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when a document fails to read or parse.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &PipelineError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &PipelineError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &PipelineError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &PipelineError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Routes observer callbacks into `tracing`: successes at debug level, alerts at error level.
///
/// Ordinary failures are not repeated here; the corpus ingestor already logs each one.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        debug!(
            match_id = %ctx.match_id,
            rows = stats.rows,
            innings = stats.innings,
            "Flattened {}",
            ctx.path.display()
        );
    }

    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &PipelineError) {}

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, err: &PipelineError) {
        error!(
            match_id = %ctx.match_id,
            ?severity,
            "ALERT while reading {}: {err}",
            ctx.path.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::IngestionSeverity;
    use crate::error::PipelineError;

    #[test]
    fn io_is_critical_and_parse_is_error() {
        let io = PipelineError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let json = PipelineError::Json(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        let shape = PipelineError::SchemaMismatch {
            message: "json input is empty".to_string(),
        };

        assert_eq!(IngestionSeverity::for_error(&io), IngestionSeverity::Critical);
        assert_eq!(IngestionSeverity::for_error(&json), IngestionSeverity::Error);
        assert_eq!(IngestionSeverity::for_error(&shape), IngestionSeverity::Error);
        assert!(IngestionSeverity::Critical > IngestionSeverity::Error);
    }
}
