//! The preprocessing stage: temporal cutoff, then outcome validation.

use tracing::info;

use crate::error::PipelineResult;
use crate::types::DataSet;

use super::filter::{retain_from_year, DEFAULT_CUTOFF_YEAR};
use super::validate::{validate_match_outcomes, OutcomeDiscrepancy};

/// Result of [`Preprocessor::clean`].
#[derive(Debug, Clone)]
pub struct PreprocessReport {
    /// Rows from the cutoff year onwards, otherwise unchanged.
    pub dataset: DataSet,
    pub rows_removed: usize,
    /// Discrepancies found in `dataset` (informational; no rows are dropped for them).
    pub discrepancies: Vec<OutcomeDiscrepancy>,
}

/// Cleans an ingested delivery dataset for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preprocessor {
    cutoff_year: i32,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF_YEAR)
    }
}

impl Preprocessor {
    pub fn new(cutoff_year: i32) -> Self {
        Self { cutoff_year }
    }

    pub fn cutoff_year(&self) -> i32 {
        self.cutoff_year
    }

    /// Drop rows before the cutoff year, then validate outcomes on what remains.
    pub fn clean(&self, mut dataset: DataSet) -> PipelineResult<PreprocessReport> {
        let rows_removed = retain_from_year(&mut dataset, self.cutoff_year)?;

        let discrepancies = validate_match_outcomes(&dataset)?;
        info!(
            rows = dataset.row_count(),
            discrepancies = discrepancies.len(),
            "Preprocessing complete"
        );

        Ok(PreprocessReport {
            dataset,
            rows_removed,
            discrepancies,
        })
    }
}
