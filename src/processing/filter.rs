//! Temporal filtering of the delivery dataset.

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{DataSet, Value};

/// Default first season kept by [`retain_from_year`].
pub const DEFAULT_CUTOFF_YEAR: i32 = 2015;

const START_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `start_date` cell. `Ok(None)` for null; an error for anything that is not a
/// `YYYY-MM-DD` calendar date.
pub fn parse_start_date(row: usize, value: &Value) -> PipelineResult<Option<NaiveDate>> {
    match value {
        Value::Null => Ok(None),
        Value::Utf8(raw) => NaiveDate::parse_from_str(raw.trim(), START_DATE_FORMAT)
            .map(Some)
            .map_err(|_| PipelineError::InvalidDate {
                row,
                raw: raw.clone(),
            }),
        other => Err(PipelineError::InvalidDate {
            row,
            raw: format!("{other:?}"),
        }),
    }
}

/// Remove, in place, every row whose match started before `cutoff_year`. Returns the number of
/// rows removed.
///
/// Rows with a null `start_date` never satisfy the cutoff and are removed. A malformed date
/// aborts the whole filter with [`PipelineError::InvalidDate`] and leaves `dataset` untouched.
pub fn retain_from_year(dataset: &mut DataSet, cutoff_year: i32) -> PipelineResult<usize> {
    if dataset.is_empty() {
        return Ok(0);
    }
    let idx = dataset
        .schema
        .index_of("start_date")
        .ok_or_else(|| PipelineError::SchemaMismatch {
            message: "missing required column 'start_date'".to_string(),
        })?;

    let keep = dataset
        .rows
        .iter()
        .enumerate()
        .map(|(idx0, row)| -> PipelineResult<bool> {
            let date = parse_start_date(idx0 + 1, &row[idx])?;
            Ok(date.is_some_and(|d| d.year() >= cutoff_year))
        })
        .collect::<PipelineResult<Vec<bool>>>()?;

    let before = dataset.row_count();
    let mut keep = keep.into_iter();
    dataset.retain_rows(|_| keep.next().unwrap_or(false));
    let removed = before - dataset.row_count();

    info!(
        cutoff_year,
        "Kept {} of {before} rows from {cutoff_year} onwards",
        dataset.row_count()
    );
    Ok(removed)
}
