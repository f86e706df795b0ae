//! Post-ingestion processing of the delivery dataset.
//!
//! - [`filter`]: keep matches from a cutoff year onwards
//! - [`validate`]: recompute winners from summed runs and report disagreements
//! - [`preprocess`]: both of the above, in that order
//!
//! ## Example
//!
//! ```rust
//! use howzat::processing::Preprocessor;
//! use howzat::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("match_id", DataType::Utf8),
//!     Field::new("start_date", DataType::Utf8),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Utf8("old".into()), Value::Utf8("2012-06-01".into())],
//!         vec![Value::Utf8("new".into()), Value::Utf8("2019-06-01".into())],
//!     ],
//! );
//!
//! let report = Preprocessor::new(2015).clean(ds).unwrap();
//! assert_eq!(report.rows_removed, 1);
//! assert!(report.discrepancies.is_empty());
//! ```

pub mod filter;
pub mod preprocess;
pub mod validate;

pub use filter::{retain_from_year, DEFAULT_CUTOFF_YEAR};
pub use preprocess::{PreprocessReport, Preprocessor};
pub use validate::{
    calculate_match_totals, find_outcome_discrepancies, validate_match_outcomes, MatchSummary,
    OutcomeDiscrepancy,
};
