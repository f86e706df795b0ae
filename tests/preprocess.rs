use std::collections::BTreeSet;

use howzat::ingestion::CorpusIngestor;
use howzat::processing::{calculate_match_totals, Preprocessor};
use howzat::types::{DataSet, DataType, Field, Schema, Value};
use howzat::PipelineError;

fn corpus() -> DataSet {
    CorpusIngestor::new("tests/fixtures/matches")
        .unwrap()
        .ingest_all()
}

fn match_ids(ds: &DataSet) -> BTreeSet<String> {
    ds.column_values("match_id")
        .unwrap()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

#[test]
fn default_cutoff_drops_earlier_matches() {
    let report = Preprocessor::default().clean(corpus()).unwrap();

    assert_eq!(report.rows_removed, 3);
    assert_eq!(report.dataset.row_count(), 9);
    assert_eq!(
        match_ids(&report.dataset),
        ["1001", "1003"].into_iter().map(str::to_string).collect::<BTreeSet<_>>()
    );
}

#[test]
fn cutoff_is_configurable() {
    let report = Preprocessor::new(2018).clean(corpus()).unwrap();
    assert_eq!(match_ids(&report.dataset).len(), 1);

    let report = Preprocessor::new(2000).clean(corpus()).unwrap();
    assert_eq!(report.rows_removed, 0);
    assert_eq!(report.dataset.row_count(), 12);
}

#[test]
fn rain_affected_result_is_reported_but_kept() {
    let report = Preprocessor::default().clean(corpus()).unwrap();

    assert_eq!(report.discrepancies.len(), 1);
    let d = &report.discrepancies[0];
    assert_eq!(d.match_id, "1003");
    assert_eq!(d.outcome_winner, "Pakistan");
    assert_eq!(d.calculated_winner.as_deref(), Some("England"));
    assert_eq!((d.team_a_runs, d.team_b_runs), (8, 5));

    assert!(match_ids(&report.dataset).contains("1003"));
}

#[test]
fn totals_match_the_fixture_scores() {
    let summaries = calculate_match_totals(&corpus()).unwrap();
    let india = summaries.iter().find(|s| s.match_id == "1001").unwrap();

    assert_eq!(india.team_a.as_deref(), Some("India"));
    assert_eq!((india.team_a_runs, india.team_b_runs), (11, 1));
    assert_eq!(india.team_b_wickets, 1);
    assert_eq!(india.calculated_winner(), Some("India"));
}

#[test]
fn malformed_start_date_aborts() {
    let ds = DataSet::new(
        Schema::new(vec![
            Field::new("match_id", DataType::Utf8),
            Field::new("start_date", DataType::Utf8),
        ]),
        vec![vec![
            Value::Utf8("9".to_string()),
            Value::Utf8("16/06/2019".to_string()),
        ]],
    );
    let err = Preprocessor::default().clean(ds).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidDate { row: 1, .. }));
}

#[test]
fn empty_dataset_passes_through() {
    let report = Preprocessor::default().clean(DataSet::empty()).unwrap();
    assert!(report.dataset.is_empty());
    assert_eq!(report.rows_removed, 0);
    assert!(report.discrepancies.is_empty());
}
