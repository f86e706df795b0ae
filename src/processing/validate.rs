//! Outcome validation.
//!
//! Recomputes every match's winner as "the side with more total runs" and compares it with the
//! recorded winner. This is a coarse, read-only check: innings victories, target revisions and
//! awarded matches show up as discrepancies too.

use std::collections::{BTreeMap, HashMap};

use tracing::{info, warn};

use crate::error::{PipelineError, PipelineResult};
use crate::types::{DataSet, Value};

/// Results for which there is no winner to check.
pub const NO_WINNER_RESULTS: &[&str] = &["draw", "tie", "no result"];

/// Per-match totals derived from delivery rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub match_id: String,
    pub team_a: Option<String>,
    pub team_b: Option<String>,
    pub team_a_runs: i64,
    pub team_b_runs: i64,
    pub team_a_wickets: i64,
    pub team_b_wickets: i64,
    pub outcome_winner: Option<String>,
    pub outcome_result: Option<String>,
}

impl MatchSummary {
    /// The side with strictly more runs; `None` on equal totals.
    pub fn calculated_winner(&self) -> Option<&str> {
        if self.team_a_runs > self.team_b_runs {
            self.team_a.as_deref()
        } else if self.team_b_runs > self.team_a_runs {
            self.team_b.as_deref()
        } else {
            None
        }
    }
}

/// A match whose recorded winner differs from the runs-based winner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeDiscrepancy {
    pub match_id: String,
    pub team_a: Option<String>,
    pub team_b: Option<String>,
    pub team_a_runs: i64,
    pub team_b_runs: i64,
    pub calculated_winner: Option<String>,
    pub outcome_winner: String,
    pub outcome_result: Option<String>,
}

#[derive(Default)]
struct MatchAccumulator {
    team_a: Option<String>,
    team_b: Option<String>,
    outcome_winner: Option<String>,
    outcome_result: Option<String>,
    /// batting team -> (runs, wickets lost)
    by_batting_team: HashMap<String, (i64, i64)>,
}

/// Sum runs and wickets per batting team, one [`MatchSummary`] per match ordered by `match_id`.
///
/// Match-level columns take the first non-null value seen for the match. Columns the dataset does
/// not carry count as null (or zero for the summed columns); only `match_id` is required.
pub fn calculate_match_totals(dataset: &DataSet) -> PipelineResult<Vec<MatchSummary>> {
    if dataset.is_empty() {
        return Ok(Vec::new());
    }
    let schema = &dataset.schema;
    let match_idx = schema
        .index_of("match_id")
        .ok_or_else(|| PipelineError::SchemaMismatch {
            message: "missing required column 'match_id'".to_string(),
        })?;
    let batting_idx = schema.index_of("batting_team");
    let runs_idx = schema.index_of("runs_total");
    let wicket_idx = schema.index_of("is_wicket");
    let team_a_idx = schema.index_of("team_a");
    let team_b_idx = schema.index_of("team_b");
    let winner_idx = schema.index_of("outcome_winner");
    let result_idx = schema.index_of("outcome_result");

    let mut matches: BTreeMap<String, MatchAccumulator> = BTreeMap::new();
    for row in &dataset.rows {
        let Some(match_id) = row[match_idx].as_str() else {
            continue;
        };
        let acc = matches.entry(match_id.to_string()).or_default();

        fill_first(&mut acc.team_a, row, team_a_idx);
        fill_first(&mut acc.team_b, row, team_b_idx);
        fill_first(&mut acc.outcome_winner, row, winner_idx);
        fill_first(&mut acc.outcome_result, row, result_idx);

        if let Some(batting) = str_at(row, batting_idx) {
            let totals = acc.by_batting_team.entry(batting.to_string()).or_default();
            totals.0 += int_at(row, runs_idx);
            totals.1 += int_at(row, wicket_idx);
        }
    }

    Ok(matches
        .into_iter()
        .map(|(match_id, acc)| {
            let totals_for = |team: &Option<String>| {
                team.as_ref()
                    .and_then(|t| acc.by_batting_team.get(t))
                    .copied()
                    .unwrap_or_default()
            };
            let (team_a_runs, team_a_wickets) = totals_for(&acc.team_a);
            let (team_b_runs, team_b_wickets) = totals_for(&acc.team_b);
            MatchSummary {
                match_id,
                team_a_runs,
                team_b_runs,
                team_a_wickets,
                team_b_wickets,
                team_a: acc.team_a,
                team_b: acc.team_b,
                outcome_winner: acc.outcome_winner,
                outcome_result: acc.outcome_result,
            }
        })
        .collect())
}

/// Compare each summary's runs-based winner with its recorded winner.
///
/// Matches without a recorded winner, or with a draw/tie/no-result outcome, are skipped.
pub fn find_outcome_discrepancies(summaries: &[MatchSummary]) -> Vec<OutcomeDiscrepancy> {
    summaries
        .iter()
        .filter_map(|s| {
            let recorded = s.outcome_winner.as_deref()?;
            if s
                .outcome_result
                .as_deref()
                .is_some_and(|r| NO_WINNER_RESULTS.contains(&r))
            {
                return None;
            }
            let calculated = s.calculated_winner();
            if calculated == Some(recorded) {
                return None;
            }
            Some(OutcomeDiscrepancy {
                match_id: s.match_id.clone(),
                team_a: s.team_a.clone(),
                team_b: s.team_b.clone(),
                team_a_runs: s.team_a_runs,
                team_b_runs: s.team_b_runs,
                calculated_winner: calculated.map(str::to_string),
                outcome_winner: recorded.to_string(),
                outcome_result: s.outcome_result.clone(),
            })
        })
        .collect()
}

/// Validate recorded winners against summed delivery runs, logging every discrepancy.
///
/// Read-only: the dataset is not modified.
pub fn validate_match_outcomes(dataset: &DataSet) -> PipelineResult<Vec<OutcomeDiscrepancy>> {
    let summaries = calculate_match_totals(dataset)?;
    let discrepancies = find_outcome_discrepancies(&summaries);

    if discrepancies.is_empty() {
        info!("All match outcomes validated successfully");
    } else {
        warn!(
            "Found {} matches with outcome discrepancies:",
            discrepancies.len()
        );
        for d in &discrepancies {
            warn!(
                "  Match {}: Recorded={}, Calculated={}, Team A ({})={}, Team B ({})={}",
                d.match_id,
                d.outcome_winner,
                d.calculated_winner.as_deref().unwrap_or("None"),
                d.team_a.as_deref().unwrap_or("None"),
                d.team_a_runs,
                d.team_b.as_deref().unwrap_or("None"),
                d.team_b_runs
            );
        }
    }
    Ok(discrepancies)
}

fn str_at(row: &[Value], idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| row[i].as_str())
}

fn int_at(row: &[Value], idx: Option<usize>) -> i64 {
    idx.and_then(|i| row[i].as_i64()).unwrap_or(0)
}

fn fill_first(slot: &mut Option<String>, row: &[Value], idx: Option<usize>) {
    if slot.is_none() {
        *slot = str_at(row, idx).map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::{calculate_match_totals, find_outcome_discrepancies, validate_match_outcomes};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("match_id", DataType::Utf8),
            Field::new("team_a", DataType::Utf8),
            Field::new("team_b", DataType::Utf8),
            Field::new("outcome_winner", DataType::Utf8),
            Field::new("outcome_result", DataType::Utf8),
            Field::new("batting_team", DataType::Utf8),
            Field::new("runs_total", DataType::Int64),
            Field::new("is_wicket", DataType::Int64),
        ])
    }

    fn row(
        match_id: &str,
        winner: Option<&str>,
        result: Option<&str>,
        batting: &str,
        runs: i64,
        wicket: i64,
    ) -> Vec<Value> {
        vec![
            Value::Utf8(match_id.to_string()),
            Value::Utf8("Team A".to_string()),
            Value::Utf8("Team B".to_string()),
            winner.into(),
            result.into(),
            Value::Utf8(batting.to_string()),
            Value::Int64(runs),
            Value::Int64(wicket),
        ]
    }

    /// Two innings: Team A makes 250, Team B 200.
    fn match_rows(match_id: &str, winner: Option<&str>, result: Option<&str>) -> Vec<Vec<Value>> {
        vec![
            row(match_id, winner, result, "Team A", 150, 0),
            row(match_id, winner, result, "Team A", 100, 1),
            row(match_id, winner, result, "Team B", 120, 1),
            row(match_id, winner, result, "Team B", 80, 1),
        ]
    }

    #[test]
    fn totals_per_team() {
        let ds = DataSet::new(schema(), match_rows("m1", Some("Team A"), None));
        let summaries = calculate_match_totals(&ds).unwrap();
        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!((s.team_a_runs, s.team_b_runs), (250, 200));
        assert_eq!((s.team_a_wickets, s.team_b_wickets), (1, 2));
        assert_eq!(s.calculated_winner(), Some("Team A"));
    }

    #[test]
    fn agreeing_winner_has_no_discrepancy() {
        let ds = DataSet::new(schema(), match_rows("m1", Some("Team A"), Some("result")));
        assert!(validate_match_outcomes(&ds).unwrap().is_empty());
    }

    #[test]
    fn disagreeing_winner_is_reported() {
        let ds = DataSet::new(schema(), match_rows("m1", Some("Team B"), Some("result")));
        let found = validate_match_outcomes(&ds).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].calculated_winner.as_deref(), Some("Team A"));
        assert_eq!(found[0].outcome_winner, "Team B");
        assert_eq!((found[0].team_a_runs, found[0].team_b_runs), (250, 200));
    }

    #[test]
    fn draws_ties_and_no_results_are_skipped() {
        for result in ["draw", "tie", "no result"] {
            let ds = DataSet::new(schema(), match_rows("m1", Some("Team B"), Some(result)));
            assert!(validate_match_outcomes(&ds).unwrap().is_empty(), "{result}");
        }
        let ds = DataSet::new(schema(), match_rows("m1", None, None));
        assert!(validate_match_outcomes(&ds).unwrap().is_empty());
    }

    #[test]
    fn equal_totals_with_recorded_winner_is_a_discrepancy() {
        let ds = DataSet::new(
            schema(),
            vec![
                row("m1", Some("Team A"), None, "Team A", 100, 0),
                row("m1", Some("Team A"), None, "Team B", 100, 0),
            ],
        );
        let found = validate_match_outcomes(&ds).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].calculated_winner, None);
    }

    #[test]
    fn summaries_are_per_match_and_sorted() {
        let mut rows = match_rows("m2", Some("Team A"), None);
        rows.extend(match_rows("m1", Some("Team B"), None));
        let ds = DataSet::new(schema(), rows);

        let summaries = calculate_match_totals(&ds).unwrap();
        let ids: Vec<_> = summaries.iter().map(|s| s.match_id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);

        let found = find_outcome_discrepancies(&summaries);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].match_id, "m1");
    }

    #[test]
    fn dataset_is_not_modified() {
        let ds = DataSet::new(schema(), match_rows("m1", Some("Team B"), None));
        let before = ds.clone();
        let _ = validate_match_outcomes(&ds).unwrap();
        assert_eq!(ds, before);
    }
}
