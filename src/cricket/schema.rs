//! Column layout of the delivery-level dataset.

use crate::types::{DataType, Field, Schema};

/// Match-level columns, in output order. Every delivery row repeats these.
pub const MATCH_COLUMNS: &[(&str, DataType)] = &[
    ("match_id", DataType::Utf8),
    ("data_version", DataType::Utf8),
    ("season", DataType::Utf8),
    ("dates", DataType::Utf8),
    ("start_date", DataType::Utf8),
    ("city", DataType::Utf8),
    ("venue", DataType::Utf8),
    ("balls_per_over", DataType::Int64),
    ("event_name", DataType::Utf8),
    ("event_match_number", DataType::Int64),
    ("gender", DataType::Utf8),
    ("match_type", DataType::Utf8),
    ("match_type_number", DataType::Int64),
    ("team_type", DataType::Utf8),
    ("team_a", DataType::Utf8),
    ("team_b", DataType::Utf8),
    ("toss_winner", DataType::Utf8),
    ("toss_decision", DataType::Utf8),
    ("outcome_winner", DataType::Utf8),
    ("outcome_by_runs", DataType::Int64),
    ("outcome_by_wickets", DataType::Int64),
    ("outcome_by_innings", DataType::Int64),
    ("outcome_method", DataType::Utf8),
    ("outcome_result", DataType::Utf8),
    ("player_of_match", DataType::Utf8),
    ("umpire_1", DataType::Utf8),
    ("umpire_2", DataType::Utf8),
    ("tv_umpire", DataType::Utf8),
    ("match_referee", DataType::Utf8),
];

/// Per-ball columns, in output order, following [`MATCH_COLUMNS`].
pub const DELIVERY_COLUMNS: &[(&str, DataType)] = &[
    ("innings_num", DataType::Int64),
    ("batting_team", DataType::Utf8),
    ("bowling_team", DataType::Utf8),
    ("over", DataType::Int64),
    ("ball", DataType::Int64),
    ("batter", DataType::Utf8),
    ("bowler", DataType::Utf8),
    ("non_striker", DataType::Utf8),
    ("runs_batter", DataType::Int64),
    ("runs_extras", DataType::Int64),
    ("runs_total", DataType::Int64),
    ("extras_wides", DataType::Int64),
    ("extras_noballs", DataType::Int64),
    ("extras_byes", DataType::Int64),
    ("extras_legbyes", DataType::Int64),
    ("extras_penalty", DataType::Int64),
    ("is_wicket", DataType::Int64),
    ("player_out", DataType::Utf8),
    ("dismissal_kind", DataType::Utf8),
    ("fielder_1", DataType::Utf8),
    ("fielder_2", DataType::Utf8),
    ("review_by", DataType::Utf8),
    ("review_umpire", DataType::Utf8),
    ("review_batter", DataType::Utf8),
    ("review_decision", DataType::Utf8),
    ("review_type", DataType::Utf8),
];

/// The full delivery schema: [`MATCH_COLUMNS`] followed by [`DELIVERY_COLUMNS`].
pub fn delivery_schema() -> Schema {
    Schema::new(
        MATCH_COLUMNS
            .iter()
            .chain(DELIVERY_COLUMNS)
            .map(|&(name, data_type)| Field::new(name, data_type))
            .collect(),
    )
}
