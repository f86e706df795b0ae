//! Match-level metadata extraction.

use std::fmt;

use tracing::warn;

use crate::types::Value;

use super::document::MatchDocument;

/// A gap in a document's match-level information. Reported as a warning; never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataIssue {
    /// Carries the number of teams found.
    FewerThanTwoTeams(usize),
    MissingVenue,
    MissingMatchType,
}

impl MetadataIssue {
    pub fn find(doc: &MatchDocument) -> Vec<Self> {
        let info = &doc.info;
        let mut issues = Vec::new();
        if info.teams.len() < 2 {
            issues.push(Self::FewerThanTwoTeams(info.teams.len()));
        }
        if info.venue.as_deref().is_none_or(str::is_empty) {
            issues.push(Self::MissingVenue);
        }
        if info.match_type.as_deref().is_none_or(str::is_empty) {
            issues.push(Self::MissingMatchType);
        }
        issues
    }
}

impl fmt::Display for MetadataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FewerThanTwoTeams(n) => write!(f, "fewer than two teams found ({n})"),
            Self::MissingVenue => f.write_str("Missing venue"),
            Self::MissingMatchType => f.write_str("Missing match_type"),
        }
    }
}

/// Flat, match-level fields shared by every delivery of one match.
///
/// Extraction never fails: anything the document omits is `None`. Team assignment is positional
/// (`teams[0]` is `team_a`, `teams[1]` is `team_b`). List-valued officials are cut down to fixed
/// slots and extra entries are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchMetadata {
    pub match_id: String,
    pub data_version: Option<String>,
    pub season: Option<String>,
    /// All match dates, comma-joined.
    pub dates: Option<String>,
    pub start_date: Option<String>,
    pub city: Option<String>,
    pub venue: Option<String>,
    pub balls_per_over: Option<i64>,
    pub event_name: Option<String>,
    pub event_match_number: Option<i64>,
    pub gender: Option<String>,
    pub match_type: Option<String>,
    pub match_type_number: Option<i64>,
    pub team_type: Option<String>,
    pub team_a: Option<String>,
    pub team_b: Option<String>,
    pub toss_winner: Option<String>,
    pub toss_decision: Option<String>,
    pub outcome_winner: Option<String>,
    pub outcome_by_runs: Option<i64>,
    pub outcome_by_wickets: Option<i64>,
    pub outcome_by_innings: Option<i64>,
    pub outcome_method: Option<String>,
    pub outcome_result: Option<String>,
    /// Comma-joined.
    pub player_of_match: Option<String>,
    pub umpire_1: Option<String>,
    pub umpire_2: Option<String>,
    pub tv_umpire: Option<String>,
    pub match_referee: Option<String>,
}

impl MatchMetadata {
    /// Extract match metadata from a document. `match_id` comes from outside the document
    /// (the file stem).
    pub fn extract(doc: &MatchDocument, match_id: &str) -> Self {
        let info = &doc.info;

        for issue in MetadataIssue::find(doc) {
            warn!(match_id, "Match {match_id}: {issue}");
        }

        let officials = &info.officials;

        Self {
            match_id: match_id.to_string(),
            data_version: doc.meta.data_version.as_ref().map(|v| v.to_text()),
            season: info.season.as_ref().map(|s| s.to_text()),
            dates: join_non_empty(&info.dates),
            start_date: info.dates.first().cloned(),
            city: info.city.clone(),
            venue: info.venue.clone(),
            balls_per_over: info.balls_per_over,
            event_name: info.event.name.clone(),
            event_match_number: info.event.match_number,
            gender: info.gender.clone(),
            match_type: info.match_type.clone(),
            match_type_number: info.match_type_number,
            team_type: info.team_type.clone(),
            team_a: info.teams.first().cloned(),
            team_b: info.teams.get(1).cloned(),
            toss_winner: info.toss.winner.clone(),
            toss_decision: info.toss.decision.clone(),
            outcome_winner: info.outcome.winner.clone(),
            outcome_by_runs: info.outcome.by.runs,
            outcome_by_wickets: info.outcome.by.wickets,
            outcome_by_innings: info.outcome.by.innings,
            outcome_method: info.outcome.method.clone(),
            outcome_result: info.outcome.result.clone(),
            player_of_match: join_non_empty(&info.player_of_match),
            umpire_1: officials.umpires.first().cloned(),
            umpire_2: officials.umpires.get(1).cloned(),
            tv_umpire: officials.tv_umpires.first().cloned(),
            match_referee: officials.match_referees.first().cloned(),
        }
    }

    /// The team that is not `batting_team`, or `None` if `batting_team` is neither recorded team.
    pub fn opponent_of(&self, batting_team: Option<&str>) -> Option<&str> {
        let batting = batting_team?;
        let opponent = if self.team_a.as_deref() == Some(batting) {
            self.team_b.as_deref()
        } else if self.team_b.as_deref() == Some(batting) {
            self.team_a.as_deref()
        } else {
            None
        };
        // A document listing the same team twice must not yield bowling == batting.
        opponent.filter(|team| *team != batting)
    }

    /// Row values in [`super::schema::MATCH_COLUMNS`] order.
    pub fn values(&self) -> Vec<Value> {
        vec![
            Value::Utf8(self.match_id.clone()),
            self.data_version.clone().into(),
            self.season.clone().into(),
            self.dates.clone().into(),
            self.start_date.clone().into(),
            self.city.clone().into(),
            self.venue.clone().into(),
            self.balls_per_over.into(),
            self.event_name.clone().into(),
            self.event_match_number.into(),
            self.gender.clone().into(),
            self.match_type.clone().into(),
            self.match_type_number.into(),
            self.team_type.clone().into(),
            self.team_a.clone().into(),
            self.team_b.clone().into(),
            self.toss_winner.clone().into(),
            self.toss_decision.clone().into(),
            self.outcome_winner.clone().into(),
            self.outcome_by_runs.into(),
            self.outcome_by_wickets.into(),
            self.outcome_by_innings.into(),
            self.outcome_method.clone().into(),
            self.outcome_result.clone().into(),
            self.player_of_match.clone().into(),
            self.umpire_1.clone().into(),
            self.umpire_2.clone().into(),
            self.tv_umpire.clone().into(),
            self.match_referee.clone().into(),
        ]
    }
}

fn join_non_empty(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchMetadata, MetadataIssue};
    use crate::cricket::document::MatchDocument;
    use crate::cricket::schema::MATCH_COLUMNS;
    use crate::types::Value;

    fn doc(json: &str) -> MatchDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn extracts_positional_teams_and_official_slots() {
        let d = doc(
            r#"{
                "meta": {"data_version": "1.1.0"},
                "info": {
                    "season": 2016,
                    "dates": ["2016-01-02", "2016-01-03"],
                    "venue": "Newlands",
                    "match_type": "Test",
                    "teams": ["South Africa", "England"],
                    "officials": {
                        "umpires": ["A", "B", "C"],
                        "tv_umpires": ["D", "E"],
                        "match_referees": ["F"]
                    },
                    "player_of_match": ["BA Stokes", "HM Amla"]
                }
            }"#,
        );
        let m = MatchMetadata::extract(&d, "64012");

        assert_eq!(m.match_id, "64012");
        assert_eq!(m.season.as_deref(), Some("2016"));
        assert_eq!(m.data_version.as_deref(), Some("1.1.0"));
        assert_eq!(m.dates.as_deref(), Some("2016-01-02,2016-01-03"));
        assert_eq!(m.start_date.as_deref(), Some("2016-01-02"));
        assert_eq!(m.team_a.as_deref(), Some("South Africa"));
        assert_eq!(m.team_b.as_deref(), Some("England"));
        assert_eq!(m.umpire_1.as_deref(), Some("A"));
        assert_eq!(m.umpire_2.as_deref(), Some("B"));
        assert_eq!(m.tv_umpire.as_deref(), Some("D"));
        assert_eq!(m.match_referee.as_deref(), Some("F"));
        assert_eq!(m.player_of_match.as_deref(), Some("BA Stokes,HM Amla"));
    }

    #[test]
    fn missing_fields_degrade_to_null() {
        let m = MatchMetadata::extract(&doc(r#"{"info": {"teams": ["Only One"]}}"#), "x");
        assert_eq!(m.team_a.as_deref(), Some("Only One"));
        assert_eq!(m.team_b, None);
        assert_eq!(m.start_date, None);
        assert_eq!(m.dates, None);
        assert_eq!(m.season, None);
        assert_eq!(m.venue, None);

        let values = m.values();
        assert_eq!(values.len(), MATCH_COLUMNS.len());
        assert_eq!(values[0], Value::Utf8("x".to_string()));
        assert!(values[1..].iter().filter(|v| !v.is_null()).count() == 1);
    }

    #[test]
    fn opponent_is_positional() {
        let m = MatchMetadata::extract(&doc(r#"{"info": {"teams": ["India", "Australia"]}}"#), "m");
        assert_eq!(m.opponent_of(Some("India")), Some("Australia"));
        assert_eq!(m.opponent_of(Some("Australia")), Some("India"));
        assert_eq!(m.opponent_of(Some("Ireland")), None);
        assert_eq!(m.opponent_of(None), None);

        let same = MatchMetadata::extract(&doc(r#"{"info": {"teams": ["India", "India"]}}"#), "m");
        assert_eq!(same.opponent_of(Some("India")), None);
    }

    #[test]
    fn gaps_are_reported_as_issues() {
        let sparse = doc(r#"{"info": {"teams": ["Only One"], "venue": ""}}"#);
        assert_eq!(
            MetadataIssue::find(&sparse),
            vec![
                MetadataIssue::FewerThanTwoTeams(1),
                MetadataIssue::MissingVenue,
                MetadataIssue::MissingMatchType,
            ]
        );
        assert_eq!(
            MetadataIssue::FewerThanTwoTeams(1).to_string(),
            "fewer than two teams found (1)"
        );

        let complete = doc(
            r#"{"info": {"teams": ["A", "B"], "venue": "Lord's", "match_type": "Test"}}"#,
        );
        assert!(MetadataIssue::find(&complete).is_empty());
    }
}
