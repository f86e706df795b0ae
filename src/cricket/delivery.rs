//! Ball-by-ball flattening.
//!
//! A [`MatchDocument`] is walked in document order (innings, then over, then delivery) and each
//! delivery becomes one [`DeliveryRecord`]. Records borrow the match's [`MatchMetadata`] rather
//! than copying it; the copy into every row happens once, when records are assembled into a
//! [`DataSet`].

use tracing::{debug, warn};

use crate::types::{DataSet, Value};

use super::document::{Delivery, Fielder, MatchDocument, Review, Wicket};
use super::metadata::MatchMetadata;
use super::schema::delivery_schema;

/// The first dismissal recorded on a delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WicketDetail {
    pub player_out: Option<String>,
    pub kind: Option<String>,
    pub fielder_1: Option<String>,
    pub fielder_2: Option<String>,
}

impl WicketDetail {
    fn from_wicket(wicket: &Wicket) -> Self {
        let mut names = wicket.fielders.iter().filter_map(Fielder::name);
        Self {
            player_out: wicket.player_out.clone(),
            kind: wicket.kind.clone(),
            fielder_1: names.next().map(str::to_string),
            fielder_2: names.next().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDetail {
    pub by: Option<String>,
    pub umpire: Option<String>,
    pub batter: Option<String>,
    pub decision: Option<String>,
    pub review_type: Option<String>,
}

impl From<&Review> for ReviewDetail {
    fn from(r: &Review) -> Self {
        Self {
            by: r.by.clone(),
            umpire: r.umpire.clone(),
            batter: r.batter.clone(),
            decision: r.decision.clone(),
            review_type: r.review_type.clone(),
        }
    }
}

/// One ball bowled, together with the metadata of the match it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRecord<'m> {
    pub metadata: &'m MatchMetadata,
    /// 1-indexed.
    pub innings_num: i64,
    pub batting_team: Option<String>,
    pub bowling_team: Option<String>,
    /// As given by the source (0-indexed); not checked for contiguity.
    pub over: Option<i64>,
    /// 1-indexed position within the over, restarting every over.
    pub ball: i64,
    pub batter: Option<String>,
    pub bowler: Option<String>,
    pub non_striker: Option<String>,
    pub runs_batter: Option<i64>,
    pub runs_extras: Option<i64>,
    pub runs_total: Option<i64>,
    pub extras_wides: Option<i64>,
    pub extras_noballs: Option<i64>,
    pub extras_byes: Option<i64>,
    pub extras_legbyes: Option<i64>,
    pub extras_penalty: Option<i64>,
    /// `Some` iff the delivery listed at least one dismissal; only the first one is kept.
    pub wicket: Option<WicketDetail>,
    pub review: Option<ReviewDetail>,
}

impl DeliveryRecord<'_> {
    pub fn is_wicket(&self) -> bool {
        self.wicket.is_some()
    }

    /// Full row values: match columns followed by delivery columns, matching
    /// [`delivery_schema`].
    pub fn to_row(&self) -> Vec<Value> {
        let mut row = self.metadata.values();
        let wicket = self.wicket.clone().unwrap_or_default();
        let review = self.review.clone().unwrap_or_default();

        row.extend([
            Value::Int64(self.innings_num),
            self.batting_team.clone().into(),
            self.bowling_team.clone().into(),
            self.over.into(),
            Value::Int64(self.ball),
            self.batter.clone().into(),
            self.bowler.clone().into(),
            self.non_striker.clone().into(),
            self.runs_batter.into(),
            self.runs_extras.into(),
            self.runs_total.into(),
            self.extras_wides.into(),
            self.extras_noballs.into(),
            self.extras_byes.into(),
            self.extras_legbyes.into(),
            self.extras_penalty.into(),
            Value::Int64(i64::from(self.is_wicket())),
            wicket.player_out.into(),
            wicket.kind.into(),
            wicket.fielder_1.into(),
            wicket.fielder_2.into(),
            review.by.into(),
            review.umpire.into(),
            review.batter.into(),
            review.decision.into(),
            review.review_type.into(),
        ]);
        row
    }
}

/// Flatten every delivery of `doc` into records, in innings/over/ball order.
///
/// A document without innings or deliveries yields no records; that is reported as a warning, not
/// an error.
pub fn flatten_deliveries<'m>(
    doc: &MatchDocument,
    metadata: &'m MatchMetadata,
) -> Vec<DeliveryRecord<'m>> {
    let match_id = metadata.match_id.as_str();
    if doc.innings.is_empty() {
        warn!(match_id, "Match {match_id}: No innings data found");
        return Vec::new();
    }

    let mut records = Vec::with_capacity(doc.delivery_count());
    for (innings_idx, innings) in doc.innings.iter().enumerate() {
        let innings_num = innings_idx as i64 + 1;
        let batting_team = innings.team.as_deref().filter(|t| !t.is_empty());
        if batting_team.is_none() {
            warn!(
                match_id,
                innings_num, "Match {match_id}, Innings {innings_num}: Missing batting team"
            );
        }
        let bowling_team = metadata.opponent_of(batting_team);

        for over in &innings.overs {
            for (ball_idx, delivery) in over.deliveries.iter().enumerate() {
                let ball = ball_idx as i64 + 1;
                if delivery.wickets.len() > 1 {
                    debug!(
                        match_id,
                        "Match {match_id}, Over {}.{ball}: Multiple wickets ({}) on single delivery",
                        over.over.map(|o| o.to_string()).unwrap_or_default(),
                        delivery.wickets.len()
                    );
                }
                records.push(build_record(
                    metadata,
                    innings_num,
                    innings.team.clone(),
                    bowling_team,
                    over.over,
                    ball,
                    delivery,
                ));
            }
        }
    }

    if records.is_empty() {
        warn!(match_id, "Match {match_id}: No deliveries found");
    }
    records
}

fn build_record<'m>(
    metadata: &'m MatchMetadata,
    innings_num: i64,
    batting_team: Option<String>,
    bowling_team: Option<&str>,
    over: Option<i64>,
    ball: i64,
    delivery: &Delivery,
) -> DeliveryRecord<'m> {
    DeliveryRecord {
        metadata,
        innings_num,
        batting_team,
        bowling_team: bowling_team.map(str::to_string),
        over,
        ball,
        batter: delivery.batter.clone(),
        bowler: delivery.bowler.clone(),
        non_striker: delivery.non_striker.clone(),
        runs_batter: delivery.runs.batter,
        runs_extras: delivery.runs.extras,
        runs_total: delivery.runs.total,
        extras_wides: delivery.extras.wides,
        extras_noballs: delivery.extras.noballs,
        extras_byes: delivery.extras.byes,
        extras_legbyes: delivery.extras.legbyes,
        extras_penalty: delivery.extras.penalty,
        wicket: delivery.wickets.first().map(WicketDetail::from_wicket),
        review: delivery.review.as_ref().map(ReviewDetail::from),
    }
}

/// Assemble records into a [`DataSet`] with the full [`delivery_schema`].
pub fn records_to_dataset(records: &[DeliveryRecord<'_>]) -> DataSet {
    DataSet::new(
        delivery_schema(),
        records.iter().map(DeliveryRecord::to_row).collect(),
    )
}

/// Extract metadata and flatten one document straight into a [`DataSet`].
pub fn flatten_match(doc: &MatchDocument, match_id: &str) -> DataSet {
    let metadata = MatchMetadata::extract(doc, match_id);
    let records = flatten_deliveries(doc, &metadata);
    records_to_dataset(&records)
}

#[cfg(test)]
mod tests {
    use super::{flatten_deliveries, flatten_match};
    use crate::cricket::document::MatchDocument;
    use crate::cricket::metadata::MatchMetadata;
    use crate::types::Value;

    const TWO_INNINGS: &str = r#"{
        "info": {"teams": ["Kent", "Surrey"], "dates": ["2019-05-01"]},
        "innings": [
            {"team": "Kent", "overs": [
                {"over": 0, "deliveries": [
                    {"batter": "a", "bowler": "x", "non_striker": "b",
                     "runs": {"batter": 4, "extras": 0, "total": 4}},
                    {"batter": "a", "bowler": "x", "non_striker": "b",
                     "runs": {"batter": 0, "extras": 1, "total": 1}, "extras": {"wides": 1}},
                    {"batter": "a", "bowler": "x", "non_striker": "b",
                     "runs": {"batter": 0, "extras": 0, "total": 0},
                     "wickets": [
                        {"player_out": "a", "kind": "caught", "fielders": [{"name": "y"}, "z", "w"]},
                        {"player_out": "b", "kind": "run out"}
                     ]}
                ]},
                {"over": 1, "deliveries": [
                    {"batter": "c", "bowler": "q", "non_striker": "b",
                     "runs": {"batter": 1, "extras": 0, "total": 1},
                     "review": {"by": "Surrey", "umpire": "U1", "batter": "c", "decision": "struck down", "type": "wicket"}}
                ]}
            ]},
            {"team": "Surrey", "overs": [
                {"over": 0, "deliveries": [
                    {"batter": "x", "bowler": "a", "non_striker": "q",
                     "runs": {"batter": 2, "extras": 0, "total": 2}}
                ]}
            ]}
        ]
    }"#;

    #[test]
    fn yields_one_record_per_delivery_in_order() {
        let doc: MatchDocument = serde_json::from_str(TWO_INNINGS).unwrap();
        let meta = MatchMetadata::extract(&doc, "m1");
        let records = flatten_deliveries(&doc, &meta);

        assert_eq!(records.len(), doc.delivery_count());
        let positions: Vec<_> = records
            .iter()
            .map(|r| (r.innings_num, r.over, r.ball))
            .collect();
        assert_eq!(
            positions,
            vec![
                (1, Some(0), 1),
                (1, Some(0), 2),
                (1, Some(0), 3),
                (1, Some(1), 1),
                (2, Some(0), 1),
            ]
        );
        assert_eq!(records[1].extras_wides, Some(1));
        assert_eq!(records[4].bowling_team.as_deref(), Some("Kent"));
        assert_eq!(records[0].bowling_team.as_deref(), Some("Surrey"));
    }

    #[test]
    fn wicket_keeps_first_dismissal_and_two_fielders() {
        let doc: MatchDocument = serde_json::from_str(TWO_INNINGS).unwrap();
        let meta = MatchMetadata::extract(&doc, "m1");
        let records = flatten_deliveries(&doc, &meta);

        let wicket = records[2].wicket.as_ref().unwrap();
        assert_eq!(wicket.player_out.as_deref(), Some("a"));
        assert_eq!(wicket.kind.as_deref(), Some("caught"));
        assert_eq!(wicket.fielder_1.as_deref(), Some("y"));
        assert_eq!(wicket.fielder_2.as_deref(), Some("z"));

        for r in records.iter().filter(|r| !r.is_wicket()) {
            assert!(r.wicket.is_none());
        }
        assert_eq!(records.iter().filter(|r| r.is_wicket()).count(), 1);
    }

    #[test]
    fn review_only_when_present() {
        let doc: MatchDocument = serde_json::from_str(TWO_INNINGS).unwrap();
        let meta = MatchMetadata::extract(&doc, "m1");
        let records = flatten_deliveries(&doc, &meta);

        let review = records[3].review.as_ref().unwrap();
        assert_eq!(review.by.as_deref(), Some("Surrey"));
        assert_eq!(review.review_type.as_deref(), Some("wicket"));
        assert_eq!(records.iter().filter(|r| r.review.is_some()).count(), 1);
    }

    #[test]
    fn unknown_batting_team_has_no_bowling_team() {
        let doc: MatchDocument = serde_json::from_str(
            r#"{"info": {"teams": ["Kent", "Surrey"]},
                "innings": [{"team": "Essex", "overs": [{"over": 0, "deliveries": [{}]}]}]}"#,
        )
        .unwrap();
        let meta = MatchMetadata::extract(&doc, "m2");
        let records = flatten_deliveries(&doc, &meta);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].batting_team.as_deref(), Some("Essex"));
        assert_eq!(records[0].bowling_team, None);
    }

    #[test]
    fn no_innings_or_no_deliveries_yield_nothing() {
        let no_innings: MatchDocument =
            serde_json::from_str(r#"{"info": {"teams": ["A", "B"]}, "innings": []}"#).unwrap();
        let no_deliveries: MatchDocument = serde_json::from_str(
            r#"{"info": {"teams": ["A", "B"]}, "innings": [{"team": "A", "overs": []}]}"#,
        )
        .unwrap();

        assert!(flatten_match(&no_innings, "e1").is_empty());
        assert!(flatten_match(&no_deliveries, "e2").is_empty());
    }

    #[test]
    fn rows_carry_metadata_and_wicket_flag() {
        let doc: MatchDocument = serde_json::from_str(TWO_INNINGS).unwrap();
        let ds = flatten_match(&doc, "m1");
        let wicket_idx = ds.schema.index_of("is_wicket").unwrap();
        let player_out_idx = ds.schema.index_of("player_out").unwrap();
        let team_a_idx = ds.schema.index_of("team_a").unwrap();

        assert_eq!(ds.row_count(), 5);
        for row in &ds.rows {
            assert_eq!(row.len(), ds.schema.fields.len());
            assert_eq!(row[team_a_idx], Value::Utf8("Kent".to_string()));
            if row[wicket_idx] == Value::Int64(0) {
                assert!(row[player_out_idx].is_null());
            }
        }
        assert_eq!(ds.rows[2][wicket_idx], Value::Int64(1));
    }
}
