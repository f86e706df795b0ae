//! Serde model of one match document.
//!
//! Every section and field is optional: a document that omits something deserializes with that
//! piece empty, and the extractor turns it into a null column value. An explicit `null` counts as
//! omitted. Only structurally wrong input (e.g. `innings` being a string) fails to parse.

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// One match: `info` (metadata), `meta` (format version) and the ball-by-ball `innings`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub meta: DocumentMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub info: MatchInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub innings: Vec<Innings>,
}

impl MatchDocument {
    /// Total number of deliveries across all innings and overs.
    pub fn delivery_count(&self) -> usize {
        self.innings
            .iter()
            .flat_map(|i| &i.overs)
            .map(|o| o.deliveries.len())
            .sum()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentMeta {
    pub data_version: Option<Scalar>,
}

/// A JSON scalar whose type is not stable across corpora (e.g. `season: 2019` vs `"2019/20"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl Scalar {
    /// Render as a string so the column type stays stable across files.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Int(v) => v.to_string(),
            // Whole floats keep their fractional digit: 2019.0 renders as "2019.0".
            Scalar::Float(v) if v.is_finite() && v.fract() == 0.0 => format!("{v:.1}"),
            Scalar::Float(v) => v.to_string(),
            Scalar::Text(s) => s.clone(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchInfo {
    pub season: Option<Scalar>,
    #[serde(deserialize_with = "null_as_default")]
    pub dates: Vec<String>,
    pub city: Option<String>,
    pub venue: Option<String>,
    pub balls_per_over: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub event: Event,
    pub gender: Option<String>,
    pub match_type: Option<String>,
    pub match_type_number: Option<i64>,
    pub team_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub teams: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub toss: Toss,
    #[serde(deserialize_with = "null_as_default")]
    pub outcome: Outcome,
    #[serde(deserialize_with = "null_as_default")]
    pub player_of_match: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub officials: Officials,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Event {
    pub name: Option<String>,
    pub match_number: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Toss {
    pub winner: Option<String>,
    pub decision: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Outcome {
    pub winner: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub by: OutcomeMargin,
    /// e.g. `"D/L"`, `"Awarded"`.
    pub method: Option<String>,
    /// e.g. `"draw"`, `"tie"`, `"no result"`.
    pub result: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutcomeMargin {
    pub runs: Option<i64>,
    pub wickets: Option<i64>,
    pub innings: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Officials {
    #[serde(deserialize_with = "null_as_default")]
    pub umpires: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tv_umpires: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub match_referees: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Innings {
    /// Batting team.
    pub team: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub overs: Vec<Over>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Over {
    /// 0-indexed in the source; taken verbatim.
    pub over: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub deliveries: Vec<Delivery>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Delivery {
    pub batter: Option<String>,
    pub bowler: Option<String>,
    pub non_striker: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub runs: Runs,
    #[serde(deserialize_with = "null_as_default")]
    pub extras: Extras,
    #[serde(deserialize_with = "null_as_default")]
    pub wickets: Vec<Wicket>,
    pub review: Option<Review>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Runs {
    pub batter: Option<i64>,
    pub extras: Option<i64>,
    pub total: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Extras {
    pub wides: Option<i64>,
    pub noballs: Option<i64>,
    pub byes: Option<i64>,
    pub legbyes: Option<i64>,
    pub penalty: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Wicket {
    pub player_out: Option<String>,
    pub kind: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub fielders: Vec<Fielder>,
}

/// A fielder credited with a dismissal: either a bare name or an object carrying one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Fielder {
    Name(String),
    Detailed { name: Option<String> },
    Other(serde_json::Value),
}

impl Fielder {
    /// Plain name of the fielder, if one can be recovered.
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            Fielder::Name(name) => Some(name.as_str()),
            Fielder::Detailed { name } => name.as_deref(),
            Fielder::Other(_) => None,
        };
        name.filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Review {
    pub by: Option<String>,
    pub umpire: Option<String>,
    pub batter: Option<String>,
    pub decision: Option<String>,
    #[serde(rename = "type")]
    pub review_type: Option<String>,
}
