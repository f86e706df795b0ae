use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use howzat::cricket::{flatten_match, MatchDocument};
use howzat::ingestion::parse_match_document;
use howzat::types::DataSet;

/// A synthetic two-innings match with `overs` six-ball overs per side.
fn synthetic_match(overs: usize) -> String {
    let innings = |team: &str, bowler: &str| {
        let over_docs: Vec<String> = (0..overs)
            .map(|o| {
                let balls: Vec<String> = (0..6)
                    .map(|b| {
                        format!(
                            r#"{{"batter":"{team} bat {b}","bowler":"{bowler}","non_striker":"{team} ns",
                               "runs":{{"batter":{r},"extras":0,"total":{r}}}}}"#,
                            r = (o + b) % 5
                        )
                    })
                    .collect();
                format!(r#"{{"over":{o},"deliveries":[{}]}}"#, balls.join(","))
            })
            .collect();
        format!(r#"{{"team":"{team}","overs":[{}]}}"#, over_docs.join(","))
    };
    format!(
        r#"{{"meta":{{"data_version":"1.1.0"}},
            "info":{{"dates":["2019-06-16"],"teams":["Home","Away"],"venue":"Ground","match_type":"ODI",
                     "outcome":{{"winner":"Home","by":{{"runs":1}}}}}},
            "innings":[{},{}]}}"#,
        innings("Home", "away bowler"),
        innings("Away", "home bowler")
    )
}

fn bench_flatten(c: &mut Criterion) {
    let odi = synthetic_match(50);
    let doc: MatchDocument = match parse_match_document(&odi) {
        Ok(doc) => doc,
        Err(e) => panic!("synthetic match should parse: {e}"),
    };

    c.bench_function("parse_odi_document", |b| {
        b.iter(|| parse_match_document(black_box(&odi)))
    });
    c.bench_function("flatten_odi", |b| {
        b.iter(|| flatten_match(black_box(&doc), "bench"))
    });
    c.bench_function("concat_ten_odis", |b| {
        b.iter(|| {
            let frames: Vec<DataSet> = (0..10)
                .map(|i| flatten_match(&doc, &i.to_string()).drop_all_null_columns())
                .collect();
            DataSet::concat(black_box(frames))
        })
    });
}

criterion_group!(benches, bench_flatten);
criterion_main!(benches);
