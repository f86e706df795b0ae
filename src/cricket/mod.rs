//! Cricket match documents and their flattening into delivery rows.
//!
//! - [`document`]: serde model of one match document (`info` / `meta` / `innings`)
//! - [`metadata`]: [`MatchMetadata`] extraction (teams, toss, outcome, officials, dates)
//! - [`delivery`]: [`DeliveryRecord`] flattening, one record per ball bowled
//! - [`schema`]: the column layout of the delivery dataset

pub mod delivery;
pub mod document;
pub mod metadata;
pub mod schema;

pub use delivery::{flatten_deliveries, flatten_match, records_to_dataset, DeliveryRecord};
pub use document::MatchDocument;
pub use metadata::{MatchMetadata, MetadataIssue};
pub use schema::delivery_schema;
