//! Parquet persistence of delivery datasets.
//!
//! Every column is written OPTIONAL so nulls survive a round trip through disk.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use parquet::column::writer::ColumnWriter;
use parquet::data_type::ByteArray;
use parquet::file::properties::WriterProperties;
use parquet::file::writer::{SerializedColumnWriter, SerializedFileWriter};
use parquet::schema::parser::parse_message_type;
use tracing::info;

use crate::cricket::delivery_schema;
use crate::error::{PipelineError, PipelineResult};
use crate::ingestion::parquet::read_parquet;
use crate::types::{DataSet, DataType, Schema, Value};

/// Write `dataset` to `path`, creating parent directories as needed.
///
/// A dataset without columns (e.g. a corpus where every match was empty) is written with the full
/// delivery schema and no rows, so downstream readers still see the expected columns.
pub fn save_to_parquet(
    dataset: &DataSet,
    path: impl AsRef<Path>,
    description: &str,
) -> PipelineResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let schema = if dataset.schema.fields.is_empty() {
        delivery_schema()
    } else {
        dataset.schema.clone()
    };

    let parquet_schema = Arc::new(parse_message_type(&message_type(&schema))?);
    let props = Arc::new(WriterProperties::builder().build());
    let file = File::create(path)?;
    let mut writer = SerializedFileWriter::new(file, parquet_schema, props)?;

    if !dataset.rows.is_empty() {
        let mut rg = writer.next_row_group()?;
        let mut col_idx: usize = 0;
        while let Some(mut col) = rg.next_column()? {
            let field = &schema.fields[col_idx];
            write_column(&mut col, dataset, col_idx, &field.name)?;
            col.close()?;
            col_idx += 1;
        }
        rg.close()?;
    }
    writer.close()?;

    info!(
        "{description} saved to {} ({} rows)",
        path.display(),
        dataset.row_count()
    );
    Ok(())
}

/// Load a dataset previously written by [`save_to_parquet`].
///
/// A missing file is [`PipelineError::MissingDataset`]: the stage that produces it has not run.
pub fn load_from_parquet(path: impl AsRef<Path>, description: &str) -> PipelineResult<DataSet> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PipelineError::MissingDataset {
            description: description.to_string(),
            path: path.to_path_buf(),
        });
    }

    let dataset = read_parquet(path)?;
    info!(
        "{description} loaded from {} ({} rows)",
        path.display(),
        dataset.row_count()
    );
    Ok(dataset)
}

fn message_type(schema: &Schema) -> String {
    let mut out = String::from("message schema {\n");
    for field in &schema.fields {
        let decl = match field.data_type {
            DataType::Int64 => format!("  OPTIONAL INT64 {};\n", field.name),
            DataType::Float64 => format!("  OPTIONAL DOUBLE {};\n", field.name),
            DataType::Bool => format!("  OPTIONAL BOOLEAN {};\n", field.name),
            DataType::Utf8 => format!("  OPTIONAL BINARY {} (UTF8);\n", field.name),
        };
        out.push_str(&decl);
    }
    out.push('}');
    out
}

fn write_column(
    col: &mut SerializedColumnWriter<'_>,
    dataset: &DataSet,
    idx: usize,
    column: &str,
) -> PipelineResult<()> {
    match col.untyped() {
        ColumnWriter::Int64ColumnWriter(w) => {
            let (values, def_levels) = collect_column(dataset, idx, column, Value::as_i64)?;
            w.write_batch(&values, Some(def_levels.as_slice()), None)?;
        }
        ColumnWriter::DoubleColumnWriter(w) => {
            let (values, def_levels) = collect_column(dataset, idx, column, |v| match v {
                Value::Float64(f) => Some(*f),
                _ => None,
            })?;
            w.write_batch(&values, Some(def_levels.as_slice()), None)?;
        }
        ColumnWriter::BoolColumnWriter(w) => {
            let (values, def_levels) = collect_column(dataset, idx, column, |v| match v {
                Value::Bool(b) => Some(*b),
                _ => None,
            })?;
            w.write_batch(&values, Some(def_levels.as_slice()), None)?;
        }
        ColumnWriter::ByteArrayColumnWriter(w) => {
            let (values, def_levels) =
                collect_column(dataset, idx, column, |v| v.as_str().map(ByteArray::from))?;
            w.write_batch(&values, Some(def_levels.as_slice()), None)?;
        }
        _ => {
            return Err(PipelineError::SchemaMismatch {
                message: format!("unexpected parquet writer for column '{column}'"),
            });
        }
    }
    Ok(())
}

/// Non-null values of one column plus a definition level per row (0 = null, 1 = present).
fn collect_column<T>(
    dataset: &DataSet,
    idx: usize,
    column: &str,
    extract: impl Fn(&Value) -> Option<T>,
) -> PipelineResult<(Vec<T>, Vec<i16>)> {
    let mut values = Vec::with_capacity(dataset.row_count());
    let mut def_levels = Vec::with_capacity(dataset.row_count());
    for (row_idx, row) in dataset.rows.iter().enumerate() {
        let value = &row[idx];
        if value.is_null() {
            def_levels.push(0);
            continue;
        }
        let typed = extract(value).ok_or_else(|| PipelineError::ParseError {
            row: row_idx + 1,
            column: column.to_string(),
            raw: format!("{value:?}"),
            message: "value does not match column type".to_string(),
        })?;
        values.push(typed);
        def_levels.push(1);
    }
    Ok((values, def_levels))
}
