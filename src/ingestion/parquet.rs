//! Parquet reading for persisted delivery datasets.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use parquet::basic::Type as PhysicalType;
use parquet::file::reader::{ChunkReader, FileReader};
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::Field;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{self, DataSet, DataType, Schema, Value};

/// Read a parquet file, inferring the [`Schema`] from its leaf columns.
///
/// INT32/INT64 map to [`DataType::Int64`], FLOAT/DOUBLE to [`DataType::Float64`], BOOLEAN to
/// [`DataType::Bool`] and BYTE_ARRAY to [`DataType::Utf8`]. Any other physical type is a
/// [`PipelineError::SchemaMismatch`].
pub fn read_parquet(path: impl AsRef<Path>) -> PipelineResult<DataSet> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;
    let schema = infer_schema(&reader)?;
    read_rows(reader, &schema)
}

fn read_rows(reader: SerializedFileReader<File>, schema: &Schema) -> PipelineResult<DataSet> {
    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (idx0, row_res) in reader.into_iter().enumerate() {
        let row_num = idx0 + 1;
        let row = row_res?;

        let mut map: HashMap<&str, &Field> = HashMap::new();
        for (name, field) in row.get_column_iter() {
            map.insert(name.as_str(), field);
        }

        let mut out_row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for f in &schema.fields {
            let v = map.get(f.name.as_str()).ok_or_else(|| PipelineError::SchemaMismatch {
                message: format!("row {row_num} missing required column '{}'", f.name),
            })?;
            out_row.push(convert_parquet_field(row_num, &f.name, f.data_type, v)?);
        }
        rows.push(out_row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn infer_schema<R: ChunkReader + 'static>(reader: &SerializedFileReader<R>) -> PipelineResult<Schema> {
    let mut fields = Vec::new();
    for c in reader.metadata().file_metadata().schema_descr().columns() {
        let name = c.path().string();
        let data_type = match c.physical_type() {
            PhysicalType::INT32 | PhysicalType::INT64 => DataType::Int64,
            PhysicalType::FLOAT | PhysicalType::DOUBLE => DataType::Float64,
            PhysicalType::BOOLEAN => DataType::Bool,
            PhysicalType::BYTE_ARRAY => DataType::Utf8,
            other => {
                return Err(PipelineError::SchemaMismatch {
                    message: format!("unsupported parquet type {other:?} for column '{name}'"),
                });
            }
        };
        fields.push(types::Field::new(name, data_type));
    }
    Ok(Schema::new(fields))
}

fn convert_parquet_field(
    row: usize,
    column: &str,
    data_type: DataType,
    f: &Field,
) -> PipelineResult<Value> {
    if let Field::Null = f {
        return Ok(Value::Null);
    }

    let mismatch = |message: &str| PipelineError::ParseError {
        row,
        column: column.to_string(),
        raw: f.to_string(),
        message: message.to_string(),
    };

    match data_type {
        DataType::Utf8 => match f {
            Field::Str(s) => Ok(Value::Utf8(s.clone())),
            _ => Err(mismatch("expected string")),
        },
        DataType::Bool => match f {
            Field::Bool(b) => Ok(Value::Bool(*b)),
            _ => Err(mismatch("expected bool")),
        },
        DataType::Int64 => match f {
            Field::Byte(v) => Ok(Value::Int64(i64::from(*v))),
            Field::Short(v) => Ok(Value::Int64(i64::from(*v))),
            Field::Int(v) => Ok(Value::Int64(i64::from(*v))),
            Field::Long(v) => Ok(Value::Int64(*v)),
            Field::UByte(v) => Ok(Value::Int64(i64::from(*v))),
            Field::UShort(v) => Ok(Value::Int64(i64::from(*v))),
            Field::UInt(v) => Ok(Value::Int64(i64::from(*v))),
            Field::ULong(v) => i64::try_from(*v)
                .map(Value::Int64)
                .map_err(|_| mismatch("u64 out of range for i64")),
            _ => Err(mismatch("expected integer")),
        },
        DataType::Float64 => match f {
            Field::Float(v) => Ok(Value::Float64(f64::from(*v))),
            Field::Double(v) => Ok(Value::Float64(*v)),
            _ => Err(mismatch("expected number")),
        },
    }
}
