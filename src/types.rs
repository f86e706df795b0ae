//! Core tabular types.
//!
//! Flattened deliveries are assembled into an in-memory [`DataSet`]: a [`Schema`] (ordered, typed
//! [`Field`]s) plus row-major [`Value`] storage. The same type is what gets persisted to and read
//! back from parquet.

use std::collections::HashMap;

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// An ordered list of fields describing row shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the string payload, if this is a [`Value::Utf8`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Integer payload, if this is a [`Value::Int64`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        v.map(Value::Utf8).unwrap_or(Value::Null)
    }
}

impl From<Option<&str>> for Value {
    fn from(v: Option<&str>) -> Self {
        v.map(|s| Value::Utf8(s.to_string())).unwrap_or(Value::Null)
    }
}

impl From<Option<i64>> for Value {
    fn from(v: Option<i64>) -> Self {
        v.map(Value::Int64).unwrap_or(Value::Null)
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// A dataset with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the values of one column, or `None` if the column does not exist.
    pub fn column_values<'a>(
        &'a self,
        name: &str,
    ) -> Option<impl Iterator<Item = &'a Value> + use<'a>> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Keep only rows for which `predicate` returns `true`, in place.
    ///
    /// Row order is preserved and the schema is left untouched.
    pub fn retain_rows<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&[Value]) -> bool,
    {
        self.rows.retain(|row| predicate(row.as_slice()));
    }

    /// Create a new dataset without the columns whose every value is [`Value::Null`].
    ///
    /// A dataset with no rows keeps its schema: there is nothing to decide a column on.
    pub fn drop_all_null_columns(&self) -> Self {
        if self.rows.is_empty() {
            return self.clone();
        }

        let keep: Vec<usize> = (0..self.schema.fields.len())
            .filter(|&idx| self.rows.iter().any(|row| !row[idx].is_null()))
            .collect();

        let fields = keep.iter().map(|&idx| self.schema.fields[idx].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| keep.iter().map(|&idx| row[idx].clone()).collect())
            .collect();

        Self::new(Schema::new(fields), rows)
    }

    /// Concatenate datasets row-wise, in the order given.
    ///
    /// The output schema is the union of the input schemas, in order of first appearance. Cells for
    /// columns a given input does not carry are filled with [`Value::Null`]. When two inputs
    /// disagree on a column's type, the first declaration wins.
    pub fn concat(frames: Vec<DataSet>) -> Self {
        let mut fields: Vec<Field> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for frame in &frames {
            for field in &frame.schema.fields {
                if !positions.contains_key(&field.name) {
                    positions.insert(field.name.clone(), fields.len());
                    fields.push(field.clone());
                }
            }
        }

        let total_rows = frames.iter().map(DataSet::row_count).sum();
        let mut rows: Vec<Vec<Value>> = Vec::with_capacity(total_rows);
        for frame in frames {
            let mapping: Vec<usize> = frame
                .schema
                .fields
                .iter()
                .map(|f| positions[&f.name])
                .collect();
            for row in frame.rows {
                let mut out = vec![Value::Null; fields.len()];
                for (value, &target) in row.into_iter().zip(&mapping) {
                    out[target] = value;
                }
                rows.push(out);
            }
        }

        Self::new(Schema::new(fields), rows)
    }
}
