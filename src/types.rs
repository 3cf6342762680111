//! Core data model types.
//!
//! Loading produces a [`RawTable`] of typed [`Value`]s; cleaning turns it into a [`CleanedTable`]
//! whose [`Schema`] records whether each column ended up numeric or text.

use std::fmt;

use serde::Serialize;

/// Column type of a cleaned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Every value is a [`Value::Number`].
    Numeric,
    /// Every value is a [`Value::Text`].
    Text,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
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

    /// `true` for [`DataType::Numeric`] fields.
    pub fn is_numeric(&self) -> bool {
        self.data_type == DataType::Numeric
    }
}

/// Ordered list of fields describing a cleaned table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
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

/// A single cell value.
///
/// Serialises untagged: `null`, a JSON number, or a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing/empty value.
    Missing,
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Hashable identity of this value, used for duplicate detection and grouping.
    pub(crate) fn key(&self) -> ValueKey<'_> {
        match self {
            Value::Missing => ValueKey::Missing,
            // -0.0 and 0.0 compare equal, so they must share a key.
            Value::Number(v) if *v == 0.0 => ValueKey::Number(0.0_f64.to_bits()),
            Value::Number(v) => ValueKey::Number(v.to_bits()),
            Value::Text(s) => ValueKey::Text(s.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey<'a> {
    Missing,
    Number(u64),
    Text(&'a str),
}

/// Renders values the way a user typed them: integral numbers without a trailing `.0`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Number(v) => f.write_str(&format_number(*v)),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Formats a number for labels and text columns.
pub(crate) fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

/// Table as parsed from the uploaded file, before cleaning.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as `columns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawTable {
    /// Unique column names, in file order.
    pub columns: Vec<String>,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl RawTable {
    /// Create a raw table from column names and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the table.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Table after null-row removal, numeric coercion and duplicate removal.
///
/// Only the cleaning pipeline builds these, so the following always hold:
///
/// - no row contains [`Value::Missing`]
/// - no two rows are equal across all columns
/// - every value in a [`DataType::Numeric`] column is a [`Value::Number`], and every value in a
///   [`DataType::Text`] column is a [`Value::Text`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedTable {
    schema: Schema,
    rows: Vec<Vec<Value>>,
}

impl CleanedTable {
    pub(crate) fn from_parts(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// `(rows, columns)`, like a dataframe shape.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.schema.index_of(name)
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.schema.fields.iter().find(|f| f.name == name)
    }

    /// The first `n` rows (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> &[Vec<Value>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Iterate the values of column `idx` in row order.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    /// Numeric values of column `idx` in row order (empty for text columns).
    pub fn numeric_values(&self, idx: usize) -> Vec<f64> {
        self.column_values(idx).filter_map(Value::as_number).collect()
    }

    /// Indexes of all numeric columns, in schema order.
    pub fn numeric_columns(&self) -> Vec<usize> {
        self.schema
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_numeric())
            .map(|(i, _)| i)
            .collect()
    }

    /// Converts back into a [`RawTable`] with the same names and values.
    pub fn to_raw(&self) -> RawTable {
        RawTable::new(
            self.schema.field_names().map(str::to_owned).collect(),
            self.rows.clone(),
        )
    }
}

/// Counts of rows removed by each cleaning step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    /// Rows in the raw table.
    pub rows_before: usize,
    /// Rows dropped because at least one value was missing.
    pub rows_removed_for_nulls: usize,
    /// Rows dropped as exact duplicates of an earlier row.
    pub rows_removed_for_duplicates: usize,
    /// Rows in the cleaned table.
    pub rows_after: usize,
}
