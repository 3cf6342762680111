//! Per-column numeric coercion.

use crate::types::{format_number, DataType, Value};

/// Parses a text cell as a number.
///
/// Accepts anything `f64::from_str` accepts after trimming, except NaN (a NaN is as good as
/// missing).
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Decides the type of one column and returns its values converted to that type.
///
/// A column with no [`Value::Text`] values is already numeric and is returned unchanged.
/// Otherwise every value is parsed as a number, with failed parses counted as missing. The
/// numeric version is accepted when its missing count is strictly less than the column's
/// original missing count, or is exactly zero. A rejected column stays text: numbers in it are
/// rendered to their text form so the column is homogeneous.
///
/// Missing values stay missing either way.
pub fn coerce_column(values: Vec<Value>) -> (DataType, Vec<Value>) {
    if !values.iter().any(|v| matches!(v, Value::Text(_))) {
        return (DataType::Numeric, values);
    }

    let original_missing = values.iter().filter(|v| v.is_missing()).count();
    let coerced: Vec<Value> = values.iter().map(coerce_value).collect();
    let coerced_missing = coerced.iter().filter(|v| v.is_missing()).count();

    if coerced_missing < original_missing || coerced_missing == 0 {
        (DataType::Numeric, coerced)
    } else {
        (DataType::Text, values.into_iter().map(into_text).collect())
    }
}

fn coerce_value(v: &Value) -> Value {
    match v {
        Value::Missing => Value::Missing,
        Value::Number(n) => Value::Number(*n),
        Value::Text(s) => parse_number(s).map_or(Value::Missing, Value::Number),
    }
}

fn into_text(v: Value) -> Value {
    match v {
        Value::Number(n) => Value::Text(format_number(n)),
        other => other,
    }
}

/// Coerces every column of a row-major table in place and returns the resulting column types.
pub(crate) fn coerce_columns(width: usize, rows: &mut [Vec<Value>]) -> Vec<DataType> {
    let mut types = Vec::with_capacity(width);
    for idx in 0..width {
        let column: Vec<Value> = rows
            .iter_mut()
            .map(|row| std::mem::replace(&mut row[idx], Value::Missing))
            .collect();
        let (data_type, converted) = coerce_column(column);
        for (row, value) in rows.iter_mut().zip(converted) {
            row[idx] = value;
        }
        types.push(data_type);
    }
    types
}
