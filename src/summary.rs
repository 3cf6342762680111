//! Dataset overview: shape, first rows and per-column descriptive statistics.

use std::collections::HashMap;

use serde::Serialize;

use crate::stats::{mean, quantile_sorted, sample_std, sorted};
use crate::types::{CleanedTable, DataType, Field, Value};

/// Rows shown by default in a preview.
pub const DEFAULT_HEAD_ROWS: usize = 5;

/// Statistics for a numeric column. Empty columns report `count = 0` and no other values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (ddof = 1).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

/// Statistics for a text column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSummary {
    pub count: usize,
    pub unique: usize,
    /// Most frequent value (first to appear on ties).
    pub top: Option<String>,
    /// Occurrences of `top`.
    pub freq: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnStats {
    Numeric(NumericSummary),
    Text(TextSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub stats: ColumnStats,
}

/// Everything a "dataset summary" view needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    /// First rows of the table.
    pub head: Vec<Vec<Value>>,
    pub column_summaries: Vec<ColumnSummary>,
}

/// Summarises a cleaned table, previewing its first `head_rows` rows.
pub fn summarize(table: &CleanedTable, head_rows: usize) -> TableSummary {
    let column_summaries = table
        .schema()
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| summarize_column(table, idx, field))
        .collect();

    TableSummary {
        rows: table.row_count(),
        columns: table.column_count(),
        column_names: table.schema().field_names().map(str::to_owned).collect(),
        head: table.head(head_rows).to_vec(),
        column_summaries,
    }
}

fn summarize_column(table: &CleanedTable, idx: usize, field: &Field) -> ColumnSummary {
    let stats = match field.data_type {
        DataType::Numeric => ColumnStats::Numeric(numeric_summary(&table.numeric_values(idx))),
        DataType::Text => ColumnStats::Text(text_summary(
            table.column_values(idx).filter_map(Value::as_text),
        )),
    };
    ColumnSummary {
        name: field.name.clone(),
        stats,
    }
}

pub fn numeric_summary(values: &[f64]) -> NumericSummary {
    let s = sorted(values);
    NumericSummary {
        count: values.len(),
        mean: mean(values),
        std: sample_std(values),
        min: s.first().copied(),
        p25: quantile_sorted(&s, 0.25),
        p50: quantile_sorted(&s, 0.5),
        p75: quantile_sorted(&s, 0.75),
        max: s.last().copied(),
    }
}

pub fn text_summary<'a>(values: impl IntoIterator<Item = &'a str>) -> TextSummary {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut count = 0;
    for (first_seen, v) in values.into_iter().enumerate() {
        count += 1;
        counts.entry(v).or_insert((0, first_seen)).0 += 1;
    }

    let top = counts
        .iter()
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(v, (c, _))| (v.to_string(), *c));

    TextSummary {
        count,
        unique: counts.len(),
        freq: top.as_ref().map_or(0, |(_, c)| *c),
        top: top.map(|(v, _)| v),
    }
}

#[cfg(test)]
mod tests {
    use super::{numeric_summary, text_summary};

    #[test]
    fn numeric_summary_matches_describe() {
        let s = numeric_summary(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, Some(2.5));
        assert_eq!(s.min, Some(1.0));
        assert_eq!(s.p25, Some(1.75));
        assert_eq!(s.p50, Some(2.5));
        assert_eq!(s.p75, Some(3.25));
        assert_eq!(s.max, Some(4.0));
        assert!((s.std.unwrap() - 1.2909944).abs() < 1e-6);
    }

    #[test]
    fn empty_numeric_summary() {
        let s = numeric_summary(&[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.mean, None);
        assert_eq!(s.max, None);
    }

    #[test]
    fn text_summary_prefers_first_seen_on_ties() {
        let s = text_summary(["b", "a", "a", "b", "c"]);
        assert_eq!(s.count, 5);
        assert_eq!(s.unique, 3);
        assert_eq!(s.top.as_deref(), Some("b"));
        assert_eq!(s.freq, 2);
    }
}
