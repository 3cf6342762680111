use serde::Serialize;

use crate::stats::{quantile_sorted, sorted};
use crate::types::{CleanedTable, Field};

/// Five-number summary plus whiskers and outliers for a box plot.
///
/// Whiskers reach the most extreme values within 1.5 × IQR of the quartiles; values beyond
/// them are listed as outliers in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let s = sorted(values);
        let min = *s.first()?;
        let max = *s.last()?;
        let q1 = quantile_sorted(&s, 0.25)?;
        let median = quantile_sorted(&s, 0.5)?;
        let q3 = quantile_sorted(&s, 0.75)?;

        let iqr = q3 - q1;
        let (lo, hi) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);
        let inside = || s.iter().copied().filter(|v| (lo..=hi).contains(v));
        let lower_whisker = inside().next().unwrap_or(min);
        let upper_whisker = inside().last().unwrap_or(max);
        let outliers = s.iter().copied().filter(|v| !(lo..=hi).contains(v)).collect();

        Some(Self {
            min,
            q1,
            median,
            q3,
            max,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Distribution of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotSeries {
    pub column: String,
    /// Column values in row order.
    pub values: Vec<f64>,
    /// `None` when the table has no rows.
    pub stats: Option<BoxStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

/// Paired x/y values.
///
/// When `y_column` is `None`, each point's `y` is the row position (0-based) in the cleaned
/// table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub x_column: String,
    pub y_column: Option<String>,
    pub points: Vec<ScatterPoint>,
}

pub(super) fn box_plot(table: &CleanedTable, idx: usize, field: &Field) -> BoxPlotSeries {
    let values = table.numeric_values(idx);
    let stats = BoxStats::from_values(&values);
    BoxPlotSeries {
        column: field.name.clone(),
        values,
        stats,
    }
}

pub(super) fn scatter(
    table: &CleanedTable,
    (x_idx, x_field): (usize, &Field),
    y: Option<(usize, &Field)>,
) -> ScatterSeries {
    let xs = table.numeric_values(x_idx);
    let ys: Vec<f64> = match y {
        Some((y_idx, _)) => table.numeric_values(y_idx),
        None => (0..xs.len()).map(|i| i as f64).collect(),
    };

    ScatterSeries {
        x_column: x_field.name.clone(),
        y_column: y.map(|(_, f)| f.name.clone()),
        points: xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| ScatterPoint { x, y })
            .collect(),
    }
}
