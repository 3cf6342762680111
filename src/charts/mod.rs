//! Chart request validation and series construction.
//!
//! [`build_chart`] takes a [`CleanedTable`] and a [`ChartRequest`] and returns either a
//! render-ready [`ChartSeries`] or a [`ChartError`] describing why the chart cannot be drawn.
//! Nothing here draws anything: the series carry exactly the numbers a renderer needs.
//!
//! | Kind | Needs | Produces |
//! |---|---|---|
//! | [`ChartKind::CorrelationHeatmap`] | ≥2 numeric columns | Pearson matrix |
//! | [`ChartKind::BoxPlot`] | numeric `column_x` | values + quartiles/whiskers/outliers |
//! | [`ChartKind::PieChart`] | `column_x` | top-10 value counts |
//! | [`ChartKind::ScatterPlot`] | numeric `column_x`, optional numeric `column_y` | x/y points |
//! | [`ChartKind::BarChart`] | `column_x`, optional numeric `column_y` | counts or mean of y per x |
//!
//! ## Example
//!
//! ```rust
//! use tabular_glance::charts::{build_chart, ChartRequest, ChartSeries};
//! use tabular_glance::ingestion::load_and_clean;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (table, _) = load_and_clean(b"x,y\n1,2\n2,4\n3,7\n", "points.csv")?;
//!
//! let request = ChartRequest::from_selection("heatmap", None, None)?;
//! let ChartSeries::CorrelationHeatmap(matrix) = build_chart(&table, &request)? else {
//!     unreachable!()
//! };
//! assert_eq!(matrix.columns, vec!["x", "y"]);
//! assert_eq!(matrix.get(0, 0), Some(1.0));
//! # Ok(())
//! # }
//! ```

mod categorical;
mod correlation;
mod distribution;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ChartError, ChartResult};
use crate::types::{CleanedTable, Field};

pub use categorical::{Bar, BarAggregate, BarSeries, PieSeries, PieSlice, PIE_MAX_SLICES};
pub use correlation::CorrelationMatrix;
pub use distribution::{BoxPlotSeries, BoxStats, ScatterPoint, ScatterSeries};

/// The chart types the builder knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Pairwise correlation of all numeric columns.
    CorrelationHeatmap,
    /// Distribution of one column.
    BoxPlot,
    /// Share of the most frequent values of one column.
    PieChart,
    /// One numeric column against another (or against row position).
    ScatterPlot,
    /// Counts per category, or mean of a second column per category.
    BarChart,
}

impl ChartKind {
    /// All kinds, in menu order.
    pub const ALL: [ChartKind; 5] = [
        ChartKind::BoxPlot,
        ChartKind::BarChart,
        ChartKind::PieChart,
        ChartKind::ScatterPlot,
        ChartKind::CorrelationHeatmap,
    ];

    /// Whether requests of this kind must name `column_x`.
    pub fn requires_column_x(self) -> bool {
        !matches!(self, ChartKind::CorrelationHeatmap)
    }

    /// Whether this kind uses `column_y` at all.
    pub fn accepts_column_y(self) -> bool {
        matches!(self, ChartKind::ScatterPlot | ChartKind::BarChart)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartKind::CorrelationHeatmap => "correlation heatmap",
            ChartKind::BoxPlot => "box plot",
            ChartKind::PieChart => "pie chart",
            ChartKind::ScatterPlot => "scatter plot",
            ChartKind::BarChart => "bar chart",
        })
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    /// Accepts short names (`heatmap`, `box`, `pie`, `scatter`, `bar`) and long names with
    /// spaces, dashes or underscores (`correlation heatmap`, `box-plot`, `bar_chart`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "heatmap" | "correlation" | "correlation_heatmap" | "heatmap_correlation" => {
                Ok(ChartKind::CorrelationHeatmap)
            }
            "box" | "boxplot" | "box_plot" => Ok(ChartKind::BoxPlot),
            "pie" | "pie_chart" => Ok(ChartKind::PieChart),
            "scatter" | "scatter_plot" => Ok(ChartKind::ScatterPlot),
            "bar" | "bar_chart" => Ok(ChartKind::BarChart),
            _ => Err(ChartError::UnknownChartKind { name: s.to_owned() }),
        }
    }
}

/// A chart kind plus up to two column selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub column_x: Option<String>,
    pub column_y: Option<String>,
}

impl ChartRequest {
    /// A request with no columns selected.
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            column_x: None,
            column_y: None,
        }
    }

    pub fn with_x(mut self, column: impl Into<String>) -> Self {
        self.column_x = Some(column.into());
        self
    }

    pub fn with_y(mut self, column: impl Into<String>) -> Self {
        self.column_y = Some(column.into());
        self
    }

    /// Builds a request from raw UI selections.
    ///
    /// Empty column names count as "nothing selected".
    pub fn from_selection(
        kind: &str,
        column_x: Option<&str>,
        column_y: Option<&str>,
    ) -> ChartResult<Self> {
        let selected = |c: Option<&str>| c.filter(|s| !s.is_empty()).map(str::to_owned);
        Ok(Self {
            kind: kind.parse()?,
            column_x: selected(column_x),
            column_y: selected(column_y),
        })
    }
}

/// Render-ready chart data.
///
/// Serialises with a `kind` tag, e.g. `{"kind":"pie_chart","column":"city","slices":[...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSeries {
    CorrelationHeatmap(CorrelationMatrix),
    BoxPlot(BoxPlotSeries),
    PieChart(PieSeries),
    ScatterPlot(ScatterSeries),
    BarChart(BarSeries),
}

impl ChartSeries {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSeries::CorrelationHeatmap(_) => ChartKind::CorrelationHeatmap,
            ChartSeries::BoxPlot(_) => ChartKind::BoxPlot,
            ChartSeries::PieChart(_) => ChartKind::PieChart,
            ChartSeries::ScatterPlot(_) => ChartKind::ScatterPlot,
            ChartSeries::BarChart(_) => ChartKind::BarChart,
        }
    }
}

/// Validates `request` against `table` and builds the chart data.
///
/// Validation always runs before any construction, so a failing request never produces a
/// partial series. `column_y` is ignored by kinds that do not use it.
pub fn build_chart(table: &CleanedTable, request: &ChartRequest) -> ChartResult<ChartSeries> {
    let kind = request.kind;
    match kind {
        ChartKind::CorrelationHeatmap => {
            correlation::heatmap(table).map(ChartSeries::CorrelationHeatmap)
        }
        ChartKind::BoxPlot => {
            let (x_idx, x_field) = selected_x(table, request)?;
            require_numeric(kind, x_field)?;
            Ok(ChartSeries::BoxPlot(distribution::box_plot(table, x_idx, x_field)))
        }
        ChartKind::PieChart => {
            let (x_idx, x_field) = selected_x(table, request)?;
            categorical::pie(table, x_idx, x_field).map(ChartSeries::PieChart)
        }
        ChartKind::ScatterPlot => {
            let x = selected_x(table, request)?;
            let y = selected_y(table, request)?;
            require_numeric(kind, x.1)?;
            if let Some((_, y_field)) = y {
                require_numeric(kind, y_field)?;
            }
            Ok(ChartSeries::ScatterPlot(distribution::scatter(table, x, y)))
        }
        ChartKind::BarChart => {
            let x = selected_x(table, request)?;
            let y = selected_y(table, request)?;
            if let Some((_, y_field)) = y {
                require_numeric(kind, y_field)?;
            }
            Ok(ChartSeries::BarChart(categorical::bar(table, x, y)))
        }
    }
}

fn selected_x<'a>(
    table: &'a CleanedTable,
    request: &ChartRequest,
) -> ChartResult<(usize, &'a Field)> {
    let name = request
        .column_x
        .as_deref()
        .ok_or(ChartError::MissingSelection { kind: request.kind })?;
    lookup(table, name)
}

fn selected_y<'a>(
    table: &'a CleanedTable,
    request: &ChartRequest,
) -> ChartResult<Option<(usize, &'a Field)>> {
    request
        .column_y
        .as_deref()
        .map(|name| lookup(table, name))
        .transpose()
}

fn lookup<'a>(table: &'a CleanedTable, name: &str) -> ChartResult<(usize, &'a Field)> {
    table
        .index_of(name)
        .and_then(|idx| table.schema().fields.get(idx).map(|f| (idx, f)))
        .ok_or_else(|| ChartError::UnknownColumn {
            column: name.to_owned(),
        })
}

fn require_numeric(kind: ChartKind, field: &Field) -> ChartResult<()> {
    if field.is_numeric() {
        Ok(())
    } else {
        Err(ChartError::NonNumericColumn {
            kind,
            column: field.name.clone(),
        })
    }
}
