use serde::Serialize;

use crate::error::{ChartError, ChartResult};
use crate::stats::{pearson, varies};
use crate::types::CleanedTable;

/// Pairwise Pearson correlation over the numeric columns of a table.
///
/// `values[i][j]` is the correlation between `columns[i]` and `columns[j]`, or `None` when it
/// is undefined (a constant column, or fewer than two rows). The matrix is symmetric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlation at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied().flatten()
    }

    /// Correlation between two named columns.
    pub fn between(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.get(i, j)
    }
}

pub(super) fn heatmap(table: &CleanedTable) -> ChartResult<CorrelationMatrix> {
    let numeric = table.numeric_columns();
    if numeric.len() < 2 {
        return Err(ChartError::InsufficientNumericColumns {
            found: numeric.len(),
        });
    }

    let fields = &table.schema().fields;
    let columns: Vec<String> = numeric.iter().map(|&i| fields[i].name.clone()).collect();
    let series: Vec<Vec<f64>> = numeric.iter().map(|&i| table.numeric_values(i)).collect();

    let n = series.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        // Self-correlation is exactly 1 for any column that varies.
        values[i][i] = varies(&series[i]).then_some(1.0);
        for j in (i + 1)..n {
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix { columns, values })
}
