use super::error::DataError;
use super::model::{CellValue, ColumnKind, Table};

// ---------------------------------------------------------------------------
// Descriptive statistics per numeric column
// ---------------------------------------------------------------------------

/// Count / mean / std / min / max of one numeric column, nulls ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n − 1 denominator); `NaN` for count < 2.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Summary statistics for every numeric column, in header order.
pub fn describe(table: &Table) -> Vec<ColumnStats> {
    table
        .numeric_columns()
        .iter()
        .map(|col| {
            let values: Vec<f64> = table.column(col).filter_map(CellValue::as_f64).collect();
            let count = values.len();
            let mean = if count == 0 {
                f64::NAN
            } else {
                values.iter().sum::<f64>() / count as f64
            };
            let std = if count < 2 {
                f64::NAN
            } else {
                let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
                (ss / (count as f64 - 1.0)).sqrt()
            };
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            ColumnStats {
                column: col.clone(),
                count,
                mean,
                std,
                min,
                max,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pearson correlation matrix
// ---------------------------------------------------------------------------

/// Symmetric matrix of pairwise Pearson coefficients with unit diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `values[i][j]` = corr(columns[i], columns[j]).
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Pairwise Pearson correlation between every pair of `numeric_cols`.
///
/// Each pair is computed over the records where both values are present
/// (pairwise-complete observations).  corr = cov(X,Y) / (σX·σY); `NaN` when
/// either column has zero variance over the shared records.  Propagates NaN
/// without special-casing.
pub fn correlation_matrix(
    table: &Table,
    numeric_cols: &[String],
) -> Result<CorrelationMatrix, DataError> {
    for col in numeric_cols {
        match table.column_kind(col) {
            None => return Err(DataError::ColumnNotFound(col.clone())),
            Some(ColumnKind::Categorical) => {
                return Err(DataError::TypeMismatch(col.clone()));
            }
            Some(ColumnKind::Numeric) => {}
        }
    }

    let series: Vec<Vec<Option<f64>>> = numeric_cols
        .iter()
        .map(|col| table.column(col).map(CellValue::as_f64).collect())
        .collect();

    let n = numeric_cols.len();
    let mut values = vec![vec![f64::NAN; n]; n];

    for i in 0..n {
        for j in i..n {
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: numeric_cols.to_vec(),
        values,
    })
}

fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    let n = pairs.len();
    if n == 0 {
        return f64::NAN;
    }

    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    // Zero variance → NaN, including on the diagonal.
    cov / (var_x.sqrt() * var_y.sqrt())
}

// ---------------------------------------------------------------------------
// Quartiles (box plot support)
// ---------------------------------------------------------------------------

/// Five-number summary of one group's values for the box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Quartiles {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Five-number summary via linear interpolation between order statistics.
/// Returns `None` for an empty slice.
pub fn quartiles(values: &[f64]) -> Option<Quartiles> {
    if values.is_empty() {
        return None;
    }
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let quantile = |q: f64| -> f64 {
        let pos = q * (sorted.len() - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        if lo == hi {
            sorted[lo]
        } else {
            let frac = pos - lo as f64;
            sorted[lo] * (1.0 - frac) + sorted[hi] * frac
        }
    };

    Some(Quartiles {
        min: sorted[0],
        q1: quantile(0.25),
        median: quantile(0.5),
        q3: quantile(0.75),
        max: sorted[sorted.len() - 1],
    })
}
