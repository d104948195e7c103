//! Pearson correlation matrix over complete-case rows

use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::error::Result;
use super::values::column_to_f64_vec;

/// Square correlation matrix.
///
/// `values[i][j]` is `None` when either column has zero variance over the
/// rows used, since Pearson correlation is undefined there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
    /// Complete-case rows the statistic was computed from
    pub rows_used: usize,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == row)?;
        let j = self.columns.iter().position(|c| c == col)?;
        self.values[i][j]
    }
}

/// Result of [`correlation_matrix`]
#[derive(Debug, Clone, PartialEq)]
pub enum CorrelationOutcome {
    Computed(CorrelationMatrix),
    NotComputable(String),
}

/// Compute pairwise Pearson correlation over the selected columns.
///
/// Columns that are absent or not primitive numeric are ignored. Rows with a
/// missing value in any remaining column are dropped before anything is
/// computed, so every entry uses the same rows.
pub fn correlation_matrix(df: &DataFrame, columns: &[String]) -> Result<CorrelationOutcome> {
    let mut usable: Vec<(String, Vec<Option<f64>>)> = Vec::new();
    for name in columns {
        if usable.iter().any(|(n, _)| n == name) {
            continue;
        }
        let Ok(col) = df.column(name) else {
            continue;
        };
        if !col.dtype().is_primitive_numeric() {
            continue;
        }
        usable.push((name.clone(), column_to_f64_vec(col)?));
    }

    if usable.len() < 2 {
        return Ok(CorrelationOutcome::NotComputable(format!(
            "need at least 2 numeric columns, found {}",
            usable.len()
        )));
    }

    let complete: Vec<usize> = (0..df.height())
        .filter(|&row| usable.iter().all(|(_, values)| values[row].is_some()))
        .collect();

    if complete.is_empty() {
        return Ok(CorrelationOutcome::NotComputable(
            "no rows without missing values".to_string(),
        ));
    }

    let dense: Vec<Vec<f64>> = usable
        .iter()
        .map(|(_, values)| complete.iter().filter_map(|&row| values[row]).collect())
        .collect();

    let names: Vec<String> = usable.into_iter().map(|(name, _)| name).collect();
    let values = pearson_matrix(&dense);

    Ok(CorrelationOutcome::Computed(CorrelationMatrix {
        columns: names,
        values,
        rows_used: complete.len(),
    }))
}

/// Correlation of dense, equal-length columns.
///
/// Algorithm:
/// 1. Standardize each column: z = (x - mean) / (std * sqrt(n))
/// 2. R = Z^T * Z
///
/// Constant columns cannot be standardized and get `None` everywhere,
/// including the diagonal.
fn pearson_matrix(columns: &[Vec<f64>]) -> Vec<Vec<Option<f64>>> {
    let n_cols = columns.len();
    let n_rows = columns.first().map(|c| c.len()).unwrap_or(0);

    let standardized: Vec<Option<Vec<f64>>> = columns
        .par_iter()
        .map(|values| standardize(values))
        .collect();

    let valid: Vec<usize> = (0..n_cols).filter(|&i| standardized[i].is_some()).collect();

    let mut z = Mat::<f64>::zeros(n_rows, valid.len());
    for (col_idx, &source) in valid.iter().enumerate() {
        if let Some(col_data) = &standardized[source] {
            for (row_idx, &val) in col_data.iter().enumerate() {
                z[(row_idx, col_idx)] = val;
            }
        }
    }

    let corr = z.transpose() * &z;

    let mut matrix = vec![vec![None; n_cols]; n_cols];
    for (a, &i) in valid.iter().enumerate() {
        matrix[i][i] = Some(1.0);
        for (b, &j) in valid.iter().enumerate().skip(a + 1) {
            let r = corr[(a, b)].clamp(-1.0, 1.0);
            matrix[i][j] = Some(r);
            matrix[j][i] = Some(r);
        }
    }

    matrix
}

fn standardize(values: &[f64]) -> Option<Vec<f64>> {
    let n = values.len() as f64;
    if values.is_empty() {
        return None;
    }

    let mean = values.iter().sum::<f64>() / n;
    let sum_sq_dev: f64 = values.iter().map(|x| (x - mean) * (x - mean)).sum();
    let norm = sum_sq_dev.sqrt();

    // Relative check so that floating point noise on a constant column counts as zero
    if norm <= f64::EPSILON * mean.abs().max(1.0) * n {
        return None;
    }

    Some(values.iter().map(|x| (x - mean) / norm).collect())
}
