//! Missing value counts for the columns a KPI reads

use polars::prelude::*;

use super::error::{DashboardError, Result};
use super::values::{column_to_f64_vec, ValueKind};

/// Count missing values per column, using the same coercion the KPI applies.
///
/// A numeric column counts unparseable values and NaN as missing, a text
/// column only counts nulls. Results are sorted by missing count descending.
pub fn count_missing(df: &DataFrame, columns: &[(&str, ValueKind)]) -> Result<Vec<(String, usize)>> {
    let mut counts: Vec<(String, usize)> = Vec::with_capacity(columns.len());

    for (name, kind) in columns {
        let column = df
            .column(name)
            .map_err(|_| DashboardError::ColumnNotFound(name.to_string()))?;

        let missing = match kind {
            ValueKind::Numeric => column_to_f64_vec(column)?
                .iter()
                .filter(|v| v.is_none())
                .count(),
            ValueKind::Text => column.null_count(),
        };
        counts.push((name.to_string(), missing));
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(counts)
}

/// Total rows dropped by complete-case filtering over the given columns
pub fn count_incomplete_rows(df: &DataFrame, columns: &[&str]) -> Result<usize> {
    let mut complete = vec![true; df.height()];

    for name in columns {
        let column = df
            .column(name)
            .map_err(|_| DashboardError::ColumnNotFound(name.to_string()))?;
        for (keep, value) in complete.iter_mut().zip(column_to_f64_vec(column)?) {
            *keep &= value.is_some();
        }
    }

    Ok(complete.iter().filter(|keep| !**keep).count())
}
