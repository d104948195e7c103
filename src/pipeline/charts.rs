//! Chart-ready tables, one builder per KPI
//!
//! Builders are pure functions of the normalized frame. A KPI that cannot be
//! drawn returns `DashboardError::Kpi` with the notice to show instead.

use polars::prelude::*;
use serde::Serialize;

use super::aggregate::{rate_by_group, GroupKey, GroupKind, GroupRate, RateOutcome};
use super::config::{ColumnConfig, DashboardConfig};
use super::correlation::{correlation_matrix, CorrelationMatrix, CorrelationOutcome};
use super::error::{DashboardError, Kpi, KpiNotice, Result};
use super::missing::{count_incomplete_rows, count_missing};
use super::values::{column_to_f64_vec, has_column, numeric_column_names, ValueKind};

/// Convert a rate to a percentage rounded to one decimal
pub fn to_percentage(rate: f64) -> f64 {
    (rate * 1000.0).round() / 10.0
}

/// One bar of a rate chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateRow {
    pub key: GroupKey,
    /// Raw fraction in [0, 1]
    pub rate: f64,
    /// `rate` as a percentage, one decimal
    pub pct: f64,
    pub count: usize,
}

impl From<GroupRate> for RateRow {
    fn from(group: GroupRate) -> Self {
        Self {
            pct: to_percentage(group.rate),
            key: group.key,
            rate: group.rate,
            count: group.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatisfactionRateTable {
    pub column: String,
    pub rows: Vec<RateRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TenureRow {
    pub tenure: f64,
    pub flag: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenureDistributionTable {
    pub column: String,
    pub rows: Vec<TenureRow>,
}

impl TenureDistributionTable {
    /// Tenures split by flag: (stayed, left)
    pub fn groups(&self) -> (Vec<f64>, Vec<f64>) {
        let (left, stayed): (Vec<TenureRow>, Vec<TenureRow>) =
            self.rows.iter().copied().partition(|row| row.flag == 1);
        (
            stayed.iter().map(|r| r.tenure).collect(),
            left.iter().map(|r| r.tenure).collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRateTable {
    pub column: String,
    pub rows: Vec<RateRow>,
    /// Number of categories before truncation
    pub total_groups: usize,
}

/// How the heatmap columns were chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSelection {
    /// At least two preferred columns were present
    Preferred,
    /// First numeric columns in schema order
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationTable {
    pub selection: ColumnSelection,
    pub matrix: CorrelationMatrix,
    /// Rows dropped because a selected column was missing
    pub rows_dropped: usize,
}

fn require_column(df: &DataFrame, kpi: Kpi, column: &str) -> Result<()> {
    if has_column(df, column) {
        Ok(())
    } else {
        Err(KpiNotice::ColumnAbsent {
            kpi,
            column: column.to_string(),
        }
        .into())
    }
}

fn empty_data(
    df: &DataFrame,
    kpi: Kpi,
    columns: &[(&str, ValueKind)],
) -> Result<DashboardError> {
    Ok(KpiNotice::EmptyData {
        kpi,
        columns: columns.iter().map(|(name, _)| name.to_string()).collect(),
        missing: count_missing(df, columns)?,
    }
    .into())
}

fn group_rates(
    df: &DataFrame,
    kpi: Kpi,
    column: &str,
    flag_column: &str,
    kind: GroupKind,
) -> Result<Vec<RateRow>> {
    require_column(df, kpi, column)?;

    match rate_by_group(df, column, flag_column, kind)? {
        RateOutcome::Computed(summary) => {
            Ok(summary.groups.into_iter().map(RateRow::from).collect())
        }
        RateOutcome::NoData => Err(empty_data(
            df,
            kpi,
            &[(column, kind.value_kind()), (flag_column, ValueKind::Numeric)],
        )?),
    }
}

/// Attrition rate per satisfaction level, ascending by level.
pub fn satisfaction_rate_table(
    df: &DataFrame,
    columns: &ColumnConfig,
) -> Result<SatisfactionRateTable> {
    let rows = group_rates(
        df,
        Kpi::SatisfactionRate,
        &columns.satisfaction,
        &columns.flag,
        GroupKind::Ordinal,
    )?;

    Ok(SatisfactionRateTable {
        column: columns.satisfaction.clone(),
        rows,
    })
}

/// Filtered (tenure, flag) pairs for a box plot; no aggregation.
pub fn tenure_distribution_table(
    df: &DataFrame,
    columns: &ColumnConfig,
) -> Result<TenureDistributionTable> {
    let kpi = Kpi::TenureDistribution;
    require_column(df, kpi, &columns.tenure)?;

    let tenures = column_to_f64_vec(df.column(&columns.tenure)?)?;
    let flags = column_to_f64_vec(df.column(&columns.flag)?)?;

    let rows: Vec<TenureRow> = tenures
        .iter()
        .zip(flags.iter())
        .filter_map(|(tenure, flag)| match (tenure, flag) {
            (Some(tenure), Some(flag)) if *flag == 0.0 || *flag == 1.0 => Some(TenureRow {
                tenure: *tenure,
                flag: *flag as u8,
            }),
            _ => None,
        })
        .collect();

    if rows.is_empty() {
        return Err(empty_data(
            df,
            kpi,
            &[
                (columns.tenure.as_str(), ValueKind::Numeric),
                (columns.flag.as_str(), ValueKind::Numeric),
            ],
        )?);
    }

    Ok(TenureDistributionTable {
        column: columns.tenure.clone(),
        rows,
    })
}

/// Top `top_n` categories by attrition rate, descending.
///
/// The sort is stable, so categories with equal rates keep first-seen order.
pub fn category_rate_table(
    df: &DataFrame,
    columns: &ColumnConfig,
    top_n: usize,
) -> Result<CategoryRateTable> {
    let mut rows = group_rates(
        df,
        Kpi::CategoryRate,
        &columns.category,
        &columns.flag,
        GroupKind::Categorical,
    )?;
    let total_groups = rows.len();

    rows.sort_by(|a, b| {
        b.rate
            .partial_cmp(&a.rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows.truncate(top_n);

    Ok(CategoryRateTable {
        column: columns.category.clone(),
        rows,
        total_groups,
    })
}

/// Pick the heatmap columns.
///
/// Preferred columns present as numeric are used when there are at least two
/// of them; otherwise the first `fallback` numeric columns of the frame.
pub fn select_heatmap_columns(
    df: &DataFrame,
    preferred: &[String],
    fallback: usize,
) -> (Vec<String>, ColumnSelection) {
    let numeric = numeric_column_names(df);

    let mut chosen: Vec<String> = Vec::new();
    for name in preferred {
        if numeric.contains(name) && !chosen.contains(name) {
            chosen.push(name.clone());
        }
    }

    if chosen.len() >= 2 {
        (chosen, ColumnSelection::Preferred)
    } else {
        (
            numeric.into_iter().take(fallback).collect(),
            ColumnSelection::Fallback,
        )
    }
}

/// Correlation matrix for the heatmap.
pub fn correlation_table(df: &DataFrame, config: &DashboardConfig) -> Result<CorrelationTable> {
    let kpi = Kpi::Correlation;
    let (selected, selection) = select_heatmap_columns(
        df,
        &config.columns.heatmap_preferred,
        config.heatmap_fallback,
    );

    match correlation_matrix(df, &selected)? {
        CorrelationOutcome::Computed(matrix) => {
            let names: Vec<&str> = matrix.columns.iter().map(|c| c.as_str()).collect();
            let rows_dropped = count_incomplete_rows(df, &names)?;
            Ok(CorrelationTable {
                selection,
                matrix,
                rows_dropped,
            })
        }
        CorrelationOutcome::NotComputable(reason) => {
            Err(KpiNotice::NotComputable { kpi, reason }.into())
        }
    }
}
