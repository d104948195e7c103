//! Error and notice types for the dashboard pipeline.
//!
//! Two classes of failure exist. Fatal errors (`Load`, `Schema`, internal polars
//! failures) stop the whole run and no chart is rendered. Per-KPI notices
//! (`KpiNotice`) only skip the chart they belong to.

use std::fmt;
use std::path::PathBuf;

use polars::prelude::PolarsError;
use serde::Serialize;
use thiserror::Error;

/// The four charts the dashboard produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kpi {
    SatisfactionRate,
    TenureDistribution,
    CategoryRate,
    Correlation,
}

impl Kpi {
    pub fn title(&self) -> &'static str {
        match self {
            Kpi::SatisfactionRate => "Attrition rate by satisfaction",
            Kpi::TenureDistribution => "Tenure distribution by attrition",
            Kpi::CategoryRate => "Attrition rate by category",
            Kpi::Correlation => "Correlation heatmap",
        }
    }
}

impl fmt::Display for Kpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Non-fatal condition that skips a single KPI.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KpiNotice {
    /// An optional column is not in the schema at all.
    #[error("{kpi}: column '{column}' is not present, chart skipped")]
    ColumnAbsent { kpi: Kpi, column: String },

    /// Every row was dropped while filtering missing values.
    ///
    /// `missing` carries the per-column missing counts that caused it.
    #[error("{kpi}: no rows left after dropping missing values in {columns:?}")]
    EmptyData {
        kpi: Kpi,
        columns: Vec<String>,
        missing: Vec<(String, usize)>,
    },

    /// The statistic has no defined value for this data.
    #[error("{kpi}: not computable ({reason})")]
    NotComputable { kpi: Kpi, reason: String },
}

impl KpiNotice {
    pub fn kpi(&self) -> Kpi {
        match self {
            KpiNotice::ColumnAbsent { kpi, .. }
            | KpiNotice::EmptyData { kpi, .. }
            | KpiNotice::NotComputable { kpi, .. } => *kpi,
        }
    }
}

/// Errors raised by the dashboard pipeline.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The input file could not be read or parsed.
    #[error("failed to load dataset '{}': {message}", path.display())]
    Load { path: PathBuf, message: String },

    /// Neither the attrition flag nor the attrition label column exists.
    #[error("required attrition column absent: expected '{flag}' or '{label}'")]
    Schema { flag: String, label: String },

    /// A column requested by an aggregation is not in the frame.
    #[error("column '{0}' not found in dataset")]
    ColumnNotFound(String),

    #[error(transparent)]
    Kpi(#[from] KpiNotice),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl DashboardError {
    /// Fatal errors abort the run; notices only skip one chart.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DashboardError::Kpi(_))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
