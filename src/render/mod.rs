//! Render module - chart sinks and run summaries

pub mod boxplot;
pub mod json;
pub mod summary;
pub mod terminal;

pub use boxplot::*;
pub use json::*;
pub use summary::*;
pub use terminal::*;

use anyhow::Result;

use crate::pipeline::{
    CategoryRateTable, CorrelationTable, KpiNotice, SatisfactionRateTable,
    TenureDistributionTable,
};

/// Anything that can display dashboard charts.
///
/// The pipeline only ever writes finished tables to a sink; the sink decides
/// how they are drawn.
pub trait RenderSink {
    /// Bar chart of attrition % per satisfaction level
    fn satisfaction_chart(&mut self, table: &SatisfactionRateTable) -> Result<()>;

    /// Box plot of tenure, one box per flag value
    fn tenure_chart(&mut self, table: &TenureDistributionTable) -> Result<()>;

    /// Horizontal bar chart of attrition % for the top categories
    fn category_chart(&mut self, table: &CategoryRateTable) -> Result<()>;

    /// Annotated correlation heatmap
    fn heatmap(&mut self, table: &CorrelationTable) -> Result<()>;

    /// Shown in place of a chart that was skipped
    fn notice(&mut self, notice: &KpiNotice) -> Result<()>;
}
