//! Dashboard orchestration: normalize once, build every KPI, hand results to a sink

use anyhow::Result as AnyResult;
use polars::prelude::*;
use serde::Serialize;

use super::attrition::{normalize_attrition, NormalizationReport};
use super::charts::{
    category_rate_table, correlation_table, satisfaction_rate_table, tenure_distribution_table,
    CategoryRateTable, CorrelationTable, SatisfactionRateTable, TenureDistributionTable,
};
use super::config::DashboardConfig;
use super::error::{DashboardError, Kpi, KpiNotice, Result};
use super::values::coerce_numeric_columns;
use crate::render::RenderSink;

/// A KPI is either ready to draw or skipped with a notice
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum KpiOutcome<T> {
    Ready(T),
    Skipped(KpiNotice),
}

impl<T> KpiOutcome<T> {
    /// Turn a builder result into an outcome; fatal errors pass through.
    fn from_result(result: Result<T>) -> Result<Self> {
        match result {
            Ok(table) => Ok(KpiOutcome::Ready(table)),
            Err(DashboardError::Kpi(notice)) => Ok(KpiOutcome::Skipped(notice)),
            Err(e) => Err(e),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            KpiOutcome::Ready(table) => Some(table),
            KpiOutcome::Skipped(_) => None,
        }
    }

    pub fn notice(&self) -> Option<&KpiNotice> {
        match self {
            KpiOutcome::Ready(_) => None,
            KpiOutcome::Skipped(notice) => Some(notice),
        }
    }
}

/// Every chart table of one dashboard run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub attrition: NormalizationReport,
    pub satisfaction: KpiOutcome<SatisfactionRateTable>,
    pub tenure: KpiOutcome<TenureDistributionTable>,
    pub category: KpiOutcome<CategoryRateTable>,
    /// `None` when the heatmap is switched off
    pub correlation: Option<KpiOutcome<CorrelationTable>>,
}

/// Which charts reached the sink
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub rendered: Vec<Kpi>,
    pub skipped: Vec<Kpi>,
}

/// Build every chart table from a raw dataset.
///
/// Normalization failures abort; each KPI is built independently so one
/// missing or empty column never blocks the others.
pub fn build_chart_data(df: &DataFrame, config: &DashboardConfig) -> Result<ChartData> {
    let columns = &config.columns;
    let normalized = normalize_attrition(df, columns)?;
    let mut frame = normalized.frame;
    coerce_numeric_columns(
        &mut frame,
        &[columns.satisfaction.as_str(), columns.tenure.as_str()],
    )?;
    let frame = &frame;

    let satisfaction = KpiOutcome::from_result(satisfaction_rate_table(frame, columns))?;
    let tenure = KpiOutcome::from_result(tenure_distribution_table(frame, columns))?;
    let category = KpiOutcome::from_result(category_rate_table(frame, columns, config.top_n))?;
    let correlation = if config.show_heatmap {
        Some(KpiOutcome::from_result(correlation_table(frame, config))?)
    } else {
        None
    };

    Ok(ChartData {
        attrition: normalized.report,
        satisfaction,
        tenure,
        category,
        correlation,
    })
}

/// Send ready charts to the sink and notices in place of the others.
pub fn render_dashboard(data: &ChartData, sink: &mut dyn RenderSink) -> AnyResult<RenderSummary> {
    let mut summary = RenderSummary::default();

    match &data.satisfaction {
        KpiOutcome::Ready(table) => {
            sink.satisfaction_chart(table)?;
            summary.rendered.push(Kpi::SatisfactionRate);
        }
        KpiOutcome::Skipped(notice) => {
            sink.notice(notice)?;
            summary.skipped.push(Kpi::SatisfactionRate);
        }
    }

    match &data.tenure {
        KpiOutcome::Ready(table) => {
            sink.tenure_chart(table)?;
            summary.rendered.push(Kpi::TenureDistribution);
        }
        KpiOutcome::Skipped(notice) => {
            sink.notice(notice)?;
            summary.skipped.push(Kpi::TenureDistribution);
        }
    }

    match &data.category {
        KpiOutcome::Ready(table) => {
            sink.category_chart(table)?;
            summary.rendered.push(Kpi::CategoryRate);
        }
        KpiOutcome::Skipped(notice) => {
            sink.notice(notice)?;
            summary.skipped.push(Kpi::CategoryRate);
        }
    }

    match &data.correlation {
        Some(KpiOutcome::Ready(table)) => {
            sink.heatmap(table)?;
            summary.rendered.push(Kpi::Correlation);
        }
        Some(KpiOutcome::Skipped(notice)) => {
            sink.notice(notice)?;
            summary.skipped.push(Kpi::Correlation);
        }
        None => {}
    }

    Ok(summary)
}

/// Build and render in one go. A fatal error leaves the sink untouched.
pub fn run_dashboard(
    df: &DataFrame,
    config: &DashboardConfig,
    sink: &mut dyn RenderSink,
) -> AnyResult<RenderSummary> {
    let data = build_chart_data(df, config)?;
    render_dashboard(&data, sink)
}
