//! JSON rendering - every chart table plus run metadata in one document

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use super::boxplot::{box_stats, BoxStats};
use super::RenderSink;
use crate::pipeline::{
    CategoryRateTable, CorrelationTable, KpiNotice, SatisfactionRateTable,
    TenureDistributionTable,
};

/// Metadata about the run
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub version: String,
    /// Dataset the charts were computed from
    pub source: String,
}

/// Box plot summaries attached to the tenure chart
#[derive(Debug, Clone, Serialize)]
pub struct TenureBoxes {
    pub stayed: Option<BoxStats>,
    pub left: Option<BoxStats>,
}

/// One rendered chart
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "chart", rename_all = "snake_case")]
pub enum ChartEntry {
    SatisfactionRate(SatisfactionRateTable),
    TenureDistribution {
        #[serde(flatten)]
        table: TenureDistributionTable,
        boxes: TenureBoxes,
    },
    CategoryRate(CategoryRateTable),
    Correlation(CorrelationTable),
}

/// Complete JSON document
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub metadata: ReportMetadata,
    pub charts: Vec<ChartEntry>,
    pub notices: Vec<KpiNotice>,
}

/// Collects charts in memory and writes them as one JSON document
#[derive(Debug)]
pub struct JsonSink {
    report: DashboardReport,
}

impl JsonSink {
    pub fn new(source: &str) -> Self {
        Self {
            report: DashboardReport {
                metadata: ReportMetadata {
                    timestamp: Utc::now().to_rfc3339(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    source: source.to_string(),
                },
                charts: Vec::new(),
                notices: Vec::new(),
            },
        }
    }

    pub fn report(&self) -> &DashboardReport {
        &self.report
    }

    /// Write the collected document as pretty-printed JSON
    pub fn finish<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, &self.report)
            .context("Failed to serialize dashboard report")?;
        writeln!(writer).context("Failed to write dashboard report")?;
        Ok(())
    }
}

impl RenderSink for JsonSink {
    fn satisfaction_chart(&mut self, table: &SatisfactionRateTable) -> Result<()> {
        self.report
            .charts
            .push(ChartEntry::SatisfactionRate(table.clone()));
        Ok(())
    }

    fn tenure_chart(&mut self, table: &TenureDistributionTable) -> Result<()> {
        let (stayed, left) = table.groups();
        self.report.charts.push(ChartEntry::TenureDistribution {
            table: table.clone(),
            boxes: TenureBoxes {
                stayed: box_stats(&stayed),
                left: box_stats(&left),
            },
        });
        Ok(())
    }

    fn category_chart(&mut self, table: &CategoryRateTable) -> Result<()> {
        self.report.charts.push(ChartEntry::CategoryRate(table.clone()));
        Ok(())
    }

    fn heatmap(&mut self, table: &CorrelationTable) -> Result<()> {
        self.report.charts.push(ChartEntry::Correlation(table.clone()));
        Ok(())
    }

    fn notice(&mut self, notice: &KpiNotice) -> Result<()> {
        self.report.notices.push(notice.clone());
        Ok(())
    }
}
