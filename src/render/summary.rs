//! Run summary shown after the charts

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{DatasetStats, FlagSource, Kpi, NormalizationReport, RenderSummary};

/// Summary of one dashboard run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub source: String,
    pub dataset: DatasetStats,
    pub attrition: NormalizationReport,
    pub rendered: Vec<Kpi>,
    pub skipped: Vec<Kpi>,
    pub load_time: Option<Duration>,
    pub render_time: Option<Duration>,
}

impl RunSummary {
    pub fn new(
        source: String,
        dataset: DatasetStats,
        attrition: NormalizationReport,
        rendered: RenderSummary,
    ) -> Self {
        Self {
            source,
            dataset,
            attrition,
            rendered: rendered.rendered,
            skipped: rendered.skipped,
            load_time: None,
            render_time: None,
        }
    }

    pub fn set_load_time(&mut self, duration: Duration) {
        self.load_time = Some(duration);
    }

    pub fn set_render_time(&mut self, duration: Duration) {
        self.render_time = Some(duration);
    }

    /// Overall attrition rate over rows with a known flag
    pub fn attrition_rate(&self) -> Option<f64> {
        let known = self.attrition.events + self.attrition.non_events;
        (known > 0).then(|| self.attrition.events as f64 / known as f64)
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Dataset"), Cell::new(&self.source)]);
        table.add_row(vec![
            Cell::new("Rows × Columns"),
            Cell::new(format!("{} × {}", self.dataset.rows, self.dataset.columns)),
        ]);

        let flag_source = match self.attrition.source {
            FlagSource::Native => format!("{} (numeric)", self.attrition.source_column),
            FlagSource::Label => format!("{} (mapped label)", self.attrition.source_column),
        };
        table.add_row(vec![Cell::new("🎯 Attrition flag"), Cell::new(flag_source)]);

        let rate = match self.attrition_rate() {
            Some(rate) => format!("{:.1}%", rate * 100.0),
            None => "n/a".to_string(),
        };
        table.add_row(vec![
            Cell::new("📉 Attrition rate"),
            Cell::new(rate).fg(Color::Yellow).add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("❔ Rows without flag"),
            Cell::new(self.attrition.missing).fg(if self.attrition.missing == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);

        table.add_row(vec![
            Cell::new("✅ Charts rendered"),
            Cell::new(self.rendered.len())
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("⚠️  Charts skipped"),
            Cell::new(self.skipped.len()).fg(if self.skipped.is_empty() {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);

        if let Some(load) = self.load_time {
            table.add_row(vec![
                Cell::new("⏱  Load time"),
                Cell::new(format_duration(load)),
            ]);
        }
        if let Some(render) = self.render_time {
            table.add_row(vec![
                Cell::new("⏱  Chart time"),
                Cell::new(format_duration(render)),
            ]);
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("DASHBOARD SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        for line in self.table().to_string().lines() {
            println!("    {}", line);
        }

        if !self.skipped.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Skipped").yellow(),
                style(format!("({})", self.skipped.len())).dim()
            );
            for kpi in &self.skipped {
                println!("        {} {}", style("•").dim(), kpi);
            }
        }
    }
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0} ms", secs * 1000.0)
    } else {
        format!("{:.2} s", secs)
    }
}
