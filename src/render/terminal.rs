//! Terminal rendering with comfy-table and console styling

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use super::boxplot::box_stats;
use super::RenderSink;
use crate::pipeline::{
    CategoryRateTable, ColumnSelection, CorrelationTable, KpiNotice, RateRow,
    SatisfactionRateTable, TenureDistributionTable,
};
use crate::utils::{print_info, print_warning};

/// Width of a 100% bar in characters
const BAR_WIDTH: usize = 30;

/// Renders charts as tables on stdout
#[derive(Debug, Default)]
pub struct TerminalSink {
    charts: usize,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn header(&mut self, title: &str) {
        self.charts += 1;
        println!();
        println!(
            "    {} {} {}",
            style(format!("KPI {}", self.charts)).cyan().bold(),
            style("│").dim(),
            style(title).white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
    }
}

/// Print a table indented to line up with the step headers
fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

/// Horizontal text bar proportional to a percentage
pub fn percentage_bar(pct: f64) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}

fn rate_table(key_header: &str, rows: &[RateRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new(key_header).add_attribute(Attribute::Bold),
        Cell::new("Attrition %").add_attribute(Attribute::Bold),
        Cell::new("").add_attribute(Attribute::Bold),
        Cell::new("Employees").add_attribute(Attribute::Bold),
    ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(row.key.to_string()),
            Cell::new(format!("{:.1}%", row.pct))
                .set_alignment(CellAlignment::Right)
                .fg(Color::Yellow),
            Cell::new(percentage_bar(row.pct)).fg(Color::Cyan),
            Cell::new(row.count).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Bar chart for the satisfaction KPI
pub fn satisfaction_table(data: &SatisfactionRateTable) -> Table {
    rate_table(&data.column, &data.rows)
}

/// Horizontal bar chart for the category KPI
pub fn category_table(data: &CategoryRateTable) -> Table {
    rate_table(&data.column, &data.rows)
}

/// Box plot summary, one row per flag group
pub fn tenure_table(data: &TenureDistributionTable) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        ["Attrition", "n", "Min", "Q1", "Median", "Q3", "Max", "Whiskers", "Outliers"]
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    let (stayed, left) = data.groups();
    for (label, values) in [("0 (stayed)", stayed), ("1 (left)", left)] {
        let Some(stats) = box_stats(&values) else {
            table.add_row(vec![Cell::new(label), Cell::new(0)]);
            continue;
        };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(stats.count),
            Cell::new(format!("{:.1}", stats.min)),
            Cell::new(format!("{:.1}", stats.q1)),
            Cell::new(format!("{:.1}", stats.median)).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.1}", stats.q3)),
            Cell::new(format!("{:.1}", stats.max)),
            Cell::new(format!(
                "{:.1} – {:.1}",
                stats.lower_whisker, stats.upper_whisker
            )),
            Cell::new(stats.outliers.len()),
        ]);
    }

    table
}

/// Diverging red/blue colour centred at 0 (red positive, blue negative)
pub fn diverging_color(value: f64) -> Color {
    let t = value.abs().clamp(0.0, 1.0);
    let fade = (255.0 * (1.0 - t)).round() as u8;
    if value >= 0.0 {
        Color::Rgb {
            r: 255,
            g: fade,
            b: fade,
        }
    } else {
        Color::Rgb {
            r: fade,
            g: fade,
            b: 255,
        }
    }
}

/// Annotated heatmap: two-decimal values coloured by sign and magnitude
pub fn heatmap_table(data: &CorrelationTable) -> Table {
    let matrix = &data.matrix;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    let mut header = vec![Cell::new("")];
    header.extend(
        matrix
            .columns
            .iter()
            .map(|c| Cell::new(c).add_attribute(Attribute::Bold)),
    );
    table.set_header(header);

    for (name, row) in matrix.columns.iter().zip(matrix.values.iter()) {
        let mut cells = vec![Cell::new(name).add_attribute(Attribute::Bold)];
        cells.extend(row.iter().map(|value| match value {
            Some(r) => Cell::new(format!("{:.2}", r))
                .set_alignment(CellAlignment::Right)
                .fg(diverging_color(*r)),
            None => Cell::new("—")
                .set_alignment(CellAlignment::Center)
                .add_attribute(Attribute::Dim),
        }));
        table.add_row(cells);
    }

    table
}

impl RenderSink for TerminalSink {
    fn satisfaction_chart(&mut self, table: &SatisfactionRateTable) -> Result<()> {
        self.header(&format!("Attrition rate by {} (%)", table.column));
        print_indented(&satisfaction_table(table));
        Ok(())
    }

    fn tenure_chart(&mut self, table: &TenureDistributionTable) -> Result<()> {
        self.header(&format!("{} distribution by attrition (box plot)", table.column));
        print_indented(&tenure_table(table));
        Ok(())
    }

    fn category_chart(&mut self, table: &CategoryRateTable) -> Result<()> {
        self.header(&format!(
            "Attrition rate by {}: top {} of {}",
            table.column,
            table.rows.len(),
            table.total_groups
        ));
        print_indented(&category_table(table));
        Ok(())
    }

    fn heatmap(&mut self, table: &CorrelationTable) -> Result<()> {
        self.header("Correlation heatmap (numeric columns)");
        print_indented(&heatmap_table(table));
        if table.selection == ColumnSelection::Fallback {
            print_info("Preferred columns not found; using the first numeric columns");
        }
        if table.rows_dropped > 0 {
            print_info(&format!(
                "{} row(s) with missing values excluded ({} used)",
                table.rows_dropped, table.matrix.rows_used
            ));
        }
        Ok(())
    }

    fn notice(&mut self, notice: &KpiNotice) -> Result<()> {
        self.header(notice.kpi().title());
        match notice {
            KpiNotice::ColumnAbsent { .. } | KpiNotice::NotComputable { .. } => {
                print_info(&notice.to_string())
            }
            KpiNotice::EmptyData { missing, .. } => {
                print_warning(&notice.to_string());
                for (column, count) in missing {
                    println!(
                        "        {} {}: {} missing",
                        style("•").dim(),
                        column,
                        style(count).yellow()
                    );
                }
            }
        }
        Ok(())
    }
}
