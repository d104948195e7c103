//! `columns` subcommand: print a dataset's schema without loading it

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{describe_columns, ColumnConfig};
use crate::utils::{create_spinner, finish_with_success};

/// Schema table; columns the dashboard reads by default are highlighted
pub fn columns_table(columns: &[(String, String)], known: &ColumnConfig) -> Table {
    let used = [
        known.flag.as_str(),
        known.label.as_str(),
        known.satisfaction.as_str(),
        known.tenure.as_str(),
        known.category.as_str(),
    ];

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Type").add_attribute(Attribute::Bold),
    ]);

    for (i, (name, dtype)) in columns.iter().enumerate() {
        let name_cell = if used.contains(&name.as_str()) {
            Cell::new(name).fg(Color::Cyan).add_attribute(Attribute::Bold)
        } else {
            Cell::new(name)
        };
        table.add_row(vec![Cell::new(i + 1), name_cell, Cell::new(dtype).fg(Color::Yellow)]);
    }

    table
}

/// Run the `columns` subcommand
pub fn run_columns(input: &Path, infer_schema_length: usize) -> Result<()> {
    println!("\n {} Dataset schema", style("◆").cyan().bold());
    println!("   Input: {}", style(input.display()).dim());
    println!();

    let spinner = create_spinner("Reading schema...");
    let columns = describe_columns(input, infer_schema_length)
        .with_context(|| format!("Failed to read schema: {}", input.display()))?;
    finish_with_success(&spinner, &format!("Schema loaded ({} columns)", columns.len()));

    println!();
    for line in columns_table(&columns, &ColumnConfig::default())
        .to_string()
        .lines()
    {
        println!("   {}", line);
    }
    println!();

    Ok(())
}
