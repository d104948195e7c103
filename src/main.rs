//! attrikpi: HR attrition KPI dashboard CLI
//!
//! Loads an HR dataset and renders attrition KPIs as terminal tables or JSON.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use attrikpi::cli::{self, confirm_heatmap, select_dataset, Cli, Commands, OutputFormat};
use attrikpi::pipeline::{build_chart_data, render_dashboard, DataSource, DatasetStats, Session};
use attrikpi::render::{JsonSink, RunSummary, TerminalSink};
use attrikpi::utils::{
    create_spinner, finish_with_success, finish_with_warning, hidden_spinner, print_banner,
    print_completion, print_config, print_info,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Columns {
                input,
                infer_schema_length,
            } => cli::columns::run_columns(input, *infer_schema_length),
        };
    }

    let mut config = cli.dashboard_config()?;
    let mut source = cli.data_source();

    if cli.interactive {
        source = match select_dataset(cli.browse_dir())? {
            Some(path) => DataSource::File(path),
            None => DataSource::Default(cli.default_dataset.clone()),
        };
        config.show_heatmap = confirm_heatmap(config.show_heatmap)?;
    }

    let terminal = cli.format == OutputFormat::Terminal;
    let source_name = source.display_name();

    if terminal {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(&source_name, &config);
        if matches!(source, DataSource::Default(_)) {
            print_info("No dataset selected; using the default dataset");
        }
    }

    // Load dataset
    let load_start = Instant::now();
    let spinner = if terminal {
        create_spinner("Loading dataset...")
    } else {
        hidden_spinner()
    };
    let mut session = Session::new(cli.infer_schema_length);
    let df = match session.load(&source) {
        Ok(df) => df,
        Err(e) => {
            finish_with_warning(&spinner, "Failed to load dataset");
            return Err(e.into());
        }
    };
    finish_with_success(&spinner, "Dataset loaded");
    let stats = DatasetStats::of(df);
    let load_time = load_start.elapsed();

    if terminal {
        println!("\n    {} Dataset Statistics:", style("✧").cyan());
        println!("      Rows: {}", stats.rows);
        println!("      Columns: {}", stats.columns);
        println!("      Estimated memory: {:.2} MB", stats.memory_mb);
    }

    // Build and render
    let render_start = Instant::now();
    let data = build_chart_data(df, &config)?;

    match cli.format {
        OutputFormat::Terminal => {
            let mut sink = TerminalSink::new();
            let rendered = render_dashboard(&data, &mut sink)?;

            let mut summary =
                RunSummary::new(source_name, stats, data.attrition.clone(), rendered);
            summary.set_load_time(load_time);
            summary.set_render_time(render_start.elapsed());
            summary.display();
            print_completion();
        }
        OutputFormat::Json => {
            let mut sink = JsonSink::new(&source_name);
            render_dashboard(&data, &mut sink)?;
            sink.finish(std::io::stdout().lock())?;
        }
    }

    Ok(())
}
