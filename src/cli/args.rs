//! Command-line argument definitions using clap

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::pipeline::{DashboardConfig, DataSource, LabelMapping};

/// attrikpi - HR attrition KPI dashboard for CSV and Parquet datasets
#[derive(Parser, Debug)]
#[command(name = "attrikpi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (CSV or Parquet).
    /// Falls back to --default-dataset when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Dataset loaded when no input is given
    #[arg(long, default_value = "HR Data.csv")]
    pub default_dataset: PathBuf,

    /// JSON configuration file. Command-line flags override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the correlation heatmap
    #[arg(long, default_value = "false")]
    pub no_heatmap: bool,

    /// Number of categories shown in the category chart
    #[arg(long, value_parser = validate_top_n)]
    pub top_n: Option<usize>,

    /// Numeric 0/1 attrition column
    #[arg(long)]
    pub flag_column: Option<String>,

    /// Text attrition column mapped to the flag when the flag column is absent
    #[arg(long)]
    pub label_column: Option<String>,

    /// Ordinal satisfaction column
    #[arg(long)]
    pub satisfaction_column: Option<String>,

    /// Tenure column (years)
    #[arg(long)]
    pub tenure_column: Option<String>,

    /// Categorical column for the category chart
    #[arg(long)]
    pub category_column: Option<String>,

    /// Label value that means the employee left (maps to 1).
    /// Requires --negative-label.
    #[arg(long, requires = "negative_label")]
    pub positive_label: Option<String>,

    /// Label value that means the employee stayed (maps to 0).
    /// Requires --positive-label.
    #[arg(long, requires = "positive_label")]
    pub negative_label: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Choose the dataset and heatmap option with interactive prompts
    #[arg(long, default_value = "false")]
    pub interactive: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the columns and inferred types of a dataset
    Columns {
        /// Input file path (CSV or Parquet)
        input: PathBuf,

        /// Number of rows to use for schema inference.
        /// Use 0 for full table scan (very slow for large files).
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },
}

/// How the dashboard is rendered
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled tables and bars on stdout
    Terminal,
    /// One JSON document on stdout
    Json,
}

impl Cli {
    /// The dataset to load: the input file, or the bundled default.
    pub fn data_source(&self) -> DataSource {
        DataSource::from_selection(self.input.clone(), &self.default_dataset)
    }

    /// Merge the config file (if any) with command-line overrides.
    pub fn dashboard_config(&self) -> Result<DashboardConfig> {
        let base = match &self.config {
            Some(path) => DashboardConfig::from_file(path)?,
            None => DashboardConfig::default(),
        };
        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, mut config: DashboardConfig) -> DashboardConfig {
        let columns = &mut config.columns;
        let preferred = &mut columns.heatmap_preferred;
        override_preferred(&mut columns.flag, preferred, &self.flag_column);
        override_preferred(&mut columns.satisfaction, preferred, &self.satisfaction_column);
        override_preferred(&mut columns.tenure, preferred, &self.tenure_column);
        override_with(&mut columns.label, &self.label_column);
        override_with(&mut columns.category, &self.category_column);

        if let (Some(positive), Some(negative)) = (&self.positive_label, &self.negative_label) {
            columns.label_mapping = LabelMapping::new(positive.as_str(), negative.as_str());
        }
        if let Some(top_n) = self.top_n {
            config.top_n = top_n;
        }
        if self.no_heatmap {
            config.show_heatmap = false;
        }
        config
    }

    /// Directory offered by the interactive file picker
    pub fn browse_dir(&self) -> &Path {
        self.input
            .as_deref()
            .and_then(Path::parent)
            .or_else(|| self.default_dataset.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}

fn override_with(field: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        *field = value.clone();
    }
}

/// Override a column that also appears in the heatmap list, keeping the
/// list pointed at the new name.
fn override_preferred(field: &mut String, preferred: &mut Vec<String>, value: &Option<String>) {
    let Some(value) = value else {
        return;
    };
    if preferred.contains(value) {
        preferred.retain(|name| name != field);
    } else {
        for name in preferred.iter_mut().filter(|name| **name == *field) {
            *name = value.clone();
        }
    }
    *field = value.clone();
}

/// Validator for top_n parameter
fn validate_top_n(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value == 0 {
        Err("top_n must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
