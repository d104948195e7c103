//! Dashboard configuration: column names, label mapping and chart options.
//!
//! Defaults follow the IBM HR attrition dataset layout. A JSON file with any
//! subset of these fields can be loaded with [`DashboardConfig::from_file`].

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default number of categories shown in the category chart.
pub const DEFAULT_TOP_N: usize = 20;

/// Default number of numeric columns used when the preferred heatmap list is unusable.
pub const DEFAULT_HEATMAP_FALLBACK: usize = 8;

/// Label values mapped onto the binary attrition flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMapping {
    /// Value that maps to 1 (employee left)
    pub positive: String,
    /// Value that maps to 0 (employee stayed)
    pub negative: String,
}

impl LabelMapping {
    pub fn new(positive: impl Into<String>, negative: impl Into<String>) -> Self {
        Self {
            positive: positive.into(),
            negative: negative.into(),
        }
    }
}

impl Default for LabelMapping {
    fn default() -> Self {
        Self::new("Yes", "No")
    }
}

/// Names of the dataset columns the dashboard reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Numeric 0/1 attrition column
    pub flag: String,
    /// Yes/No attrition label column, used when `flag` is absent
    pub label: String,
    /// Ordinal satisfaction score
    pub satisfaction: String,
    /// Tenure in years
    pub tenure: String,
    /// Categorical grouping column
    pub category: String,
    /// Columns preferred for the heatmap, in display order
    pub heatmap_preferred: Vec<String>,
    pub label_mapping: LabelMapping,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            flag: "AttritionFlag".to_string(),
            label: "Attrition".to_string(),
            satisfaction: "EnvironmentSatisfaction".to_string(),
            tenure: "YearsAtCompany".to_string(),
            category: "EducationField".to_string(),
            heatmap_preferred: [
                "AttritionFlag",
                "EnvironmentSatisfaction",
                "YearsAtCompany",
                "PercentSalaryHike",
                "StockOptionLevel",
                "DistanceFromHome",
                "YearsInCurrentRole",
                "YearsSinceLastPromotion",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            label_mapping: LabelMapping::default(),
        }
    }
}

/// Full dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub columns: ColumnConfig,
    /// Maximum rows in the category chart
    pub top_n: usize,
    /// Whether the correlation heatmap is computed at all
    pub show_heatmap: bool,
    /// How many numeric columns the heatmap falls back to
    pub heatmap_fallback: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            columns: ColumnConfig::default(),
            top_n: DEFAULT_TOP_N,
            show_heatmap: true,
            heatmap_fallback: DEFAULT_HEATMAP_FALLBACK,
        }
    }
}

impl DashboardConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        if config.top_n == 0 {
            anyhow::bail!("top_n must be at least 1 in {}", path.display());
        }
        Ok(config)
    }
}
