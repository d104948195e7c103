//! Attrition flag normalization
//!
//! Every KPI reads a numeric 0/1 attrition column. This module derives it,
//! either by coercing a native flag column or by mapping a Yes/No label column,
//! and returns a new frame; the input frame is never modified.

use polars::prelude::*;
use serde::Serialize;

use super::config::{ColumnConfig, LabelMapping};
use super::error::{DashboardError, Result};
use super::values::{column_to_f64_vec, column_to_string_vec, has_column};

/// Tolerance for floating point comparison when checking binary 0/1 values
const TOLERANCE: f64 = 1e-9;

/// Which column the attrition flag was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagSource {
    /// The flag column already existed and was coerced to numeric
    Native,
    /// The flag was mapped from the Yes/No label column
    Label,
}

/// Row accounting for the derived flag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizationReport {
    pub source: FlagSource,
    /// Column the values were read from
    pub source_column: String,
    pub rows: usize,
    pub events: usize,
    pub non_events: usize,
    /// Rows whose flag is missing after coercion or mapping
    pub missing: usize,
}

/// A frame guaranteed to contain a `Float64` attrition flag column
#[derive(Debug, Clone)]
pub struct NormalizedDataset {
    pub frame: DataFrame,
    pub flag_column: String,
    pub report: NormalizationReport,
}

/// Map a single label to the flag value.
///
/// Exact match only: anything other than the positive or negative label is missing.
pub fn map_label(value: &str, mapping: &LabelMapping) -> Option<f64> {
    if value == mapping.positive {
        Some(1.0)
    } else if value == mapping.negative {
        Some(0.0)
    } else {
        None
    }
}

/// Keep only values that are 0 or 1; anything else is missing.
fn binary_flag(value: Option<f64>) -> Option<f64> {
    value.and_then(|v| {
        if v.abs() < TOLERANCE {
            Some(0.0)
        } else if (v - 1.0).abs() < TOLERANCE {
            Some(1.0)
        } else {
            None
        }
    })
}

/// Derive the numeric attrition flag.
///
/// The native flag column wins when both it and the label column exist.
/// Fails with [`DashboardError::Schema`] when neither is present.
pub fn normalize_attrition(df: &DataFrame, columns: &ColumnConfig) -> Result<NormalizedDataset> {
    let (source, source_column, flags): (FlagSource, &str, Vec<Option<f64>>) =
        if has_column(df, &columns.flag) {
            let values = column_to_f64_vec(df.column(&columns.flag)?)?;
            (
                FlagSource::Native,
                columns.flag.as_str(),
                values.into_iter().map(binary_flag).collect(),
            )
        } else if has_column(df, &columns.label) {
            let labels = column_to_string_vec(df.column(&columns.label)?)?;
            (
                FlagSource::Label,
                columns.label.as_str(),
                labels
                    .iter()
                    .map(|v| v.as_deref().and_then(|s| map_label(s, &columns.label_mapping)))
                    .collect(),
            )
        } else {
            return Err(DashboardError::Schema {
                flag: columns.flag.clone(),
                label: columns.label.clone(),
            });
        };

    let events = flags.iter().filter(|v| **v == Some(1.0)).count();
    let non_events = flags.iter().filter(|v| **v == Some(0.0)).count();
    let report = NormalizationReport {
        source,
        source_column: source_column.to_string(),
        rows: flags.len(),
        events,
        non_events,
        missing: flags.len() - events - non_events,
    };

    let mut frame = df.clone();
    frame.with_column(Column::new(columns.flag.as_str().into(), flags))?;

    Ok(NormalizedDataset {
        frame,
        flag_column: columns.flag.clone(),
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag_values(ds: &NormalizedDataset) -> Vec<Option<f64>> {
        ds.frame
            .column(&ds.flag_column)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_map_label() {
        let mapping = LabelMapping::default();
        assert_eq!(map_label("Yes", &mapping), Some(1.0));
        assert_eq!(map_label("No", &mapping), Some(0.0));
        assert_eq!(map_label("yes", &mapping), None);
        assert_eq!(map_label("", &mapping), None);
        assert_eq!(map_label("Maybe", &mapping), None);
    }

    #[test]
    fn test_label_column_is_mapped() {
        let df = df! {
            "Attrition" => [Some("Yes"), Some("No"), Some("Unknown"), None],
        }
        .unwrap();

        let ds = normalize_attrition(&df, &ColumnConfig::default()).unwrap();

        assert_eq!(ds.report.source, FlagSource::Label);
        assert_eq!(flag_values(&ds), vec![Some(1.0), Some(0.0), None, None]);
        assert_eq!(ds.report.events, 1);
        assert_eq!(ds.report.non_events, 1);
        assert_eq!(ds.report.missing, 2);
    }

    #[test]
    fn test_native_string_flag_is_coerced() {
        let df = df! {
            "AttritionFlag" => ["1", "0", "n/a", "1"],
        }
        .unwrap();

        let ds = normalize_attrition(&df, &ColumnConfig::default()).unwrap();

        assert_eq!(ds.report.source, FlagSource::Native);
        assert_eq!(
            flag_values(&ds),
            vec![Some(1.0), Some(0.0), None, Some(1.0)]
        );
    }

    #[test]
    fn test_native_flag_out_of_domain_is_missing() {
        let df = df! {
            "AttritionFlag" => [0i32, 1, 2, -1],
        }
        .unwrap();

        let ds = normalize_attrition(&df, &ColumnConfig::default()).unwrap();
        assert_eq!(flag_values(&ds), vec![Some(0.0), Some(1.0), None, None]);
        assert_eq!(ds.report.missing, 2);
    }

    #[test]
    fn test_native_flag_wins_over_label() {
        let df = df! {
            "AttritionFlag" => [0i32, 0],
            "Attrition" => ["Yes", "Yes"],
        }
        .unwrap();

        let ds = normalize_attrition(&df, &ColumnConfig::default()).unwrap();
        assert_eq!(ds.report.source, FlagSource::Native);
        assert_eq!(flag_values(&ds), vec![Some(0.0), Some(0.0)]);
    }

    #[test]
    fn test_missing_both_columns_is_schema_error() {
        let df = df! {
            "Department" => ["HR", "IT"],
        }
        .unwrap();

        let result = normalize_attrition(&df, &ColumnConfig::default());
        assert!(matches!(result, Err(DashboardError::Schema { .. })));
    }

    #[test]
    fn test_input_frame_is_not_modified() {
        let df = df! {
            "Attrition" => ["Yes", "No"],
        }
        .unwrap();

        let ds = normalize_attrition(&df, &ColumnConfig::default()).unwrap();
        assert_eq!(df.width(), 1);
        assert_eq!(ds.frame.width(), 2);
    }

    #[test]
    fn test_custom_label_mapping() {
        let mut columns = ColumnConfig::default();
        columns.label_mapping = LabelMapping::new("Left", "Stayed");
        let df = df! {
            "Attrition" => ["Left", "Stayed", "Yes"],
        }
        .unwrap();

        let ds = normalize_attrition(&df, &columns).unwrap();
        assert_eq!(flag_values(&ds), vec![Some(1.0), Some(0.0), None]);
    }
}
