//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

use attrikpi::pipeline::{
    CategoryRateTable, CorrelationTable, Kpi, KpiNotice, SatisfactionRateTable,
    TenureDistributionTable,
};
use attrikpi::render::RenderSink;

/// Create a small HR DataFrame with a Yes/No label column
///
/// This DataFrame includes:
/// - `Attrition`: Yes/No label (4 Yes, 6 No)
/// - `EnvironmentSatisfaction`: ordinal 1-4
/// - `YearsAtCompany`: tenure in years
/// - `EducationField`: categorical grouping
/// - `DistanceFromHome`, `PercentSalaryHike`: numeric heatmap columns
pub fn create_hr_dataframe() -> DataFrame {
    df! {
        "Attrition" => ["Yes", "No", "No", "Yes", "No", "No", "Yes", "No", "Yes", "No"],
        "EnvironmentSatisfaction" => [1i64, 4, 3, 1, 2, 4, 2, 3, 1, 4],
        "YearsAtCompany" => [1i64, 10, 7, 2, 5, 12, 3, 8, 0, 20],
        "EducationField" => [
            "Marketing", "Medical", "Life Sciences", "Marketing", "Medical",
            "Life Sciences", "Technical Degree", "Medical", "Marketing", "Other",
        ],
        "DistanceFromHome" => [20i64, 2, 5, 25, 8, 1, 18, 3, 22, 4],
        "PercentSalaryHike" => [11i64, 15, 14, 12, 13, 19, 11, 16, 12, 22],
    }
    .unwrap()
}

/// Same as [`create_hr_dataframe`] but with a numeric 0/1 flag column instead of labels
pub fn create_hr_flag_dataframe() -> DataFrame {
    let mut df = create_hr_dataframe();
    let _ = df.drop_in_place("Attrition").unwrap();
    df.with_column(Column::new(
        "AttritionFlag".into(),
        [1i64, 0, 0, 1, 0, 0, 1, 0, 1, 0],
    ))
    .unwrap();
    df
}

/// Create a larger random HR DataFrame for stress tests
pub fn create_large_hr_dataframe(rows: usize) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let fields = ["Marketing", "Medical", "Life Sciences", "Technical Degree", "Other"];

    let flags: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
    let satisfaction: Vec<i64> = (0..rows).map(|_| rng.gen_range(1..5)).collect();
    let tenure: Vec<f64> = (0..rows).map(|_| rng.gen_range(0.0..40.0)).collect();
    let category: Vec<&str> = (0..rows)
        .map(|_| fields[rng.gen_range(0..fields.len())])
        .collect();

    DataFrame::new(vec![
        Column::new("AttritionFlag".into(), flags),
        Column::new("EnvironmentSatisfaction".into(), satisfaction),
        Column::new("YearsAtCompany".into(), tenure),
        Column::new("EducationField".into(), category),
    ])
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// One call received by a [`RecordingSink`]
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Satisfaction(SatisfactionRateTable),
    Tenure(TenureDistributionTable),
    Category(CategoryRateTable),
    Heatmap(CorrelationTable),
    Notice(KpiNotice),
}

/// Sink that records every call in order
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn notices(&self) -> Vec<&KpiNotice> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Notice(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn notice_for(&self, kpi: Kpi) -> Option<&KpiNotice> {
        self.notices().into_iter().find(|n| n.kpi() == kpi)
    }

    pub fn chart_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| !matches!(e, SinkEvent::Notice(_)))
            .count()
    }
}

impl RenderSink for RecordingSink {
    fn satisfaction_chart(&mut self, table: &SatisfactionRateTable) -> anyhow::Result<()> {
        self.events.push(SinkEvent::Satisfaction(table.clone()));
        Ok(())
    }

    fn tenure_chart(&mut self, table: &TenureDistributionTable) -> anyhow::Result<()> {
        self.events.push(SinkEvent::Tenure(table.clone()));
        Ok(())
    }

    fn category_chart(&mut self, table: &CategoryRateTable) -> anyhow::Result<()> {
        self.events.push(SinkEvent::Category(table.clone()));
        Ok(())
    }

    fn heatmap(&mut self, table: &CorrelationTable) -> anyhow::Result<()> {
        self.events.push(SinkEvent::Heatmap(table.clone()));
        Ok(())
    }

    fn notice(&mut self, notice: &KpiNotice) -> anyhow::Result<()> {
        self.events.push(SinkEvent::Notice(notice.clone()));
        Ok(())
    }
}
