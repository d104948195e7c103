//! Unit tests for dataset loader

use attrikpi::pipeline::{
    describe_columns, get_column_names, is_data_file, load_dataset, DashboardError, DataSource,
    DatasetStats,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_load_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "a,b,c").unwrap();
    writeln!(file, "1,2,3").unwrap();
    writeln!(file, "4,5,6").unwrap();
    drop(file);

    let df = load_dataset(&DataSource::File(csv_path), 100).unwrap();
    let stats = DatasetStats::of(&df);

    assert_eq!(stats.rows, 2, "Should have 2 data rows");
    assert_eq!(stats.columns, 3, "Should have 3 columns");
    assert_eq!(df.get_column_names(), &["a", "b", "c"]);
    assert!(stats.memory_mb >= 0.0, "Memory estimate should be non-negative");
}

#[test]
fn test_load_parquet_file() {
    let mut df = common::create_hr_dataframe();
    let (_dir, path) = common::create_temp_parquet(&mut df);

    let loaded = load_dataset(&DataSource::File(path), 100).unwrap();
    common::assert_shape(&loaded, 10, 6);
}

#[test]
fn test_default_source_loads_like_a_file() {
    let mut df = common::create_hr_dataframe();
    let (_dir, path) = common::create_temp_csv(&mut df);

    let loaded = load_dataset(&DataSource::Default(path), 100).unwrap();
    common::assert_shape(&loaded, 10, 6);
}

#[test]
fn test_unsupported_extension_is_load_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.xlsx");
    std::fs::write(&path, "not really excel").unwrap();

    let err = load_dataset(&DataSource::File(path), 100).unwrap_err();
    assert!(matches!(err, DashboardError::Load { .. }));
}

#[test]
fn test_missing_file_message_names_path() {
    let err = load_dataset(&DataSource::File(PathBuf::from("no_such_hr.csv")), 100).unwrap_err();
    assert!(err.to_string().contains("no_such_hr.csv"));
}

#[test]
fn test_upload_source() {
    let source = DataSource::Upload {
        name: "upload.csv".to_string(),
        bytes: b"Attrition,YearsAtCompany\nYes,1\nNo,5\nNo,7\n".to_vec(),
    };

    let df = load_dataset(&source, 0).unwrap();
    common::assert_shape(&df, 3, 2);
    assert_eq!(source.display_name(), "upload.csv");
}

#[test]
fn test_describe_columns_csv() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "name,age").unwrap();
    writeln!(file, "ann,31").unwrap();
    drop(file);

    let columns = describe_columns(&csv_path, 100).unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].0, "name");
    assert_eq!(columns[1].0, "age");

    let names = get_column_names(&csv_path).unwrap();
    assert_eq!(names, vec!["name", "age"]);
}

#[test]
fn test_is_data_file() {
    assert!(is_data_file(Path::new("HR Data.csv")));
    assert!(is_data_file(Path::new("hr.PARQUET")));
    assert!(!is_data_file(Path::new("hr.json")));
    assert!(!is_data_file(Path::new("hr")));
}
