//! Dataset loader for CSV and Parquet files and uploaded CSV bytes

use std::io::Cursor;
use std::path::{Path, PathBuf};

use polars::prelude::*;

use super::error::{DashboardError, Result};

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Bundled dataset used when the user supplies nothing
    Default(PathBuf),
    /// A file chosen by the user
    File(PathBuf),
    /// Raw CSV bytes, e.g. from an upload control
    Upload { name: String, bytes: Vec<u8> },
}

impl DataSource {
    /// Pick the selected file, falling back to the bundled default.
    pub fn from_selection(selected: Option<PathBuf>, default_path: &Path) -> Self {
        match selected {
            Some(path) => DataSource::File(path),
            None => DataSource::Default(default_path.to_path_buf()),
        }
    }

    /// Human-readable name for messages and report metadata.
    pub fn display_name(&self) -> String {
        match self {
            DataSource::Default(path) | DataSource::File(path) => path.display().to_string(),
            DataSource::Upload { name, .. } => name.clone(),
        }
    }

    pub(crate) fn origin(&self) -> PathBuf {
        match self {
            DataSource::Default(path) | DataSource::File(path) => path.clone(),
            DataSource::Upload { name, .. } => PathBuf::from(name),
        }
    }
}

/// Shape and memory footprint of a loaded frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetStats {
    pub rows: usize,
    pub columns: usize,
    pub memory_mb: f64,
}

impl DatasetStats {
    pub fn of(df: &DataFrame) -> Self {
        let (rows, columns) = df.shape();
        Self {
            rows,
            columns,
            memory_mb: df.estimated_size() as f64 / (1024.0 * 1024.0),
        }
    }
}

/// Convert the CLI schema length convention (0 = full scan) to polars'.
fn schema_length(infer_schema_length: usize) -> Option<usize> {
    if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    }
}

/// Load a dataset from any source into memory.
///
/// Every failure, including an unreadable file, malformed CSV or an unknown
/// extension, is reported as [`DashboardError::Load`].
pub fn load_dataset(source: &DataSource, infer_schema_length: usize) -> Result<DataFrame> {
    let schema_length = schema_length(infer_schema_length);

    let loaded = match source {
        DataSource::Default(path) | DataSource::File(path) => read_path(path, schema_length),
        DataSource::Upload { bytes, .. } => CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(schema_length)
            .into_reader_with_file_handle(Cursor::new(bytes.clone()))
            .finish(),
    };

    loaded.map_err(|e| DashboardError::Load {
        path: source.origin(),
        message: e.to_string(),
    })
}

fn read_path(path: &Path, schema_length: Option<usize>) -> PolarsResult<DataFrame> {
    if !path.is_file() {
        return Err(PolarsError::ComputeError(
            format!("file not found: {}", path.display()).into(),
        ));
    }

    match file_extension(path).as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(schema_length)
            .finish()?
            .collect(),
        "parquet" => LazyFrame::scan_parquet(path, Default::default())?.collect(),
        other => Err(PolarsError::ComputeError(
            format!("unsupported file format '{}'. Supported formats: csv, parquet", other).into(),
        )),
    }
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Check if a path looks like a loadable data file
pub fn is_data_file(path: &Path) -> bool {
    matches!(file_extension(path).as_str(), "csv" | "parquet")
}

/// Read column names and dtypes without loading the data.
pub fn describe_columns(path: &Path, infer_schema_length: usize) -> Result<Vec<(String, String)>> {
    let schema_length = schema_length(infer_schema_length);
    let load_err = |e: PolarsError| DashboardError::Load {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut lf = match file_extension(path).as_str() {
        "parquet" => LazyFrame::scan_parquet(path, Default::default()).map_err(load_err)?,
        _ => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(schema_length)
            .finish()
            .map_err(load_err)?,
    };

    let schema = lf.collect_schema().map_err(load_err)?;
    Ok(schema
        .iter()
        .map(|(name, dtype)| (name.to_string(), dtype.to_string()))
        .collect())
}

/// Read only the column names of a dataset.
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    Ok(describe_columns(path, 100)?
        .into_iter()
        .map(|(name, _)| name)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_length_zero_means_full_scan() {
        assert_eq!(schema_length(0), None);
        assert_eq!(schema_length(500), Some(500));
    }

    #[test]
    fn test_from_selection_falls_back_to_default() {
        let default = Path::new("HR Data.csv");
        assert_eq!(
            DataSource::from_selection(None, default),
            DataSource::Default(PathBuf::from("HR Data.csv"))
        );
        assert_eq!(
            DataSource::from_selection(Some(PathBuf::from("mine.csv")), default),
            DataSource::File(PathBuf::from("mine.csv"))
        );
    }

    #[test]
    fn test_load_upload_bytes() {
        let source = DataSource::Upload {
            name: "upload.csv".to_string(),
            bytes: b"a,b\n1,x\n2,y\n".to_vec(),
        };
        let df = load_dataset(&source, 100).unwrap();
        assert_eq!(df.shape(), (2, 2));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let source = DataSource::File(PathBuf::from("/definitely/not/here.csv"));
        let err = load_dataset(&source, 100).unwrap_err();
        assert!(matches!(err, DashboardError::Load { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_is_data_file() {
        assert!(is_data_file(Path::new("HR Data.CSV")));
        assert!(is_data_file(Path::new("x.parquet")));
        assert!(!is_data_file(Path::new("notes.txt")));
    }
}
