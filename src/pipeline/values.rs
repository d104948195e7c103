//! Column value extraction shared by the normalizer and aggregations

use polars::prelude::*;

/// How a column's values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Coerced to `f64`; unparseable values and NaN become missing
    Numeric,
    /// Rendered as text; only nulls are missing
    Text,
}

/// Check whether the frame has a column with this exact name
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Coerce a column to `f64` values.
///
/// The cast is non-strict, so strings that do not parse turn into nulls
/// instead of failing. NaN is treated as missing.
pub fn column_to_f64_vec(col: &Column) -> PolarsResult<Vec<Option<f64>>> {
    let float_col = col.cast(&DataType::Float64)?;
    Ok(float_col
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Convert a column to a Vec of Option<String> for grouping and label matching
pub fn column_to_string_vec(col: &Column) -> PolarsResult<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = col.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.filter(|n| !n.is_nan()).map(|n| format!("{}", n)))
                .collect()
        }
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}

/// Names of the primitive numeric columns, in schema order
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| col.name().to_string())
        .collect()
}

/// Cast the named non-numeric columns to `f64` in place, nulling values
/// that do not parse. Absent and already numeric columns are left alone.
pub fn coerce_numeric_columns(df: &mut DataFrame, names: &[&str]) -> PolarsResult<()> {
    for name in names {
        if !has_column(df, name) {
            continue;
        }
        let col = df.column(name)?;
        if col.dtype().is_primitive_numeric() {
            continue;
        }
        let cast = col.cast(&DataType::Float64)?;
        df.with_column(cast)?;
    }
    Ok(())
}
