//! Column access helpers shared by the pipeline stages.

use anyhow::{bail, Context, Result};
use polars::prelude::*;

/// Extract a column as strings, preserving nulls.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let col = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;
    let cast = col
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' is not castable to string", name))?;
    let values = cast
        .str()
        .with_context(|| format!("Column '{}' has an unexpected dtype", name))?;
    Ok(values
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

/// Extract a column as floats, preserving nulls. Values that cannot be
/// represented as a float become null rather than failing the batch.
pub fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let col = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;
    let cast = col
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not castable to float", name))?;
    let values = cast
        .f64()
        .with_context(|| format!("Column '{}' has an unexpected dtype", name))?;
    Ok(values.into_iter().collect())
}

/// Extract a column the cleaner has already made null-free.
pub fn required_strings(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let mut out = Vec::with_capacity(df.height());
    for value in string_values(df, name)? {
        match value {
            Some(v) => out.push(v),
            None => bail!("Column '{}' unexpectedly contains nulls", name),
        }
    }
    Ok(out)
}

/// Extract a numeric column the cleaner has already made null-free.
pub fn required_floats(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let mut out = Vec::with_capacity(df.height());
    for value in float_values(df, name)? {
        match value {
            Some(v) => out.push(v),
            None => bail!("Column '{}' unexpectedly contains nulls", name),
        }
    }
    Ok(out)
}

/// Extract an integer column (Month, DayOfWeek, the category codes).
pub fn required_ints(df: &DataFrame, name: &str) -> Result<Vec<i32>> {
    let col = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;
    let cast = col
        .cast(&DataType::Int32)
        .with_context(|| format!("Column '{}' is not castable to int", name))?;
    let values = cast
        .i32()
        .with_context(|| format!("Column '{}' has an unexpected dtype", name))?;
    let mut out = Vec::with_capacity(df.height());
    for value in values.into_iter() {
        match value {
            Some(v) => out.push(v),
            None => bail!("Column '{}' unexpectedly contains nulls", name),
        }
    }
    Ok(out)
}
