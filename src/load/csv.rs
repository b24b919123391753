// src/load/csv.rs

use anyhow::{anyhow, Context, Result};
use arrow::{
    array::{Array, StringArray},
    compute::concat_batches,
    csv::{reader::Format, ReaderBuilder},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{io::Cursor, sync::Arc};
use tracing::{debug, warn};

use crate::load::utils::clean_str;

const BATCH_SIZE: usize = 8192;

/// Parse CSV text with a header row into a single all-Utf8 batch.
/// Column names come from the header; types are resolved later by name.
pub fn csv_to_string_batch(csv_content: &str) -> Result<RecordBatch> {
    let (inferred, _) = Format::default()
        .with_header(true)
        .with_quote(b'"')
        .with_delimiter(b',')
        .infer_schema(Cursor::new(csv_content.as_bytes()), Some(0))
        .context("reading CSV header")?;
    if inferred.fields().is_empty() {
        return Err(anyhow!("empty CSV: no header row"));
    }
    let headers: Vec<String> = inferred
        .fields()
        .iter()
        .map(|f| clean_str(f.name()))
        .collect();

    let fields: Vec<Field> = headers
        .iter()
        .map(|n| Field::new(n, DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let cursor = Cursor::new(csv_content.as_bytes());
    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_batch_size(BATCH_SIZE)
        .with_quote(b'"')
        .with_delimiter(b',')
        .build(cursor)
        .context("creating CSV reader")?;

    let mut batches = Vec::new();
    for batch in reader {
        match batch {
            Ok(b) => batches.push(b),
            Err(e) => {
                let lines: Vec<&str> = csv_content.lines().take(3).collect();
                warn!("CSV parsing failed. First few lines: {:?}", lines);
                warn!("Expected {} fields, error: {}", headers.len(), e);
                return Err(e).context("reading CSV batch");
            }
        }
    }

    let batch = concat_batches(&schema, &batches).context("concatenating CSV batches")?;
    debug!(rows = batch.num_rows(), cols = batch.num_columns(), "parsed CSV");
    Ok(batch)
}

/// Borrow a named Utf8 column.
pub fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    let col = batch.column_by_name(name).ok_or_else(|| {
        let found: Vec<String> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        anyhow!("missing column {:?} (found {:?})", name, found)
    })?;
    col.as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| anyhow!("column {:?} is {:?}, not Utf8", name, col.data_type()))
}

/// Cell value, or `None` when the cell is null.
pub fn cell(arr: &StringArray, row: usize) -> Option<&str> {
    if arr.is_null(row) {
        None
    } else {
        Some(arr.value(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_defines_columns() -> Result<()> {
        let batch = csv_to_string_batch(
            "\"集計年\",年齢,一人当たり賃金（万円）\r\n2019,年齢計,500.1\r\n2019,20-24歳,\r\n",
        )?;
        assert_eq!(batch.num_rows(), 2);
        let ages = string_column(&batch, "年齢")?;
        assert_eq!(cell(ages, 1), Some("20-24歳"));
        let years = string_column(&batch, "集計年")?;
        assert_eq!(cell(years, 0), Some("2019"));
        let wages = string_column(&batch, "一人当たり賃金（万円）")?;
        assert!(cell(wages, 1).map_or(true, str::is_empty));
        Ok(())
    }

    #[test]
    fn quoted_header_may_contain_a_comma() -> Result<()> {
        let batch = csv_to_string_batch("\"a,b\",c\n1,2\n")?;
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(cell(string_column(&batch, "a,b")?, 0), Some("1"));
        assert_eq!(cell(string_column(&batch, "c")?, 0), Some("2"));
        Ok(())
    }

    #[test]
    fn header_only_file_is_empty_not_an_error() -> Result<()> {
        let batch = csv_to_string_batch("pref_name,lon,lat\n")?;
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 3);
        Ok(())
    }

    #[test]
    fn missing_column_names_what_was_found() -> Result<()> {
        let batch = csv_to_string_batch("a,b\n1,2\n")?;
        let err = string_column(&batch, "c").unwrap_err().to_string();
        assert!(err.contains("\"c\""));
        assert!(err.contains("\"a\""));
        Ok(())
    }

    #[test]
    fn ragged_rows_fail() {
        assert!(csv_to_string_batch("a,b\n1,2,3\n").is_err());
        assert!(csv_to_string_batch("").is_err());
    }
}
