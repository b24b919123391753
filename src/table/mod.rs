// src/table/mod.rs

//! Arrow views of the derived tables, for printing and export.

pub mod export;

use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, Float64Array, Int32Array, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
    util::pretty::pretty_format_batches,
};
use std::sync::Arc;

use crate::build::{CategoryView, GeoWageRow, TrendPoint};
use crate::model::{columns, WageRecord};

fn batch(fields: Vec<Field>, arrays: Vec<ArrayRef>) -> Result<RecordBatch> {
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).context("building record batch")
}

/// Heatmap source rows, as the "show source" checkbox displays them.
pub fn geo_batch(rows: &[GeoWageRow]) -> Result<RecordBatch> {
    batch(
        vec![
            Field::new(columns::YEAR, DataType::Int32, false),
            Field::new(columns::PREFECTURE, DataType::Utf8, false),
            Field::new(columns::PER_CAPITA_WAGE, DataType::Float64, true),
            Field::new(columns::LONGITUDE, DataType::Float64, true),
            Field::new(columns::LATITUDE, DataType::Float64, true),
            Field::new(columns::NORMALIZED_WAGE, DataType::Float64, true),
        ],
        vec![
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.prefecture.as_str()),
            )),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.per_capita_wage),
            )),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.longitude))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.latitude))),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.normalized_wage),
            )),
        ],
    )
}

/// Year-indexed trend table.
pub fn trend_batch(points: &[TrendPoint]) -> Result<RecordBatch> {
    batch(
        vec![
            Field::new(columns::YEAR, DataType::Int32, false),
            Field::new(columns::NATIONAL_WAGE, DataType::Float64, true),
            Field::new(columns::PREFECTURE_WAGE, DataType::Float64, true),
        ],
        vec![
            Arc::new(Int32Array::from_iter_values(points.iter().map(|p| p.year))),
            Arc::new(Float64Array::from_iter_values(
                points.iter().map(|p| p.national_wage),
            )),
            Arc::new(Float64Array::from_iter_values(
                points.iter().map(|p| p.prefecture_wage),
            )),
        ],
    )
}

/// Per-age-bracket national rows.
pub fn bubble_batch(rows: &[WageRecord]) -> Result<RecordBatch> {
    batch(
        vec![
            Field::new(columns::YEAR, DataType::Int32, false),
            Field::new(columns::AGE, DataType::Utf8, false),
            Field::new(columns::PER_CAPITA_WAGE, DataType::Float64, true),
            Field::new(columns::CONTRACTED_WAGE, DataType::Float64, true),
            Field::new(columns::SPECIAL_BONUS, DataType::Float64, true),
        ],
        vec![
            Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.age_bracket.as_str()),
            )),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.per_capita_wage),
            )),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.contracted_wage),
            )),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.special_bonus),
            )),
        ],
    )
}

/// Industry rows for the selected year, selected metric only.
pub fn category_batch(view: &CategoryView) -> Result<RecordBatch> {
    batch(
        vec![
            Field::new(columns::YEAR, DataType::Int32, false),
            Field::new(columns::INDUSTRY_CATEGORY, DataType::Utf8, false),
            Field::new(columns::AGE, DataType::Utf8, false),
            Field::new(view.metric.column(), DataType::Float64, true),
        ],
        vec![
            Arc::new(Int32Array::from_iter_values(view.rows.iter().map(|r| r.year))),
            Arc::new(StringArray::from_iter_values(
                view.rows.iter().map(|r| r.industry_category.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                view.rows.iter().map(|r| r.age_bracket.as_str()),
            )),
            Arc::new(Float64Array::from_iter_values(
                view.rows.iter().map(|r| r.metric(view.metric)),
            )),
        ],
    )
}

/// Render a batch as an ASCII table.
pub fn pretty(batch: &RecordBatch) -> Result<String> {
    Ok(pretty_format_batches(std::slice::from_ref(batch))
        .context("formatting table")?
        .to_string())
}
