// src/build/mod.rs

//! Per-panel transformations. Each builder takes the loaded tables plus
//! the relevant selection and returns a fresh derived table.

pub mod bubble;
pub mod category;
pub mod geo;
pub mod trend;

pub use bubble::{bubble_frames, build_bubbles};
pub use category::{build_category, CategoryView};
pub use geo::{join_geo, normalize, GeoWageRow};
pub use trend::{build_trend, TrendPoint};

use serde::Serialize;

use crate::load::WageTables;
use crate::model::WageMetric;

/// Choices offered by the dashboard's select boxes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetOptions {
    /// Prefectures with an all-ages row, in file order.
    pub prefectures: Vec<String>,
    /// Years present in the industry-category table, in file order.
    pub years: Vec<i32>,
    pub metrics: Vec<WageMetric>,
}

pub fn widget_options(tables: &WageTables) -> WidgetOptions {
    WidgetOptions {
        prefectures: distinct(
            tables
                .prefectural
                .iter()
                .filter(|r| r.is_age_total())
                .filter_map(|r| r.prefecture.clone()),
        ),
        years: distinct(tables.by_category.iter().map(|r| r.year)),
        metrics: WageMetric::ALL.to_vec(),
    }
}

/// Distinct values in first-seen order.
pub(crate) fn distinct<T: PartialEq>(values: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}
