// src/build/category.rs

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::build::distinct;
use crate::model::{IndustryWageRecord, WageMetric};

/// Industry rows for one year plus the bar chart's x-axis bound.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    /// `None` when no year could be selected.
    pub year: Option<i32>,
    pub metric: WageMetric,
    pub rows: Vec<IndustryWageRecord>,
    /// `max(metric) + headroom`; `None` when there is nothing to plot.
    pub axis_max: Option<f64>,
}

impl CategoryView {
    /// A view with no year and no rows.
    pub fn empty(metric: WageMetric) -> Self {
        Self {
            year: None,
            metric,
            rows: Vec::new(),
            axis_max: None,
        }
    }

    /// Age brackets in first-seen order; each is one animation frame.
    pub fn frames(&self) -> Vec<String> {
        distinct(self.rows.iter().map(|r| r.age_bracket.clone()))
    }
}

#[instrument(level = "debug", skip(records))]
pub fn build_category(
    records: &[IndustryWageRecord],
    year: i32,
    metric: WageMetric,
    headroom: f64,
) -> CategoryView {
    let rows: Vec<IndustryWageRecord> = records.iter().filter(|r| r.year == year).cloned().collect();

    let axis_max = rows
        .iter()
        .map(|r| r.metric(metric))
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .map(|m| m + headroom);

    if rows.is_empty() {
        warn!(year, "no industry rows for selected year");
    }
    debug!(rows = rows.len(), ?axis_max, "built category view");

    CategoryView {
        year: Some(year),
        metric,
        rows,
        axis_max,
    }
}
