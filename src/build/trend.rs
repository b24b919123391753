// src/build/trend.rs

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

use crate::model::WageRecord;

/// One year of the national-vs-prefecture line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub national_wage: f64,
    pub prefecture_wage: f64,
}

/// Join the national and `prefecture` all-ages series on year.
///
/// Output is ascending by year with one row per year; a repeated year keeps
/// its first occurrence.
#[instrument(level = "debug", skip(national, prefectural))]
pub fn build_trend(
    national: &[WageRecord],
    prefectural: &[WageRecord],
    prefecture: &str,
) -> Vec<TrendPoint> {
    let mut by_year: HashMap<i32, f64> = HashMap::new();
    for r in prefectural
        .iter()
        .filter(|r| r.is_age_total() && r.prefecture.as_deref() == Some(prefecture))
    {
        by_year.entry(r.year).or_insert(r.per_capita_wage);
    }

    let mut points: Vec<TrendPoint> = national
        .iter()
        .filter(|r| r.is_age_total())
        .filter_map(|r| {
            by_year.get(&r.year).map(|&prefecture_wage| TrendPoint {
                year: r.year,
                national_wage: r.per_capita_wage,
                prefecture_wage,
            })
        })
        .collect();

    points.sort_by_key(|p| p.year);
    let before = points.len();
    points.dedup_by_key(|p| p.year);
    if points.len() != before {
        warn!(
            dropped = before - points.len(),
            "duplicate years in national series, keeping first"
        );
    }

    if points.is_empty() {
        warn!(prefecture, "no overlapping years for trend chart");
    }
    debug!(rows = points.len(), "built trend series");
    points
}
