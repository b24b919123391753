// src/build/geo.rs

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

use crate::model::{GeoLookup, WageRecord};

/// A prefectural wage joined to its capital's coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoWageRow {
    pub year: i32,
    pub prefecture: String,
    pub per_capita_wage: f64,
    pub longitude: f64,
    pub latitude: f64,
    /// Per-capita wage rescaled to [0, 1] across the joined rows.
    pub normalized_wage: f64,
}

/// Join the all-ages prefectural rows for `year` with the coordinate table
/// by exact prefecture name, then min-max normalize the wage.
///
/// Rows keep the wage table's order. Names missing from either side are
/// dropped.
#[instrument(level = "debug", skip(prefectural, geo))]
pub fn join_geo(prefectural: &[WageRecord], geo: &[GeoLookup], year: i32) -> Vec<GeoWageRow> {
    let mut coords: HashMap<&str, &GeoLookup> = HashMap::with_capacity(geo.len());
    for g in geo {
        if coords.contains_key(g.prefecture.as_str()) {
            warn!(prefecture = %g.prefecture, "duplicate prefecture in geo lookup, keeping first");
            continue;
        }
        coords.insert(g.prefecture.as_str(), g);
    }

    let mut rows = Vec::new();
    for r in prefectural
        .iter()
        .filter(|r| r.is_age_total() && r.year == year)
    {
        let Some(name) = r.prefecture.as_deref() else {
            continue;
        };
        match coords.get(name) {
            Some(g) => rows.push(GeoWageRow {
                year: r.year,
                prefecture: name.to_string(),
                per_capita_wage: r.per_capita_wage,
                longitude: g.longitude,
                latitude: g.latitude,
                normalized_wage: f64::NAN,
            }),
            None => warn!(prefecture = %name, "no coordinates for prefecture, dropping row"),
        }
    }

    let wages: Vec<f64> = rows.iter().map(|r| r.per_capita_wage).collect();
    for (row, n) in rows.iter_mut().zip(normalize(&wages)) {
        row.normalized_wage = n;
    }

    debug!(rows = rows.len(), "joined prefectural wages to coordinates");
    rows
}

/// `(v - min) / (max - min)`, skipping NaN when finding the bounds.
///
/// When every value is equal (or there are none) the range is zero and each
/// result is NaN; the heatmap treats those points as weightless.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let (min, max) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    if range.is_nan() || range <= 0.0 {
        if !values.is_empty() {
            warn!(min, max, "wage range is zero, normalized values are undefined");
        }
        return vec![f64::NAN; values.len()];
    }
    values.iter().map(|v| (v - min) / range).collect()
}
