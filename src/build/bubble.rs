// src/build/bubble.rs

use tracing::debug;

use crate::build::distinct;
use crate::model::WageRecord;

/// National rows broken out by age bracket, one per (year, bracket).
pub fn build_bubbles(national: &[WageRecord]) -> Vec<WageRecord> {
    let rows: Vec<WageRecord> = national
        .iter()
        .filter(|r| !r.is_age_total())
        .cloned()
        .collect();
    debug!(rows = rows.len(), "built bubble rows");
    rows
}

/// Animation frames for the bubble chart: every year, ascending.
pub fn bubble_frames(rows: &[WageRecord]) -> Vec<i32> {
    let mut years = distinct(rows.iter().map(|r| r.year));
    years.sort_unstable();
    years
}
