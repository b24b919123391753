// src/load/utils.rs

use anyhow::{anyhow, Result};

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse a wage cell. Missing cells become NaN, like a pandas float column.
pub fn parse_wage(raw: Option<&str>) -> Result<f64> {
    let Some(raw) = raw else {
        return Ok(f64::NAN);
    };
    let cleaned = clean_str(raw).replace(',', "");
    if cleaned.is_empty() {
        return Ok(f64::NAN);
    }
    cleaned
        .parse::<f64>()
        .map_err(|e| anyhow!("not a number: {:?} ({})", raw, e))
}

/// Parse an aggregation year. Unlike wages, a year is never optional.
pub fn parse_year(raw: Option<&str>) -> Result<i32> {
    let raw = raw.ok_or_else(|| anyhow!("missing year"))?;
    let cleaned = clean_str(raw);
    cleaned
        .parse::<i32>()
        .map_err(|e| anyhow!("not a year: {:?} ({})", raw, e))
}

/// Parse a required text cell.
pub fn parse_label(raw: Option<&str>) -> Result<String> {
    let cleaned = raw.map(clean_str).unwrap_or_default();
    if cleaned.is_empty() {
        return Err(anyhow!("missing label"));
    }
    Ok(cleaned)
}
