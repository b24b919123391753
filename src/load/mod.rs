// src/load/mod.rs

//! Reads the three wage tables and the prefecture coordinate table.
//!
//! Each file goes bytes → decoded text → all-Utf8 Arrow batch → typed rows.
//! Any failure along the way is fatal for the run.

pub mod convert;
pub mod csv;
pub mod decode;
pub mod utils;

use anyhow::{Context, Result};
use arrow::record_batch::RecordBatch;
use encoding_rs::Encoding;
use std::path::Path;
use tracing::{info, instrument};

use crate::config::DataPaths;
use crate::model::{GeoLookup, IndustryWageRecord, WageRecord};

/// All source tables for one dashboard run.
#[derive(Debug, Clone, Default)]
pub struct WageTables {
    /// National wages, all industries, by age bracket.
    pub national: Vec<WageRecord>,
    /// National wages by industry category and age bracket.
    pub by_category: Vec<IndustryWageRecord>,
    /// Prefectural wages, all industries, by age bracket.
    pub prefectural: Vec<WageRecord>,
    pub geo: Vec<GeoLookup>,
}

/// Load every table named in `paths`.
#[instrument(level = "info", skip(paths))]
pub fn load_tables(paths: &DataPaths) -> Result<WageTables> {
    let wage_encoding = decode::encoding_for_label(&paths.wage_encoding)?;

    let national = read_batch(&paths.national_by_industry, wage_encoding)
        .and_then(|b| convert::to_wage_records(&b, false))
        .with_context(|| format!("loading {}", paths.national_by_industry.display()))?;
    let by_category = read_batch(&paths.national_by_category, wage_encoding)
        .and_then(|b| convert::to_industry_records(&b))
        .with_context(|| format!("loading {}", paths.national_by_category.display()))?;
    let prefectural = read_batch(&paths.prefecture_by_industry, wage_encoding)
        .and_then(|b| convert::to_wage_records(&b, true))
        .with_context(|| format!("loading {}", paths.prefecture_by_industry.display()))?;
    let geo = decode::read_utf8(&paths.geo_lookup)
        .and_then(|text| csv::csv_to_string_batch(&text))
        .and_then(|b| convert::to_geo_lookup(&b))
        .with_context(|| format!("loading {}", paths.geo_lookup.display()))?;

    info!(
        national = national.len(),
        by_category = by_category.len(),
        prefectural = prefectural.len(),
        geo = geo.len(),
        "loaded wage tables"
    );

    Ok(WageTables {
        national,
        by_category,
        prefectural,
        geo,
    })
}

fn read_batch(path: &Path, encoding: &'static Encoding) -> Result<RecordBatch> {
    let text = decode::read_decoded(path, encoding)?;
    csv::csv_to_string_batch(&text)
}


#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,wagedash::load=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    #[test]
    fn loads_all_four_tables() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let paths = fixtures::write_fixture_files(dir.path())?;

        let tables = load_tables(&paths)?;
        assert_eq!(tables.national.len(), 9);
        assert_eq!(tables.by_category.len(), 6);
        assert_eq!(tables.prefectural.len(), 8);
        assert_eq!(tables.geo.len(), 4);
        assert_eq!(tables.geo[0].prefecture, "東京都");
        assert_eq!(tables.by_category[1].industry_category, "医療，福祉");
        Ok(())
    }

    #[test]
    fn missing_file_is_fatal_and_named() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let paths = fixtures::write_fixture_files(dir.path())?;
        fs::remove_file(&paths.national_by_category)?;

        let err = format!("{:#}", load_tables(&paths).unwrap_err());
        assert!(err.contains("大分類"), "{}", err);
        Ok(())
    }

    #[test]
    fn malformed_wage_bytes_are_a_decode_error() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let paths = fixtures::write_fixture_files(dir.path())?;
        let mut bytes = fs::read(&paths.prefecture_by_industry)?;
        // 0xFD is never valid in Shift-JIS
        bytes.extend_from_slice(b"2018,13,\xfd\n");
        fs::write(&paths.prefecture_by_industry, bytes)?;

        let err = format!("{:#}", load_tables(&paths).unwrap_err());
        assert!(err.contains("decoding"), "{}", err);
        Ok(())
    }
}
