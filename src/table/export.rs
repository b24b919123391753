// src/table/export.rs

use anyhow::{Context, Result};
use arrow::record_batch::RecordBatch;
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};
use tracing::{info, instrument};

use crate::dashboard::DerivedTables;
use crate::table::{bubble_batch, category_batch, geo_batch, trend_batch};

/// Write one batch to a Snappy-compressed Parquet file; returns its size.
pub fn write_parquet_file(batch: &RecordBatch, output_path: &Path) -> Result<u64> {
    let file = File::create(output_path)
        .with_context(|| format!("creating file {}", output_path.display()))?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .context("creating parquet writer")?;

    writer.write(batch).context("writing batch to parquet")?;
    writer.close().context("closing parquet writer")?;

    let metadata = fs::metadata(output_path).context("getting file metadata")?;
    Ok(metadata.len())
}

/// Write every derived table under `out_dir` as `<name>.parquet`.
#[instrument(level = "info", skip(derived), fields(dir = %out_dir.display()))]
pub fn export_all(derived: &DerivedTables, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating export directory {}", out_dir.display()))?;

    let tables = [
        ("heatmap", geo_batch(&derived.geo)?),
        ("trend", trend_batch(&derived.trend)?),
        ("bubble", bubble_batch(&derived.bubbles)?),
        ("category", category_batch(&derived.category)?),
    ];

    let mut written = Vec::with_capacity(tables.len());
    for (name, batch) in &tables {
        let path = out_dir.join(format!("{}.parquet", name));
        let bytes = write_parquet_file(batch, &path)?;
        info!(table = name, rows = batch.num_rows(), bytes, "exported");
        written.push(path);
    }
    Ok(written)
}
