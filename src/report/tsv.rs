//! TSV exports
//!
//! One tab-delimited file per artifact table: a header row followed by the
//! data rows. Fields are quoted only when they contain a tab, quote or
//! newline. Existing files are replaced, so identical input gives
//! byte-identical output.

use std::fs;
use std::path::{Path, PathBuf};

use super::types::ArtifactTable;
use crate::common::sanitize_filename;
use crate::error::ArtifactResult;

/// Write `table` to `{folder}/{name}.tsv` and return the file path
pub fn write_tsv(folder: &Path, name: &str, table: &ArtifactTable) -> ArtifactResult<PathBuf> {
    fs::create_dir_all(folder)?;
    let path = folder.join(format!("{}.tsv", sanitize_filename(name)));

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(&path)?;

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(path)
}
