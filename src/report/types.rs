//! Data structures handed to report sinks
//!
//! Parsers turn their records into an [`ArtifactTable`] and wrap it in an
//! [`ArtifactReport`]. Sinks only ever see these types.

use serde::Serialize;
use std::path::PathBuf;

/// A record type with a fixed column layout
pub trait TableRow {
    /// Column headers, in cell order
    const HEADERS: &'static [&'static str];

    /// Cell values in header order
    fn cells(&self) -> Vec<String>;
}

/// Tabular artifact data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Columns whose cells are embedded as markup instead of escaped text
    pub raw_columns: Vec<String>,
}

impl ArtifactTable {
    /// Build a table from typed records
    pub fn from_records<T: TableRow>(records: &[T]) -> Self {
        Self {
            headers: T::HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: records.iter().map(TableRow::cells).collect(),
            raw_columns: Vec::new(),
        }
    }

    /// Mark a column as raw markup
    pub fn with_raw_column(mut self, header: impl Into<String>) -> Self {
        self.raw_columns.push(header.into());
        self
    }

    /// Whether the column at `index` is embedded unescaped
    pub fn is_raw(&self, index: usize) -> bool {
        self.headers
            .get(index)
            .map(|h| self.raw_columns.iter().any(|r| r == h))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One HTML report section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
    /// Report heading
    pub title: String,
    /// File stem of the rendered report
    pub file_name: String,
    pub description: String,
    /// Evidence files the rows came from
    pub sources: Vec<PathBuf>,
    pub table: ArtifactTable,
}

/// Outcome of one artifact run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArtifactSummary {
    /// Files read and parsed (including ones that yielded no records)
    pub files_processed: usize,
    /// Files skipped because they could not be read or decoded
    pub files_skipped: usize,
    /// Records extracted across all files
    pub records: usize,
    /// Titles of the reports handed to the sink, in emission order
    pub reports: Vec<String>,
}
