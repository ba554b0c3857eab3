//! Artifact report output
//!
//! Parsers never write files themselves. They hand an [`ArtifactReport`] or
//! [`ArtifactTable`] to a [`ReportSink`], which owns the output layout.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌─────────────────────────────┐
//! │   Takeout    │────▶│   Artifact   │────▶│         ReportSink          │
//! │   files      │     │   parsers    │     │  ┌──────┐ ┌─────┐ ┌──────┐  │
//! └──────────────┘     └──────────────┘     │  │ HTML │ │ TSV │ │ TL   │  │
//!                                           │  │ tera │ │ csv │ │sqlite│  │
//!                                           │  └──────┘ └─────┘ └──────┘  │
//!                                           └─────────────────────────────┘
//! ```
//!
//! [`FsReportSink`] is the filesystem implementation; hosts with their own
//! renderer implement the trait instead.

pub mod template;
pub mod timeline;
pub mod tsv;
pub mod types;

// Re-exports for convenience
pub use template::TemplateEngine;
pub use timeline::TimelineEntry;
pub use types::*;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::common::{audit, sanitize_filename};
use crate::config::ReportLayout;
use crate::error::ArtifactResult;

/// Destination for artifact output
pub trait ReportSink {
    /// Render one HTML report section; returns where it was written
    fn write_html_report(
        &mut self,
        report_dir: &Path,
        report: &ArtifactReport,
    ) -> ArtifactResult<PathBuf>;

    /// Export a table as TSV; returns where it was written
    fn write_tsv(
        &mut self,
        report_dir: &Path,
        name: &str,
        table: &ArtifactTable,
    ) -> ArtifactResult<PathBuf>;

    /// Add a table's rows to the timeline, keyed by the first column
    fn write_timeline(
        &mut self,
        report_dir: &Path,
        activity: &str,
        table: &ArtifactTable,
    ) -> ArtifactResult<()>;
}

/// Writes HTML, TSV and timeline output under a report directory
pub struct FsReportSink {
    template_engine: TemplateEngine,
    layout: ReportLayout,
}

impl FsReportSink {
    /// Create a sink with the default layout and built-in template
    pub fn new() -> ArtifactResult<Self> {
        Self::with_layout(ReportLayout::default())
    }

    /// Create a sink with a custom layout
    pub fn with_layout(layout: ReportLayout) -> ArtifactResult<Self> {
        layout.validate()?;
        let template_engine = match &layout.template_dir {
            Some(dir) => TemplateEngine::with_directory(dir)?,
            None => TemplateEngine::new()?,
        };
        Ok(Self {
            template_engine,
            layout,
        })
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }
}

impl ReportSink for FsReportSink {
    #[instrument(skip(self, report), fields(title = %report.title))]
    fn write_html_report(
        &mut self,
        report_dir: &Path,
        report: &ArtifactReport,
    ) -> ArtifactResult<PathBuf> {
        let html = self.template_engine.render_html(report)?;
        fs::create_dir_all(report_dir)?;
        let path = report_dir.join(format!("{}.html", sanitize_filename(&report.file_name)));
        fs::write(&path, html)?;

        debug!(path = %path.display(), rows = report.table.len(), "Wrote HTML report");
        audit::log_report_output("html", &report.title, &path, report.table.len());
        Ok(path)
    }

    #[instrument(skip(self, table))]
    fn write_tsv(
        &mut self,
        report_dir: &Path,
        name: &str,
        table: &ArtifactTable,
    ) -> ArtifactResult<PathBuf> {
        let path = tsv::write_tsv(&self.layout.tsv_folder(report_dir), name, table)?;

        debug!(path = %path.display(), rows = table.len(), "Wrote TSV export");
        audit::log_report_output("tsv", name, &path, table.len());
        Ok(path)
    }

    #[instrument(skip(self, table))]
    fn write_timeline(
        &mut self,
        report_dir: &Path,
        activity: &str,
        table: &ArtifactTable,
    ) -> ArtifactResult<()> {
        let db_path = self.layout.timeline_path(report_dir);
        let inserted = timeline::append(&db_path, activity, table)?;

        debug!(path = %db_path.display(), rows = inserted, "Appended timeline entries");
        audit::log_report_output("timeline", activity, &db_path, inserted);
        Ok(())
    }
}

/// In-memory sink used by parser tests
#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub html: Vec<ArtifactReport>,
        pub tsv: Vec<(String, ArtifactTable)>,
        pub timeline: Vec<(String, ArtifactTable)>,
    }

    impl ReportSink for RecordingSink {
        fn write_html_report(
            &mut self,
            report_dir: &Path,
            report: &ArtifactReport,
        ) -> ArtifactResult<PathBuf> {
            self.html.push(report.clone());
            Ok(report_dir.join(format!("{}.html", report.file_name)))
        }

        fn write_tsv(
            &mut self,
            report_dir: &Path,
            name: &str,
            table: &ArtifactTable,
        ) -> ArtifactResult<PathBuf> {
            self.tsv.push((name.to_string(), table.clone()));
            Ok(report_dir.join(format!("{name}.tsv")))
        }

        fn write_timeline(
            &mut self,
            _report_dir: &Path,
            activity: &str,
            table: &ArtifactTable,
        ) -> ArtifactResult<()> {
            self.timeline.push((activity.to_string(), table.clone()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watched_table() -> ArtifactTable {
        ArtifactTable {
            headers: vec!["Published Timestamp".to_string(), "Search Query".to_string()],
            rows: vec![vec!["2024-01-02 03:04:05".to_string(), "cats".to_string()]],
            raw_columns: Vec::new(),
        }
    }

    #[test]
    fn test_fs_sink_layout() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsReportSink::new().unwrap();
        let report = ArtifactReport {
            title: "Google Search Contributions - Watched".to_string(),
            file_name: "Google Search Contributions - Watched".to_string(),
            description: "Movies and TV shows that the user reported as already watched."
                .to_string(),
            sources: Vec::new(),
            table: watched_table(),
        };

        let html = sink.write_html_report(dir.path(), &report).unwrap();
        let tsv = sink
            .write_tsv(dir.path(), &report.title, &report.table)
            .unwrap();
        sink.write_timeline(dir.path(), &report.title, &report.table)
            .unwrap();

        assert_eq!(
            html,
            dir.path().join("Google Search Contributions - Watched.html")
        );
        assert_eq!(
            tsv,
            dir.path()
                .join("_TSV Exports")
                .join("Google Search Contributions - Watched.tsv")
        );
        let tl = timeline::entries(&sink.layout().timeline_path(dir.path())).unwrap();
        assert_eq!(tl.len(), 1);
        assert_eq!(tl[0].key, "2024-01-02 03:04:05");
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let layout = ReportLayout {
            tsv_dir: "../outside".to_string(),
            ..ReportLayout::default()
        };
        assert!(FsReportSink::with_layout(layout).is_err());
    }
}
