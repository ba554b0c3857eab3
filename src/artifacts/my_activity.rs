//! Google Takeout "My Activity" HTML files
//!
//! Takeout stores one activity log per Google service:
//!
//! ```text
//! Takeout/
//! └── My Activity/
//!     ├── Ads/MyActivity.html
//!     ├── Chrome/MyActivity.html
//!     └── YouTube/MyActivity.html
//! ```
//!
//! The service is taken from the directory under `My Activity`, and the HTML
//! is embedded as-is in a one-row report so the examiner sees the original
//! page.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use super::{read_or_skip, ArtifactDescriptor};
use crate::config::ExtractionOptions;
use crate::error::ArtifactResult;
use crate::report::{ArtifactReport, ArtifactSummary, ArtifactTable, ReportSink, TableRow};

/// Directory segment that precedes the service name
pub const MY_ACTIVITY_DIR: &str = "My Activity";

/// Service name used when the path has no `My Activity/<Service>` pair
pub const UNKNOWN_SERVICE: &str = "Unknown";

/// Column holding the embedded HTML
pub const HTML_COLUMN: &str = "HTML File";

pub const DESCRIPTOR: ArtifactDescriptor = ArtifactDescriptor {
    key: "takeoutMyActivity",
    name: "Google Takeout My Activity",
    description: "Parses and displays MyActivity.html files from Google Takeout for various \
                  services (e.g., Ads, Chrome, YouTube).",
    author: "Gemini",
    version: "1.2",
    date: "2025-07-21",
    requirements: "none",
    category: "Google Takeout Archive",
    notes: "This artifact embeds the original HTML file from the Takeout into the report, \
            allowing for manual review. It creates a separate report for each service's \
            MyActivity.html file found.",
    paths: &["*/My Activity/*/MyActivity.html"],
    function: "get_takeoutMyActivityHtml",
    entry: process,
};

/// Google service an activity file belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn unknown() -> Self {
        ServiceName(UNKNOWN_SERVICE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_SERVICE
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the service name from an activity file's path.
///
/// The service is the segment right after the first `My Activity` segment.
/// Both `/` and `\` separate segments; empty and `.` segments are ignored.
/// Never fails: a missing or trailing `My Activity` gives `Unknown`.
pub fn classify(path: &Path) -> ServiceName {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let segments: Vec<&str> = normalized
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    segments
        .iter()
        .position(|s| *s == MY_ACTIVITY_DIR)
        .and_then(|i| segments.get(i + 1))
        .map(|s| ServiceName(s.to_string()))
        .unwrap_or_else(ServiceName::unknown)
}

/// One MyActivity.html file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRecord {
    pub service: ServiceName,
    pub raw_html: String,
    pub source_path: PathBuf,
}

impl TableRow for ActivityRecord {
    const HEADERS: &'static [&'static str] = &[HTML_COLUMN];

    fn cells(&self) -> Vec<String> {
        vec![self.raw_html.clone()]
    }
}

impl ActivityRecord {
    pub fn new(source_path: impl Into<PathBuf>, raw_html: impl Into<String>) -> Self {
        let source_path = source_path.into();
        Self {
            service: classify(&source_path),
            raw_html: raw_html.into(),
            source_path,
        }
    }

    pub fn title(&self) -> String {
        format!("Google Takeout - My Activity - {}", self.service)
    }

    /// Report section embedding the HTML unescaped
    pub fn to_report(&self) -> ArtifactReport {
        ArtifactReport {
            title: self.title(),
            file_name: format!("My Activity - {}", self.service),
            description: format!("MyActivity.html file for the {} service.", self.service),
            sources: vec![self.source_path.clone()],
            table: ArtifactTable::from_records(std::slice::from_ref(self))
                .with_raw_column(HTML_COLUMN),
        }
    }
}

/// Emit one report per MyActivity.html file
#[instrument(skip_all, fields(files = files.len(), report_dir = %report_dir.display()))]
pub fn process(
    files: &[PathBuf],
    report_dir: &Path,
    sink: &mut dyn ReportSink,
    options: &ExtractionOptions,
) -> ArtifactResult<ArtifactSummary> {
    let mut summary = ArtifactSummary::default();

    for path in files {
        let Some(html) = read_or_skip(DESCRIPTOR.key, path, options, &mut summary)? else {
            continue;
        };
        summary.files_processed += 1;

        let record = ActivityRecord::new(path, html);
        if record.service.is_unknown() {
            debug!(path = %path.display(), "No My Activity service segment in path");
        }

        let report = record.to_report();
        sink.write_html_report(report_dir, &report)?;
        debug!(service = %record.service, path = %path.display(), "My Activity report written");

        summary.records += 1;
        summary.reports.push(report.title);
    }

    Ok(summary)
}
