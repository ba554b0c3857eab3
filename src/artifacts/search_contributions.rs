//! Google Search Contributions (Takeout JSON)
//!
//! The `Search Contributions` folder holds up to four JSON arrays:
//!
//! | File                             | Bucket              |
//! |----------------------------------|---------------------|
//! | `Streaming video providers.json` | Streaming Providers |
//! | `Reviews.json`                   | Reviews             |
//! | `Watched.json`                   | Watched             |
//! | `Thumbs.json`                    | Thumbs              |
//!
//! Processing runs in two stages. [`extract`] reads every file into four
//! buckets; [`emit`] then writes one HTML report, TSV export and timeline feed
//! per non-empty bucket.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, trace, warn};

use super::{read_or_skip, ArtifactDescriptor};
use crate::common::{audit, normalize_timestamp};
use crate::config::ExtractionOptions;
use crate::error::ArtifactResult;
use crate::report::{ArtifactReport, ArtifactSummary, ArtifactTable, ReportSink, TableRow};

pub const DESCRIPTOR: ArtifactDescriptor = ArtifactDescriptor {
    key: "takeoutSearchContributions",
    name: "Google Search Contributions",
    description: "Parses Google Search Contributions from Takeout for reviews, watched content, \
                  streaming providers, and thumb ratings.",
    author: "Gemini",
    version: "1.0",
    date: "2025-07-21",
    requirements: "none",
    category: "Google Takeout Archive",
    notes: "",
    paths: &["*/Search Contributions/*.json"],
    function: "get_takeoutSearchContributions",
    entry: process,
};

const PUBLISHED: &str = "Published";
const UPDATED: &str = "Updated";
const SEARCH_QUERY: &str = "Search Query";
const PROVIDER_NAME: &str = "Provider Name";
const REVIEW_COMMENT: &str = "Review Comment";
const REVIEW_STAR_RATING: &str = "Review Star Rating";
const THUMBS_RATING: &str = "Thumbs Rating";

/// Which Search Contributions file a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContributionKind {
    StreamingProviders,
    Reviews,
    Watched,
    Thumbs,
}

impl ContributionKind {
    pub const ALL: [ContributionKind; 4] = [
        ContributionKind::StreamingProviders,
        ContributionKind::Reviews,
        ContributionKind::Watched,
        ContributionKind::Thumbs,
    ];

    /// Exact Takeout file name for this kind
    pub fn file_name(&self) -> &'static str {
        match self {
            ContributionKind::StreamingProviders => "Streaming video providers.json",
            ContributionKind::Reviews => "Reviews.json",
            ContributionKind::Watched => "Watched.json",
            ContributionKind::Thumbs => "Thumbs.json",
        }
    }

    /// Classify by exact base name; anything else is not a contribution file
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.file_name() == name)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(Self::from_file_name)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContributionKind::StreamingProviders => "Streaming Providers",
            ContributionKind::Reviews => "Reviews",
            ContributionKind::Watched => "Watched",
            ContributionKind::Thumbs => "Thumbs",
        }
    }

    /// Report title, also used as TSV name and timeline activity
    pub fn title(&self) -> String {
        format!("Google Search Contributions - {}", self.label())
    }

    pub fn description(&self) -> &'static str {
        match self {
            ContributionKind::StreamingProviders => {
                "User-reported information about streaming providers that the user is subscribed to."
            }
            ContributionKind::Reviews => "Reviews for movies, TV shows, music albums, etc.",
            ContributionKind::Watched => {
                "Movies and TV shows that the user reported as already watched."
            }
            ContributionKind::Thumbs => "Thumb ratings for movies, TV shows, music albums, etc.",
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ContributionKind::StreamingProviders => StreamingProvider::HEADERS,
            ContributionKind::Reviews => Review::HEADERS,
            ContributionKind::Watched => WatchedEntry::HEADERS,
            ContributionKind::Thumbs => ThumbsRating::HEADERS,
        }
    }
}

/// Text value of a field; absent, `null`, arrays and objects give `""`
fn text_field(item: &Map<String, Value>, key: &str) -> String {
    match item.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn timestamp_field(item: &Map<String, Value>, key: &str) -> String {
    normalize_timestamp(&text_field(item, key))
}

/// A record built from one object of a contribution array
pub trait ContributionRecord: TableRow + Sized {
    fn from_item(item: &Map<String, Value>) -> Self;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamingProvider {
    pub published: String,
    pub provider_name: String,
}

impl TableRow for StreamingProvider {
    const HEADERS: &'static [&'static str] = &["Published Timestamp", "Provider Name"];

    fn cells(&self) -> Vec<String> {
        vec![self.published.clone(), self.provider_name.clone()]
    }
}

impl ContributionRecord for StreamingProvider {
    fn from_item(item: &Map<String, Value>) -> Self {
        Self {
            published: timestamp_field(item, PUBLISHED),
            provider_name: text_field(item, PROVIDER_NAME),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Review {
    pub published: String,
    pub updated: String,
    pub search_query: String,
    pub star_rating: String,
    pub comment: String,
}

impl TableRow for Review {
    const HEADERS: &'static [&'static str] = &[
        "Published Timestamp",
        "Updated Timestamp",
        "Search Query",
        "Star Rating",
        "Comment",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.published.clone(),
            self.updated.clone(),
            self.search_query.clone(),
            self.star_rating.clone(),
            self.comment.clone(),
        ]
    }
}

impl ContributionRecord for Review {
    fn from_item(item: &Map<String, Value>) -> Self {
        Self {
            published: timestamp_field(item, PUBLISHED),
            updated: timestamp_field(item, UPDATED),
            search_query: text_field(item, SEARCH_QUERY),
            star_rating: text_field(item, REVIEW_STAR_RATING),
            comment: text_field(item, REVIEW_COMMENT),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WatchedEntry {
    pub published: String,
    pub search_query: String,
}

impl TableRow for WatchedEntry {
    const HEADERS: &'static [&'static str] = &["Published Timestamp", "Search Query"];

    fn cells(&self) -> Vec<String> {
        vec![self.published.clone(), self.search_query.clone()]
    }
}

impl ContributionRecord for WatchedEntry {
    fn from_item(item: &Map<String, Value>) -> Self {
        Self {
            published: timestamp_field(item, PUBLISHED),
            search_query: text_field(item, SEARCH_QUERY),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThumbsRating {
    pub published: String,
    pub updated: String,
    pub search_query: String,
    pub thumbs_rating: String,
}

impl TableRow for ThumbsRating {
    const HEADERS: &'static [&'static str] = &[
        "Published Timestamp",
        "Updated Timestamp",
        "Search Query",
        "Thumbs Rating",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.published.clone(),
            self.updated.clone(),
            self.search_query.clone(),
            self.thumbs_rating.clone(),
        ]
    }
}

impl ContributionRecord for ThumbsRating {
    fn from_item(item: &Map<String, Value>) -> Self {
        Self {
            published: timestamp_field(item, PUBLISHED),
            updated: timestamp_field(item, UPDATED),
            search_query: text_field(item, SEARCH_QUERY),
            thumbs_rating: text_field(item, THUMBS_RATING),
        }
    }
}

/// Records of one kind plus the files they came from, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket<T> {
    pub records: Vec<T>,
    pub sources: Vec<PathBuf>,
}

impl<T> Default for Bucket<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            sources: Vec::new(),
        }
    }
}

impl<T> Bucket<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: ContributionRecord> Bucket<T> {
    /// Append the objects of one parsed array; returns how many were added
    pub fn extend_from(&mut self, path: &Path, items: &[Value]) -> usize {
        let before = self.records.len();
        for (index, item) in items.iter().enumerate() {
            match item.as_object() {
                Some(object) => self.records.push(T::from_item(object)),
                None => warn!(
                    path = %path.display(),
                    index = index,
                    "Skipping non-object entry in Search Contributions array"
                ),
            }
        }
        self.sources.push(path.to_path_buf());
        self.records.len() - before
    }
}

/// The four contribution buckets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionBuckets {
    pub streaming_providers: Bucket<StreamingProvider>,
    pub reviews: Bucket<Review>,
    pub watched: Bucket<WatchedEntry>,
    pub thumbs: Bucket<ThumbsRating>,
}

impl ContributionBuckets {
    pub fn len_of(&self, kind: ContributionKind) -> usize {
        match kind {
            ContributionKind::StreamingProviders => self.streaming_providers.len(),
            ContributionKind::Reviews => self.reviews.len(),
            ContributionKind::Watched => self.watched.len(),
            ContributionKind::Thumbs => self.thumbs.len(),
        }
    }

    pub fn total_records(&self) -> usize {
        ContributionKind::ALL.iter().map(|k| self.len_of(*k)).sum()
    }

    fn add(&mut self, kind: ContributionKind, path: &Path, items: &[Value]) -> usize {
        match kind {
            ContributionKind::StreamingProviders => {
                self.streaming_providers.extend_from(path, items)
            }
            ContributionKind::Reviews => self.reviews.extend_from(path, items),
            ContributionKind::Watched => self.watched.extend_from(path, items),
            ContributionKind::Thumbs => self.thumbs.extend_from(path, items),
        }
    }
}

/// Result of the parse stage
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub buckets: ContributionBuckets,
    pub summary: ArtifactSummary,
}

/// Parse a contribution document into its array entries
fn parse_entries(text: &str) -> Result<Vec<Value>, String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(format!("expected a JSON array, found {}", json_type(&other))),
        Err(e) => Err(e.to_string()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse stage: read and decode every file, then bucket the recognized ones
pub fn extract(files: &[PathBuf], options: &ExtractionOptions) -> ArtifactResult<Extraction> {
    let mut extraction = Extraction::default();

    for path in files {
        let Some(text) = read_or_skip(DESCRIPTOR.key, path, options, &mut extraction.summary)?
        else {
            continue;
        };

        let items = match parse_entries(&text) {
            Ok(items) => items,
            Err(reason) => {
                let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
                warn!(path = %path.display(), reason = %reason, "Error decoding JSON from file: {}", name);
                audit::log_evidence_skipped(DESCRIPTOR.key, path, &reason);
                extraction.summary.files_skipped += 1;
                continue;
            }
        };

        let Some(kind) = ContributionKind::from_path(path) else {
            trace!(path = %path.display(), "Not a Search Contributions file, ignoring");
            continue;
        };

        let added = extraction.buckets.add(kind, path, &items);
        extraction.summary.files_processed += 1;
        extraction.summary.records += added;
        debug!(path = %path.display(), bucket = kind.label(), records = added, "Parsed Search Contributions file");
    }

    Ok(extraction)
}

fn emit_bucket<T: TableRow>(
    kind: ContributionKind,
    bucket: &Bucket<T>,
    report_dir: &Path,
    sink: &mut dyn ReportSink,
    reports: &mut Vec<String>,
) -> ArtifactResult<()> {
    let title = kind.title();
    if bucket.is_empty() {
        info!(bucket = kind.label(), "No {} data available", title);
        return Ok(());
    }

    let report = ArtifactReport {
        title: title.clone(),
        file_name: title.clone(),
        description: kind.description().to_string(),
        sources: bucket.sources.clone(),
        table: ArtifactTable::from_records(&bucket.records),
    };

    sink.write_html_report(report_dir, &report)?;
    sink.write_tsv(report_dir, &title, &report.table)?;
    sink.write_timeline(report_dir, &title, &report.table)?;

    info!(bucket = kind.label(), records = bucket.len(), "Search Contributions report written");
    reports.push(title);
    Ok(())
}

/// Render stage: report, TSV and timeline for each non-empty bucket
pub fn emit(
    buckets: &ContributionBuckets,
    report_dir: &Path,
    sink: &mut dyn ReportSink,
) -> ArtifactResult<Vec<String>> {
    let mut reports = Vec::new();

    emit_bucket(
        ContributionKind::StreamingProviders,
        &buckets.streaming_providers,
        report_dir,
        sink,
        &mut reports,
    )?;
    emit_bucket(ContributionKind::Reviews, &buckets.reviews, report_dir, sink, &mut reports)?;
    emit_bucket(ContributionKind::Watched, &buckets.watched, report_dir, sink, &mut reports)?;
    emit_bucket(ContributionKind::Thumbs, &buckets.thumbs, report_dir, sink, &mut reports)?;

    Ok(reports)
}

/// Parse all Search Contributions files, then emit the reports
#[instrument(skip_all, fields(files = files.len(), report_dir = %report_dir.display()))]
pub fn process(
    files: &[PathBuf],
    report_dir: &Path,
    sink: &mut dyn ReportSink,
    options: &ExtractionOptions,
) -> ArtifactResult<ArtifactSummary> {
    let Extraction {
        buckets,
        mut summary,
    } = extract(files, options)?;

    summary.reports = emit(&buckets, report_dir, sink)?;
    Ok(summary)
}
