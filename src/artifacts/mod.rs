//! Google Takeout artifact parsers
//!
//! Each parser exposes a static [`ArtifactDescriptor`] describing what it
//! parses and which paths it claims. The host's file discovery hands a parser
//! every file matching its globs in one call.
//!
//! ## Module Structure
//! ```text
//! artifacts/
//! ├── mod.rs                  - Descriptors, registry, path matching, dispatch
//! ├── my_activity.rs          - My Activity/<Service>/MyActivity.html
//! └── search_contributions.rs - Search Contributions/*.json
//! ```

pub mod my_activity;
pub mod search_contributions;

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument};

use crate::common::{audit, read_evidence_text};
use crate::config::{ExtractionOptions, ReadFailurePolicy};
use crate::error::{ArtifactError, ArtifactResult};
use crate::report::{ArtifactSummary, ReportSink};

/// Entry point shared by all artifact parsers
pub type ArtifactFn = fn(
    &[PathBuf],
    &Path,
    &mut dyn ReportSink,
    &ExtractionOptions,
) -> ArtifactResult<ArtifactSummary>;

/// Static description of an artifact parser
#[derive(Clone, Copy, Serialize)]
pub struct ArtifactDescriptor {
    /// Unique registry key
    pub key: &'static str,
    /// Display name
    pub name: &'static str,
    pub description: &'static str,
    pub author: &'static str,
    pub version: &'static str,
    pub date: &'static str,
    /// External tooling needed ("none" for every Takeout parser)
    pub requirements: &'static str,
    pub category: &'static str,
    pub notes: &'static str,
    /// Glob patterns of the files this parser claims
    pub paths: &'static [&'static str],
    /// Name of the entry point
    pub function: &'static str,
    #[serde(skip)]
    pub entry: ArtifactFn,
}

impl fmt::Debug for ArtifactDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactDescriptor")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("version", &self.version)
            .field("paths", &self.paths)
            .field("function", &self.function)
            .finish()
    }
}

impl ArtifactDescriptor {
    /// Compile this descriptor's path globs
    pub fn matcher(&self) -> ArtifactResult<PathMatcher> {
        PathMatcher::new(self.paths)
    }

    /// Check whether this parser claims `path`
    pub fn claims(&self, path: &Path) -> ArtifactResult<bool> {
        Ok(self.matcher()?.matches(path))
    }

    /// Run the parser over `files`
    pub fn run(
        &self,
        files: &[PathBuf],
        report_dir: &Path,
        sink: &mut dyn ReportSink,
        options: &ExtractionOptions,
    ) -> ArtifactResult<ArtifactSummary> {
        (self.entry)(files, report_dir, sink, options)
    }
}

/// Glob patterns compiled to anchored regexes
///
/// `*` matches any run of characters (separators included), `?` matches one
/// character. Both `/` and `\` in paths and patterns count as separators.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    patterns: Vec<Regex>,
}

impl PathMatcher {
    pub fn new(globs: &[&str]) -> ArtifactResult<Self> {
        let patterns = globs
            .iter()
            .map(|glob| glob_to_regex(glob))
            .collect::<ArtifactResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn matches(&self, path: &Path) -> bool {
        let normalized = path.to_string_lossy().replace('\\', "/");
        self.patterns.iter().any(|re| re.is_match(&normalized))
    }
}

fn glob_to_regex(glob: &str) -> ArtifactResult<Regex> {
    let mut pattern = String::with_capacity(glob.len() * 2 + 6);
    pattern.push_str("(?s)^");
    for c in glob.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            '/' | '\\' => pattern.push('/'),
            _ => pattern.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
        }
    }
    pattern.push('$');

    Regex::new(&pattern).map_err(|source| ArtifactError::Pattern {
        pattern: glob.to_string(),
        source,
    })
}

static REGISTRY: [ArtifactDescriptor; 2] = [
    my_activity::DESCRIPTOR,
    search_contributions::DESCRIPTOR,
];

/// All registered artifact parsers
pub fn registry() -> &'static [ArtifactDescriptor] {
    &REGISTRY
}

/// Look up a parser by key
pub fn find(key: &str) -> ArtifactResult<&'static ArtifactDescriptor> {
    REGISTRY
        .iter()
        .find(|d| d.key == key)
        .ok_or_else(|| ArtifactError::UnknownArtifact(key.to_string()))
}

/// Run every registered parser over the candidate files it claims
///
/// Parsers with no claimed files are not invoked. Results are returned in
/// registry order, keyed by artifact key.
#[instrument(skip_all, fields(candidates = candidates.len(), report_dir = %report_dir.display()))]
pub fn dispatch(
    candidates: &[PathBuf],
    report_dir: &Path,
    sink: &mut dyn ReportSink,
    options: &ExtractionOptions,
) -> ArtifactResult<Vec<(&'static str, ArtifactSummary)>> {
    let mut results = Vec::new();

    for descriptor in registry() {
        let matcher = descriptor.matcher()?;
        let files: Vec<PathBuf> = candidates
            .iter()
            .filter(|p| matcher.matches(p))
            .cloned()
            .collect();

        if files.is_empty() {
            debug!(artifact = descriptor.key, "No files claimed");
            continue;
        }

        info!(artifact = descriptor.key, files = files.len(), "Running artifact");
        let summary = descriptor.run(&files, report_dir, sink, options)?;
        results.push((descriptor.key, summary));
    }

    Ok(results)
}

/// Read an evidence file, applying the configured read-failure policy.
///
/// Returns `Ok(None)` when the file was skipped; the skip is logged and counted
/// in `summary`.
pub(crate) fn read_or_skip(
    artifact: &str,
    path: &Path,
    options: &ExtractionOptions,
    summary: &mut ArtifactSummary,
) -> ArtifactResult<Option<String>> {
    match read_evidence_text(artifact, path) {
        Ok(text) => Ok(Some(text)),
        Err(e) => match options.read_failure {
            ReadFailurePolicy::Abort => Err(ArtifactError::read(path, e)),
            ReadFailurePolicy::Skip => {
                error!(path = %path.display(), error = %e, "Failed to read evidence file");
                audit::log_evidence_skipped(artifact, path, &e.to_string());
                summary.files_skipped += 1;
                Ok(None)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::testing::RecordingSink;
    use std::fs;

    #[test]
    fn test_registry() {
        let keys: Vec<_> = registry().iter().map(|d| d.key).collect();
        assert_eq!(keys, vec!["takeoutMyActivity", "takeoutSearchContributions"]);

        for descriptor in registry() {
            assert_eq!(descriptor.requirements, "none");
            assert_eq!(descriptor.category, "Google Takeout Archive");
            assert!(!descriptor.paths.is_empty());
            assert!(descriptor.matcher().is_ok());
        }
    }

    #[test]
    fn test_find() {
        let d = find("takeoutSearchContributions").unwrap();
        assert_eq!(d.function, "get_takeoutSearchContributions");
        assert!(matches!(
            find("takeoutNothing"),
            Err(ArtifactError::UnknownArtifact(_))
        ));
    }

    #[test]
    fn test_descriptor_serializes_without_entry() {
        let json = serde_json::to_value(find("takeoutMyActivity").unwrap()).unwrap();
        assert_eq!(json["name"], "Google Takeout My Activity");
        assert_eq!(json["paths"][0], "*/My Activity/*/MyActivity.html");
        assert!(json.get("entry").is_none());
    }

    #[test]
    fn test_claims() {
        let activity = find("takeoutMyActivity").unwrap();
        let contributions = find("takeoutSearchContributions").unwrap();

        let html = Path::new("/case/Takeout/My Activity/YouTube/MyActivity.html");
        let json = Path::new("/case/Takeout/Search Contributions/Reviews.json");
        let windows = Path::new("C:\\case\\Takeout\\My Activity\\Chrome\\MyActivity.html");

        assert!(activity.claims(html).unwrap());
        assert!(activity.claims(windows).unwrap());
        assert!(!activity.claims(json).unwrap());
        assert!(contributions.claims(json).unwrap());
        assert!(!contributions.claims(html).unwrap());
        assert!(!activity
            .claims(Path::new("/case/Takeout/My Activity/MyActivity.html"))
            .unwrap());
    }

    #[test]
    fn test_glob_escapes_regex_characters() {
        let matcher = PathMatcher::new(&["*/a+b (1)/?.json"]).unwrap();
        assert!(matcher.matches(Path::new("/x/a+b (1)/c.json")));
        assert!(!matcher.matches(Path::new("/x/aab (1)/c.json")));
        assert!(!matcher.matches(Path::new("/x/a+b (1)/cd.json")));
    }

    #[test]
    fn test_dispatch_runs_claiming_parsers() {
        let root = tempfile::tempdir().unwrap();
        let activity_dir = root.path().join("Takeout/My Activity/Maps");
        let contributions_dir = root.path().join("Takeout/Search Contributions");
        fs::create_dir_all(&activity_dir).unwrap();
        fs::create_dir_all(&contributions_dir).unwrap();

        let html = activity_dir.join("MyActivity.html");
        fs::write(&html, "<div>maps</div>").unwrap();
        let watched = contributions_dir.join("Watched.json");
        fs::write(
            &watched,
            r#"[{"Published":"2024-01-02T03:04:05Z","Search Query":"cats"}]"#,
        )
        .unwrap();
        let unrelated = root.path().join("Takeout/archive_browser.html");
        fs::write(&unrelated, "<html></html>").unwrap();

        let mut sink = RecordingSink::default();
        let results = dispatch(
            &[html, watched, unrelated],
            &root.path().join("report"),
            &mut sink,
            &ExtractionOptions::default(),
        )
        .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "takeoutMyActivity");
        assert_eq!(results[0].1.reports, vec!["Google Takeout - My Activity - Maps"]);
        assert_eq!(results[1].0, "takeoutSearchContributions");
        assert_eq!(results[1].1.reports, vec!["Google Search Contributions - Watched"]);
        assert_eq!(sink.html.len(), 2);
    }

    #[test]
    fn test_dispatch_skips_unclaimed() {
        let mut sink = RecordingSink::default();
        let results = dispatch(
            &[PathBuf::from("/nothing/here.txt")],
            Path::new("/report"),
            &mut sink,
            &ExtractionOptions::default(),
        )
        .unwrap();
        assert!(results.is_empty());
        assert!(sink.html.is_empty());
    }
}
