//! Configuration for report layout and extraction behavior
//!
//! Every field has a default, so an empty JSON object (or no file at all) is a
//! valid configuration:
//!
//! ```json
//! {
//!   "layout": { "tsv_dir": "_TSV Exports", "timeline_dir": "_Timeline", "timeline_db": "tl.db" },
//!   "extraction": { "read_failure": "skip" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::common::contains_traversal_pattern;
use crate::error::{ArtifactError, ArtifactResult};

/// Default TSV export folder under the report directory
pub const DEFAULT_TSV_DIR: &str = "_TSV Exports";

/// Default timeline folder under the report directory
pub const DEFAULT_TIMELINE_DIR: &str = "_Timeline";

/// Default timeline database file name
pub const DEFAULT_TIMELINE_DB: &str = "tl.db";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: ReportLayout,
    pub extraction: ExtractionOptions,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ArtifactResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ArtifactError::read(path, e))?;
        let config: Config = serde_json::from_str(&content)?;
        config.layout.validate()?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

/// Where the filesystem sink places TSV and timeline output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    /// TSV folder, relative to the report directory
    pub tsv_dir: String,
    /// Timeline folder, relative to the report directory
    pub timeline_dir: String,
    /// Timeline SQLite file name inside `timeline_dir`
    pub timeline_db: String,
    /// Optional directory with an `artifact.html` template overriding the built-in one
    pub template_dir: Option<PathBuf>,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            tsv_dir: DEFAULT_TSV_DIR.to_string(),
            timeline_dir: DEFAULT_TIMELINE_DIR.to_string(),
            timeline_db: DEFAULT_TIMELINE_DB.to_string(),
            template_dir: None,
        }
    }
}

impl ReportLayout {
    /// Reject relative paths that would escape the report directory
    pub fn validate(&self) -> ArtifactResult<()> {
        for (field, value) in [
            ("tsv_dir", &self.tsv_dir),
            ("timeline_dir", &self.timeline_dir),
            ("timeline_db", &self.timeline_db),
        ] {
            if value.trim().is_empty() {
                return Err(ArtifactError::Config(format!("{field} must not be empty")));
            }
            if contains_traversal_pattern(value) {
                return Err(ArtifactError::Config(format!(
                    "{field} must stay inside the report directory: {value}"
                )));
            }
        }
        Ok(())
    }

    /// TSV folder for a report directory
    pub fn tsv_folder(&self, report_dir: &Path) -> PathBuf {
        report_dir.join(&self.tsv_dir)
    }

    /// Timeline database path for a report directory
    pub fn timeline_path(&self, report_dir: &Path) -> PathBuf {
        report_dir.join(&self.timeline_dir).join(&self.timeline_db)
    }
}

/// What to do when an evidence file cannot be read or is not UTF-8
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFailurePolicy {
    /// Log the failure and continue with the remaining files
    #[default]
    Skip,
    /// Stop the artifact run and return the error
    Abort,
}

/// Options shared by the artifact parsers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionOptions {
    pub read_failure: ReadFailurePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.layout.tsv_dir, "_TSV Exports");
        assert_eq!(config.extraction.read_failure, ReadFailurePolicy::Skip);
        assert_eq!(
            config.layout.timeline_path(Path::new("/reports")),
            Path::new("/reports/_Timeline/tl.db")
        );
    }

    #[test]
    fn test_load_partial_file() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(br#"{"extraction": {"read_failure": "abort"}, "layout": {"tsv_dir": "tsv"}}"#)
            .unwrap();

        let config = Config::load(temp.path()).unwrap();
        assert_eq!(config.extraction.read_failure, ReadFailurePolicy::Abort);
        assert_eq!(config.layout.tsv_dir, "tsv");
        assert_eq!(config.layout.timeline_db, "tl.db");
    }

    #[test]
    fn test_load_rejects_traversal() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(br#"{"layout": {"timeline_dir": "../elsewhere"}}"#).unwrap();

        let err = Config::load(temp.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Config(_)));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"{not json").unwrap();

        let err = Config::load(temp.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Serialization(_)));
    }
}
