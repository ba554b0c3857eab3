//! Error types for artifact extraction and report output

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for artifact operations
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Errors that can occur while parsing Takeout files or writing reports
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Evidence file could not be read or is not valid UTF-8
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// I/O error while writing report output
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTML template rendering error
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// TSV export error
    #[error("TSV export error: {0}")]
    Tsv(#[from] csv::Error),

    /// Timeline database error
    #[error("timeline database error: {0}")]
    Timeline(#[from] rusqlite::Error),

    /// Serialization error (configuration, timeline datalists)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An artifact path glob could not be compiled
    #[error("invalid path pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// No artifact registered under the requested key
    #[error("unknown artifact: {0}")]
    UnknownArtifact(String),

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ArtifactError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ArtifactError::Read {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_mentions_path() {
        let err = ArtifactError::read(
            "/evidence/My Activity/YouTube/MyActivity.html",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        let msg = err.to_string();
        assert!(msg.contains("MyActivity.html"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_io_conversion() {
        let err: ArtifactError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, ArtifactError::Io(_)));
    }
}
