//! Evidence file reading
//!
//! Each evidence file is read fully into memory and released before the next
//! one is opened. Every successful read is recorded in the audit trail.

use std::fs;
use std::io;
use std::path::Path;
use tracing::trace;

use super::audit;

/// Read an evidence file as UTF-8 text.
///
/// Invalid UTF-8 is reported as `io::ErrorKind::InvalidData`. A leading
/// byte-order mark is kept; callers that parse the text decide what to do
/// with it.
pub fn read_evidence_text(artifact: &str, path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    audit::log_evidence_access(artifact, path, &bytes);
    trace!(path = %path.display(), bytes = bytes.len(), "Read evidence file");

    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
