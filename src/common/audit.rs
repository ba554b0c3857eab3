//! Forensic Audit Logging
//!
//! Structured audit records for every evidence file the parsers touch and
//! every report artifact they produce. All records use the `forensic_audit`
//! target so hosts can route them separately.

use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{info, span, warn, Level};

/// Hex-encoded SHA-256 of evidence content
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Log evidence file access for audit trail
pub fn log_evidence_access(artifact: &str, path: &Path, content: &[u8]) {
    let _span = span!(
        Level::INFO,
        "evidence_access",
        artifact = artifact,
        path = %path.display(),
    )
    .entered();

    info!(
        target: "forensic_audit",
        operation = "evidence_read",
        artifact = artifact,
        path = %path.display(),
        file_size = content.len() as u64,
        sha256 = %sha256_hex(content),
        timestamp = %chrono::Utc::now().to_rfc3339(),
        "Evidence file accessed"
    );
}

/// Log an evidence file that was skipped without producing records
pub fn log_evidence_skipped(artifact: &str, path: &Path, reason: &str) {
    warn!(
        target: "forensic_audit",
        operation = "evidence_skipped",
        artifact = artifact,
        path = %path.display(),
        reason = reason,
        timestamp = %chrono::Utc::now().to_rfc3339(),
        "Evidence file skipped"
    );
}

/// Log a report artifact written to disk
pub fn log_report_output(kind: &str, name: &str, output_path: &Path, rows: usize) {
    info!(
        target: "forensic_audit",
        operation = "report_output",
        kind = kind,
        name = name,
        output_path = %output_path.display(),
        rows = rows,
        timestamp = %chrono::Utc::now().to_rfc3339(),
        "Report artifact written"
    );
}
