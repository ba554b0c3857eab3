//! Path Security Utilities
//!
//! Report names are built from evidence paths (the service segment of a
//! My Activity file), so they are sanitized before they become file names
//! under the report directory.

use tracing::warn;

/// Check if a configured relative path contains traversal patterns.
///
/// Detects:
/// - `..` sequences
/// - Absolute path indicators (Unix, Windows, drive letters)
/// - Null bytes
/// - URL-encoded separators
pub fn contains_traversal_pattern(path: &str) -> bool {
    if path.contains('\0') {
        return true;
    }

    if path.contains("..") {
        return true;
    }

    if path.starts_with('/') || path.starts_with('\\') {
        return true;
    }

    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return true;
    }

    let lower = path.to_lowercase();
    lower.contains("%2e%2e") || lower.contains("%2f") || lower.contains("%5c")
}

/// Sanitize a report name so it can be used as a single file name.
///
/// Path separators become `_`; null bytes, control characters and Windows
/// reserved characters are dropped; leading/trailing dots and spaces are
/// trimmed. Falls back to `"report"` if nothing is left.
pub fn sanitize_filename(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());

    for c in name.chars() {
        match c {
            '\0'..='\x1f' | '\x7f' => continue,
            '/' | '\\' => sanitized.push('_'),
            '<' | '>' | ':' | '"' | '|' | '?' | '*' => continue,
            _ => sanitized.push(c),
        }
    }

    let trimmed = sanitized.trim_matches(|c| c == '.' || c == ' ');
    if trimmed.is_empty() {
        warn!(target: "security", name = name, "Report name sanitized to nothing");
        return "report".to_string();
    }
    if trimmed != name {
        warn!(target: "security", name = name, sanitized = trimmed, "Report name sanitized");
    }
    trimmed.to_string()
}
