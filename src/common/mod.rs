// Common utilities shared by the Takeout artifact parsers

pub mod audit;
pub mod evidence;
pub mod path_security;
pub mod timestamp;

// Re-exports for convenience
pub use evidence::read_evidence_text;
pub use path_security::{contains_traversal_pattern, sanitize_filename};
pub use timestamp::normalize_timestamp;
