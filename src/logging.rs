//! Logging and tracing configuration
//!
//! The parsers log through the `tracing` crate. Hosts that don't install their
//! own subscriber can call [`init`] once at startup.
//!
//! # Log Levels
//!
//! - `error` - Evidence files that could not be read
//! - `warn`  - Files skipped because their JSON could not be decoded
//! - `info`  - Reports written, empty buckets (default in release)
//! - `debug` - Per-file progress (default in debug builds)
//! - `trace` - Ignored files and per-record detail
//!
//! Audit records for evidence access use the `forensic_audit` target.
//!
//! # Environment Variable Control
//!
//! ```bash
//! RUST_LOG=debug                                   # All debug logs
//! RUST_LOG=takeout_artifacts_lib::artifacts=trace  # Parsers only
//! RUST_LOG=forensic_audit=info,warn                # Audit trail plus warnings
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging/tracing system
///
/// Call this once at startup. Does nothing if a global subscriber is already set.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Default: info in release, debug in debug builds
        if cfg!(debug_assertions) {
            EnvFilter::new("takeout_artifacts_lib=debug,forensic_audit=info")
        } else {
            EnvFilter::new("takeout_artifacts_lib=info,forensic_audit=info")
        }
    });

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact(),
    );

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Initialize logging with verbose output (file:line, thread IDs)
pub fn init_verbose() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .pretty(),
    );

    let _ = tracing::subscriber::set_global_default(subscriber);
}
