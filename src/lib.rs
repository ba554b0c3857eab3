//! Google Takeout artifact parsers
//!
//! Two parsers for a forensic artifact host:
//!
//! - [`artifacts::my_activity`] embeds each `My Activity/<Service>/MyActivity.html`
//!   in its own report
//! - [`artifacts::search_contributions`] turns the Search Contributions JSON
//!   files into report, TSV and timeline output
//!
//! ```rust,ignore
//! use takeout_artifacts_lib::{artifacts, config::ExtractionOptions, report::FsReportSink};
//!
//! takeout_artifacts_lib::logging::init();
//! let mut sink = FsReportSink::new()?;
//! let results = artifacts::dispatch(&found_files, report_dir, &mut sink, &ExtractionOptions::default())?;
//! ```

pub mod artifacts;
pub mod common;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;

pub use artifacts::{dispatch, find, registry, ArtifactDescriptor};
pub use config::{Config, ExtractionOptions, ReadFailurePolicy, ReportLayout};
pub use error::{ArtifactError, ArtifactResult};
pub use report::{ArtifactReport, ArtifactSummary, ArtifactTable, FsReportSink, ReportSink};
