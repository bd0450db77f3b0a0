//! Output writers for analysis reports.
//!
//! This module handles writing reports to disk or strings:
//! - JSON reports (pretty and compact)
//! - Plain-text hop tables

pub mod json;
pub mod summary;

// Re-export main functions
pub use json::{read_report, report_to_string, write_report, write_report_compact};
pub use summary::render_summary;
