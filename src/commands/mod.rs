//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyse;
pub mod utils;

// Re-export main command functions
pub use analyse::{execute_analyse, validate_args, AnalyseArgs};
pub use utils::{display_schema, display_version, validate_report_file};
