//! Received header parsing and schema definitions.
//!
//! This module handles:
//! - Normalizing folded, annotated header text
//! - Extracting the `from`, `by`, `with`/`via` and `id` clauses
//! - Resolving the trailing date-time to a Unix timestamp
//! - Defining the output schema

pub mod hop;
pub mod normalize;
pub mod schema;
pub mod timestamp;

// Re-export main types
pub use hop::{extract_from_label, extract_id, extract_protocol, extract_received_by_label};
pub use normalize::{cleanup_text, remove_details};
pub use schema::{Hop, Message, Report, Trail};
pub use timestamp::{extract_timestamp, extract_timestring, get_timestamp};
