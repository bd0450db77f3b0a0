//! Configuration and constants for the analyser and the CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Upper bound on the header block accepted by the CLI (1 MiB)
pub const MAX_INPUT_BYTES: u64 = 1024 * 1024;

// Header names (matched case-insensitively by the header splitter)
pub const RECEIVED_HEADER: &str = "Received";
pub const ADDRESS_HEADERS: [&str; 4] = ["From", "To", "Cc", "Bcc"];

// Some MTAs stamp "-0000" to mean "offset unknown"; we read it as UTC
pub const UNKNOWN_OFFSET: &str = "-0000";
pub const UTC_OFFSET: &str = "+0000";
