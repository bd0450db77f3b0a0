//! Data model for hops, trails and analysed messages.
//!
//! Field names on the wire follow the established report format
//! (`receivedBy`, capitalised address headers), hence the serde renames.
//! Missing values serialize as `null`; unknown labels are empty strings.

use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One MTA hand-off, recorded by a single Received header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    /// Host the message was received from (empty when unknown)
    pub from: String,

    /// Protocol used for the hand-off, e.g. `ESMTPS` (empty when unknown)
    pub protocol: String,

    /// Host that received the message (empty when unknown)
    #[serde(rename = "receivedBy")]
    pub received_by: String,

    /// Unix timestamp of the hand-off, if it could be resolved
    pub timestamp: Option<i64>,

    /// Seconds elapsed since the previous hop, never negative
    pub delay: u64,
}

/// Chronological hop sequence, index 0 is the origin-most hop
pub type Trail = Vec<Hop>;

/// Analysis of one header block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "From")]
    pub from: Option<String>,

    #[serde(rename = "To")]
    pub to: Option<String>,

    #[serde(rename = "Cc")]
    pub cc: Option<String>,

    #[serde(rename = "Bcc")]
    pub bcc: Option<String>,

    /// Sum of every hop delay, 0 without a trail
    pub total_delay: u64,

    /// `None` when the block carries no Received header at all
    pub trail: Option<Trail>,
}

/// Top-level report structure written to JSON by the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Where the header block was read from (file path or `stdin`)
    pub source: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// The analysed message
    pub analysis: Message,
}

impl Report {
    /// Wrap an analysed message, stamping schema version and generation time
    pub fn new(analysis: Message, source: impl Into<String>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            source: source.into(),
            generated_at: Utc::now().to_rfc3339(),
            analysis,
        }
    }

    /// Number of hops in the trail, zero without one
    pub fn hop_count(&self) -> usize {
        self.analysis.trail.as_ref().map_or(0, Vec::len)
    }
}
