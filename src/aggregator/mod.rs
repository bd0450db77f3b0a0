//! Aggregation of parsed hops into a trail and a message analysis.
//!
//! This module transforms Received headers into:
//! - A chronological hop list with per-hop delay
//! - The total transit delay
//! - The analysed message record

pub mod analysis;
pub mod trail;

// Re-export main types and functions
pub use analysis::{analyse, analyse_bytes};
pub use trail::{analyse_hop, calculate_delay, generate_trail, path_delay, set_delay_information, total_delay};
