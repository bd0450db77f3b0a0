//! Build the chronological, delay-annotated trail.
//!
//! Received headers are prepended by each relaying MTA, so on the wire the
//! newest hop comes first. The trail reverses that: index 0 is the hop
//! closest to the sender, the last index the hop closest to the recipient.

use crate::parser::normalize::cleanup_text;
use crate::parser::{
    extract_from_label, extract_protocol, extract_received_by_label, extract_timestamp, Hop, Trail,
};
use log::debug;

/// Delay in seconds between two hop timestamps
///
/// **Public** - used by the trail pass and by `path_delay`
///
/// Zero when either timestamp is unknown. A negative difference means the
/// servers' clocks disagree, not that the message travelled back in time,
/// so it is clamped to zero.
pub fn calculate_delay(current: Option<i64>, previous: Option<i64>) -> u64 {
    match (current, previous) {
        (Some(current), Some(previous)) => {
            u64::try_from(current.saturating_sub(previous)).unwrap_or(0)
        }
        _ => 0,
    }
}

/// Delay between two raw Received headers
///
/// **Public** - returns `None` when either timestamp cannot be resolved
pub fn path_delay(current: &str, previous: &str) -> Option<u64> {
    let current = extract_timestamp(current)?;
    let previous = extract_timestamp(previous)?;

    Some(calculate_delay(Some(current), Some(previous)))
}

/// Parse the details of one hop into a structured form
///
/// **Public** - the returned hop carries no delay yet
///
/// Labels are read from the normalized header. The timestamp is resolved on
/// the header as given, so a folded header without `;` can still fall back
/// to its last line.
pub fn analyse_hop(header: &str) -> Hop {
    let cleaned = cleanup_text(header);

    Hop {
        from: extract_from_label(&cleaned),
        protocol: extract_protocol(&cleaned),
        received_by: extract_received_by_label(&cleaned),
        timestamp: extract_timestamp(header),
        delay: 0,
    }
}

/// Create the trail from Received headers in wire order
///
/// **Public** - main entry point for trail building
///
/// # Arguments
/// * `received` - Received header values, top of the header block first
///
/// # Returns
/// The chronological trail, or `None` when there were no Received headers
pub fn generate_trail<S: AsRef<str>>(received: Option<&[S]>) -> Option<Trail> {
    let received = received?;

    let mut hops: Vec<Hop> = received
        .iter()
        .map(|header| analyse_hop(header.as_ref()))
        .collect();

    // Sort in chronological order
    hops.reverse();

    let trail = set_delay_information(hops);
    debug!("Built trail with {} hops", trail.len());

    Some(trail)
}

/// Annotate each hop with its delay from the previous one
///
/// **Public** - a single left-to-right pass carrying the previous timestamp
///
/// The first hop has no predecessor and always gets a delay of zero.
pub fn set_delay_information(hops: Vec<Hop>) -> Trail {
    hops.into_iter()
        .scan(None, |previous: &mut Option<i64>, hop| {
            let delay = calculate_delay(hop.timestamp, *previous);
            *previous = hop.timestamp;
            Some(Hop { delay, ..hop })
        })
        .collect()
}

/// Sum of all hop delays, zero for an absent trail
pub fn total_delay(trail: Option<&[Hop]>) -> u64 {
    trail
        .map(|hops| hops.iter().map(|hop| hop.delay).sum())
        .unwrap_or(0)
}
