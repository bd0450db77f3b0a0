//! Plain-text hop table for terminal output.

use crate::parser::schema::{Hop, Message};
use chrono::DateTime;

const HOST_WIDTH: usize = 30;
const PROTOCOL_WIDTH: usize = 10;

/// Render the analysed message as a human-readable table
///
/// **Public** - used by `hopper analyse --summary`
pub fn render_summary(message: &Message) -> String {
    let mut lines = Vec::new();

    lines.push(format!("  From: {}", message.from.as_deref().unwrap_or("-")));
    lines.push(format!("  To:   {}", message.to.as_deref().unwrap_or("-")));
    lines.push(String::new());

    let Some(trail) = &message.trail else {
        lines.push("  No Received headers found".to_string());
        return lines.join("\n");
    };

    lines.push("  ┏━━━━┳━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━━━┳━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━┓".to_string());
    lines.push(format!(
        "  ┃ {:>2} ┃ {:<30} ┃ {:<30} ┃ {:<10} ┃ {:<20} ┃ {:>8} ┃",
        "#", "From", "By", "Protocol", "Time (UTC)", "Delay"
    ));
    lines.push("  ┣━━━━╋━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╋━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╋━━━━━━━━━━━━╋━━━━━━━━━━━━━━━━━━━━━━╋━━━━━━━━━━┫".to_string());

    for (index, hop) in trail.iter().enumerate() {
        lines.push(render_hop(index + 1, hop));
    }

    lines.push("  ┗━━━━┻━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┻━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┻━━━━━━━━━━━━┻━━━━━━━━━━━━━━━━━━━━━━┻━━━━━━━━━━┛".to_string());
    lines.push(format!("  Total delay: {}s over {} hops", message.total_delay, trail.len()));

    lines.join("\n")
}

fn render_hop(number: usize, hop: &Hop) -> String {
    let time = hop
        .timestamp
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "?".to_string());

    format!(
        "  ┃ {:>2} ┃ {:<30} ┃ {:<30} ┃ {:<10} ┃ {:<20} ┃ {:>7}s ┃",
        number,
        truncate(&hop.from, HOST_WIDTH),
        truncate(&hop.received_by, HOST_WIDTH),
        truncate(&hop.protocol, PROTOCOL_WIDTH),
        time,
        hop.delay
    )
}

/// Keep the tail of long labels, which carries the domain
fn truncate(label: &str, width: usize) -> String {
    let count = label.chars().count();
    if count <= width {
        return label.to_string();
    }

    let tail: String = label.chars().skip(count - (width - 3)).collect();
    format!("...{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("mx.google.com", 30), "mx.google.com");
        assert_eq!(truncate("abcdefghij", 8), "...fghij");
    }

    #[test]
    fn test_summary_without_trail() {
        let message = Message {
            from: None,
            to: None,
            cc: None,
            bcc: None,
            total_delay: 0,
            trail: None,
        };
        assert!(render_summary(&message).contains("No Received headers found"));
    }

    #[test]
    fn test_summary_lists_hops() {
        let message = Message {
            from: Some("a@example.com".to_string()),
            to: None,
            cc: None,
            bcc: None,
            total_delay: 7,
            trail: Some(vec![Hop {
                from: "relay.example".to_string(),
                protocol: "ESMTPS".to_string(),
                received_by: "mx.example".to_string(),
                timestamp: Some(1_454_284_800),
                delay: 7,
            }]),
        };

        let summary = render_summary(&message);
        assert!(summary.contains("mx.example"));
        assert!(summary.contains("2016-02-01 00:00:00"));
        assert!(summary.contains("Total delay: 7s over 1 hops"));
    }
}
