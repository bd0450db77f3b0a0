//! Clause extraction for a single Received header.
//!
//! There is no grammar shared by every MTA, so each header is read against
//! a loose template:
//!
//! ```text
//! from A by B (with|via) C id D; <timestamp>
//! ```
//!
//! Every clause has its own matcher and fails on its own. A header without a
//! `with` clause still yields its `from` and `by` hosts; a header without a
//! `from` clause (locally injected mail) still yields `by` and protocol.

use super::normalize::{cleanup_text, strip_and_clean};
use regex::Regex;
use std::sync::LazyLock;

static FROM_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)from\s+(.*?)(?:\s+|$)").expect("from pattern is valid")
});

static BY_AFTER_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)from\s+(?:.*?)\s+by\s+(.*?)(?:\s+|$)").expect("by pattern is valid")
});

static BY_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)by\s+(.*?)(?:\s+|$)").expect("by pattern is valid"));

// The trailing `|id|$` alternatives let the scan settle on a header without
// a protocol clause, leaving the capture group empty.
static WITH_AFTER_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)from\s+(?:.*?)\s+by\s+(?:.*?)\s+(?:(?:with|via)(.*?)(?:id|$|;)|id|$)")
        .expect("protocol pattern is valid")
});

static WITH_AFTER_BY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)by\s+(?:.*?)\s+(?:(?:with|via)(.*?)(?:id|$|;)|id|$)")
        .expect("protocol pattern is valid")
});

static ID_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)id\s+([^\s;]+)").expect("id pattern is valid"));

/// Which clause a cleaned header opens with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opening {
    From,
    By,
    Other,
}

impl Opening {
    fn of(cleaned: &str) -> Self {
        if cleaned.starts_with("from") {
            Opening::From
        } else if cleaned.starts_with("by") {
            Opening::By
        } else {
            Opening::Other
        }
    }
}

/// Get the hostname associated with `from`
///
/// **Public** - clause extractor
///
/// Looks for the first `from` token anywhere in the header and returns the
/// whitespace-delimited run that follows it. Returns an empty string when the
/// header has no `from` clause.
pub fn extract_from_label(header: &str) -> String {
    from_clause(header).unwrap_or_default().to_string()
}

/// Get the hostname associated with `by`
///
/// **Public** - clause extractor
///
/// Comments are stripped first so `from a (helo b) by c` reads `c`.
/// Only headers that open with `from` or `by` are considered.
pub fn extract_received_by_label(header: &str) -> String {
    let cleaned = strip_and_clean(header);
    by_clause(&cleaned).unwrap_or_default().to_string()
}

/// Get the protocol used, e.g. SMTP, ESMTPS, HTTP
///
/// **Public** - clause extractor
///
/// The protocol is whatever follows `with` (or `via`) up to `id`, `;` or the
/// end of the header, normalized. Empty when there is no such clause.
pub fn extract_protocol(header: &str) -> String {
    let cleaned = strip_and_clean(header);
    with_clause(&cleaned)
        .map(cleanup_text)
        .unwrap_or_default()
}

/// Get the queue/message identifier following ` id `
///
/// **Public** - clause extractor, also used to locate bare timestamps
pub fn extract_id(header: &str) -> Option<&str> {
    ID_CLAUSE
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Match the `from` clause
///
/// **Private** - see `extract_from_label`
fn from_clause(header: &str) -> Option<&str> {
    FROM_CLAUSE
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Match the `by` clause of an already cleaned header
///
/// **Private** - see `extract_received_by_label`
fn by_clause(cleaned: &str) -> Option<&str> {
    let pattern = match Opening::of(cleaned) {
        Opening::From => &*BY_AFTER_FROM,
        Opening::By => &*BY_ONLY,
        Opening::Other => return None,
    };

    pattern
        .captures(cleaned)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Match the `with`/`via` clause of an already cleaned header
///
/// **Private** - see `extract_protocol`
fn with_clause(cleaned: &str) -> Option<&str> {
    let pattern = match Opening::of(cleaned) {
        Opening::From => &*WITH_AFTER_FROM,
        Opening::By => &*WITH_AFTER_BY,
        Opening::Other => return None,
    };

    pattern
        .captures(cleaned)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GMAIL: &str = "from mail-vk0-x22b.google.com (mail-vk0-x22b.google.com. \
                         [2607:f8b0:400c:c05::22b]) by mx.google.com with ESMTPS id \
                         x82si2863041itb.27; Tue, 12 Jan 2016 18:10:18 -0800 (PST)";

    #[test]
    fn test_full_template() {
        let header = "from A by B with C id D; Tue, 12 Jan 2016 18:10:18 -0800";
        assert_eq!(extract_from_label(header), "A");
        assert_eq!(extract_received_by_label(header), "B");
        assert_eq!(extract_protocol(header), "C");
        assert_eq!(extract_id(header), Some("D"));
    }

    #[test]
    fn test_gmail_header() {
        assert_eq!(extract_from_label(GMAIL), "mail-vk0-x22b.google.com");
        assert_eq!(extract_received_by_label(GMAIL), "mx.google.com");
        assert_eq!(extract_protocol(GMAIL), "ESMTPS");
        assert_eq!(extract_id(GMAIL), Some("x82si2863041itb.27"));
    }

    #[test]
    fn test_by_only_header() {
        let header = "by 10.31.102.130 with HTTP; Wed, 13 Jan 2016 02:10:16 -0800 (PST)";
        assert_eq!(extract_from_label(header), "");
        assert_eq!(extract_received_by_label(header), "10.31.102.130");
        assert_eq!(extract_protocol(header), "HTTP");
    }

    #[test]
    fn test_via_clause() {
        let header = "from relay.example by mx.example via UUCP; Mon, 1 Feb 2016 00:00:00 +0000";
        assert_eq!(extract_protocol(header), "UUCP");
    }

    #[test]
    fn test_protocol_missing() {
        let header = "from a.example by b.example id 123; Mon, 1 Feb 2016 00:00:00 +0000";
        assert_eq!(extract_protocol(header), "");
        assert_eq!(extract_received_by_label(header), "b.example");
    }

    #[test]
    fn test_protocol_runs_to_end() {
        assert_eq!(extract_protocol("by mx.example with LMTP"), "LMTP");
    }

    #[test]
    fn test_multi_word_protocol() {
        let header = "from DB6PR.eurprd.outlook.com (2603:10a6::1) by AM0PR.outlook.com \
                      (2603:10a6::2) with Microsoft SMTP Server (version=TLS1_2) id \
                      15.20.1; Thu, 5 Jan 2023 10:00:00 +0000";
        assert_eq!(extract_received_by_label(header), "AM0PR.outlook.com");
        assert_eq!(extract_protocol(header), "Microsoft SMTP Server");
    }

    #[test]
    fn test_unrecognized_opening() {
        let header = "qmail 1234 invoked by uid 89; 1 Feb 2016 00:00:00 -0000";
        assert_eq!(extract_received_by_label(header), "");
        assert_eq!(extract_protocol(header), "");
    }

    #[test]
    fn test_from_label_is_not_anchored() {
        let header = "(qmail 1 invoked from network); 1 Feb 2016 00:00:00 -0000";
        assert_eq!(extract_from_label(header), "network);");
    }

    #[test]
    fn test_folded_header() {
        let header = "from a.example\n\tby b.example\n\twith SMTP id 7;\n\tMon, 1 Feb 2016 00:00:00 +0000";
        assert_eq!(extract_from_label(header), "a.example");
        assert_eq!(extract_received_by_label(header), "b.example");
        assert_eq!(extract_protocol(header), "SMTP");
    }

    #[test]
    fn test_id_missing() {
        assert_eq!(extract_id("from a by b with SMTP; date"), None);
    }
}
