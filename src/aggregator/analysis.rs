//! Whole-message analysis.
//!
//! Splitting the raw block into named fields is delegated to `mailparse`;
//! this module only picks out the Received chain and the address headers
//! and hands the former to the trail builder.

use super::trail::{generate_trail, total_delay};
use crate::parser::Message;
use crate::utils::config::{ADDRESS_HEADERS, RECEIVED_HEADER};
use crate::utils::error::AnalysisError;
use log::debug;
use mailparse::{MailHeader, MailHeaderMap};

/// Analyse a raw header block
///
/// **Public** - main entry point of the library
///
/// # Arguments
/// * `raw_headers` - RFC 5322 header block, `None` when there is no input
///
/// # Returns
/// `Ok(None)` for absent input, otherwise the analysed message. Missing
/// headers and unparseable hops are reported through `None` fields, never
/// as errors.
///
/// # Errors
/// * `AnalysisError::HeaderBlock` - the header splitter rejected the block
///
/// # Example
/// ```
/// let raw = "Received: by 10.0.0.1 with HTTP; Mon, 1 Feb 2016 00:00:00 +0000\r\n\
///            From: alice@example.com\r\n";
/// let message = mail_hopper::analyse(Some(raw)).unwrap().unwrap();
/// assert_eq!(message.from.as_deref(), Some("alice@example.com"));
/// assert_eq!(message.trail.unwrap()[0].protocol, "HTTP");
/// ```
pub fn analyse(raw_headers: Option<&str>) -> Result<Option<Message>, AnalysisError> {
    let Some(raw_headers) = raw_headers else {
        return Ok(None);
    };

    let (headers, _) = mailparse::parse_headers(raw_headers.trim().as_bytes())?;
    debug!("Split header block into {} fields", headers.len());

    let received = received_values(&headers);
    let trail = generate_trail(received.as_deref());

    // Decoded from RFC 2047 encoded-words by the splitter
    let [from, to, cc, bcc] = ADDRESS_HEADERS.map(|name| headers.get_first_value(name));

    Ok(Some(Message {
        from,
        to,
        cc,
        bcc,
        total_delay: total_delay(trail.as_deref()),
        trail,
    }))
}

/// Analyse a raw header block given as bytes
///
/// **Public** - entry point for callers holding undecoded input
///
/// # Errors
/// * `AnalysisError::NotText` - the block is not UTF-8 text
/// * `AnalysisError::HeaderBlock` - the header splitter rejected the block
pub fn analyse_bytes(raw_headers: Option<&[u8]>) -> Result<Option<Message>, AnalysisError> {
    let Some(raw_headers) = raw_headers else {
        return Ok(None);
    };

    analyse(Some(std::str::from_utf8(raw_headers)?))
}

/// Collect Received values in wire order, folding intact
///
/// **Private** - `None` when the block has no Received header
fn received_values(headers: &[MailHeader]) -> Option<Vec<String>> {
    let values: Vec<String> = headers
        .get_all_headers(RECEIVED_HEADER)
        .into_iter()
        .map(|header| String::from_utf8_lossy(header.get_value_raw()).into_owned())
        .collect();

    debug!("Found {} {} headers", values.len(), RECEIVED_HEADER);

    (!values.is_empty()).then_some(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_input() {
        assert!(analyse(None).unwrap().is_none());
        assert!(analyse_bytes(None).unwrap().is_none());
    }

    #[test]
    fn test_non_utf8_input() {
        let result = analyse_bytes(Some(b"Received: by a\xff\xfe; x\r\n"));
        assert!(matches!(result, Err(AnalysisError::NotText(_))));
    }

    #[test]
    fn test_no_received_headers() {
        let message = analyse(Some("From: a@example.com\r\nTo: b@example.com\r\n"))
            .unwrap()
            .unwrap();
        assert_eq!(message.trail, None);
        assert_eq!(message.total_delay, 0);
        assert_eq!(message.cc, None);
        assert_eq!(message.bcc, None);
    }

    #[test]
    fn test_empty_block() {
        let message = analyse(Some("   \n")).unwrap().unwrap();
        assert_eq!(message.from, None);
        assert_eq!(message.trail, None);
    }
}
