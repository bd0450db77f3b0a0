//! Timestamp resolution for Received headers.
//!
//! The date-time of a hop conventionally follows the final `;` of its
//! header, but MTAs disagree on nearly everything else: some omit the
//! semicolon, append zone names, or stamp `-0000` for an unknown offset.
//! Resolution is split in two steps so each can be tested on its own:
//! [`extract_timestring`] finds a candidate substring, [`get_timestamp`]
//! turns it into Unix seconds.

use super::hop::extract_id;
use super::normalize::{cleanup_text, remove_details};
use crate::utils::config::{UNKNOWN_OFFSET, UTC_OFFSET};
use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Splits a single-line header around its `id <token>` clause
static ID_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+id\s+\S*\s+").expect("id split pattern is valid"));

/// Zone name trailing a numeric offset, e.g. `-0800 PST` or `-0800 (PST)`
static TRAILING_ZONE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([+-][0-9]{4})[ ](?:\([a-zA-Z]{3,4}\)|[a-zA-Z]{3,4})$")
        .expect("zone name pattern is valid")
});

/// A four-digit calendar year that is not part of a numeric offset
static CALENDAR_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9+\-])(?:19|20)[0-9]{2}(?:[^0-9]|$)").expect("year pattern is valid")
});

/// Sub-second part of a clock time, e.g. the `.123` in `10:00:00.123`
static FRACTIONAL_SECONDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{2}:[0-9]{2}:[0-9]{2})\.[0-9]+").expect("fraction pattern is valid")
});

/// Zone spelled as a UTC name instead of an offset, e.g. `10:00:00 UTC`
static UTC_ZONE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*[0-9])\s*(?:UTC|UT|Z)$").expect("utc name pattern is valid")
});

/// ctime layout, e.g. `Thu Jan  5 10:00:00 2023`
const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Locate the date-time portion of a Received header
///
/// **Public** - first half of timestamp resolution
///
/// # Arguments
/// * `header` - Received header value (key stripped), possibly folded
///
/// # Returns
/// A cleaned candidate that *could* be a valid date-time, or `None` when no
/// candidate could be located at all
///
/// # Algorithm
/// 1. Text after the last `;`
/// 2. Otherwise the last line of a multi-line header
/// 3. Otherwise the text after the last `id <token>` clause
/// 4. Otherwise nothing
pub fn extract_timestring(header: &str) -> Option<String> {
    let candidate = locate_candidate(header)?;

    let timestring = cleanup_text(&remove_details(&cleanup_text(&candidate)));
    let timestring = timestring.replace(UNKNOWN_OFFSET, UTC_OFFSET);
    let timestring = strip_timezone_name(&timestring);

    Some(timestring)
}

/// Pick the raw candidate substring
///
/// **Private** - internal helper for extract_timestring
fn locate_candidate(header: &str) -> Option<String> {
    if let Some((_, tail)) = header.rsplit_once(';') {
        return Some(tail.to_string());
    }

    let lines: Vec<&str> = header.trim().lines().collect();
    if lines.len() > 1 {
        return lines.last().map(|line| line.to_string());
    }

    let cleaned = cleanup_text(header);
    if extract_id(&cleaned).is_some() && ID_SPLIT.is_match(&cleaned) {
        return ID_SPLIT.split(&cleaned).last().map(str::to_string);
    }

    None
}

/// Remove a zone name that trails a numeric offset
///
/// **Public** - `"-0800 (PST)"` and `"-0800 PST"` both become `"-0800"`
///
/// Only a 3-4 letter name directly after a signed four-digit offset at the
/// end of the string is removed. Anything else is left untouched.
pub fn strip_timezone_name(timestring: &str) -> String {
    TRAILING_ZONE_NAME.replace(timestring, "$1").into_owned()
}

/// Convert a timestring to a Unix timestamp (UTC seconds)
///
/// **Public** - second half of timestamp resolution
///
/// RFC 2822 is tried first; the lenient `dateparser` grammar covers the MTA
/// variants that fall outside it, reading zone-less times as UTC. Sub-second
/// precision is dropped. Never fails: anything unparseable yields `None`.
pub fn get_timestamp(timestring: Option<&str>) -> Option<i64> {
    let timestring = timestring?;

    match parse_datetime(timestring) {
        Some(datetime) => Some(datetime.timestamp()),
        None => {
            debug!("Unparseable timestring: {:?}", timestring);
            None
        }
    }
}

/// Resolve the timestamp of a Received header in one step
///
/// **Public** - `get_timestamp(extract_timestring(header))`
pub fn extract_timestamp(header: &str) -> Option<i64> {
    get_timestamp(extract_timestring(header).as_deref())
}

/// Parse a cleaned timestring into a UTC date-time
///
/// **Private** - internal helper for get_timestamp
fn parse_datetime(timestring: &str) -> Option<DateTime<Utc>> {
    if timestring.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc2822(timestring) {
        return Some(datetime.with_timezone(&Utc));
    }

    let rewritten = rewrite_for_rfc2822(timestring);
    if let Ok(datetime) = DateTime::parse_from_rfc2822(&rewritten) {
        return Some(datetime.with_timezone(&Utc));
    }

    // ctime carries no zone and is read as UTC
    if let Ok(naive) = NaiveDateTime::parse_from_str(&rewritten, CTIME_FORMAT) {
        return Some(naive.and_utc());
    }

    // dateparser fills a missing date with today's, so time-only strings
    // must not reach it; a missing time defaults to midnight
    if !CALENDAR_YEAR.is_match(timestring) {
        return None;
    }

    let midnight = NaiveTime::from_hms_opt(0, 0, 0)?;
    dateparser::parse_with(timestring, &Utc, midnight).ok()
}

/// Drop fractional seconds and spell a UTC zone name as `+0000`
///
/// **Private** - internal helper for parse_datetime
fn rewrite_for_rfc2822(timestring: &str) -> String {
    let whole_seconds = FRACTIONAL_SECONDS.replace(timestring, "$1");
    UTC_ZONE_NAME
        .replace(&whole_seconds, format!("${{1}} {}", UTC_OFFSET).as_str())
        .into_owned()
}
