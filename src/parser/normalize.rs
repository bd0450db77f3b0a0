//! Text normalization shared by every extractor.
//!
//! Received headers are folded over several lines and sprinkled with
//! parenthetical annotations (`(mail.example.org [10.0.0.1])`, `(PST)`).
//! Both get in the way of the clause matchers, so every extractor runs its
//! input through these helpers first.

use regex::Regex;
use std::sync::LazyLock;

/// Non-greedy parenthetical comment, first `(` to the nearest `)`, across folds
static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\(.*?\)").expect("comment pattern is valid"));

/// Collapse runs of whitespace into a single space and trim both ends
///
/// **Public** - used by every extractor
///
/// Newlines and tabs count as whitespace, so a folded header comes out on
/// a single line. Applying it twice gives the same result as applying it once.
pub fn cleanup_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove parenthetical comments
///
/// **Public** - strips MTA annotations before pattern matching
///
/// Each comment is replaced by a single space so the surrounding tokens stay
/// separated; callers normalize afterwards. Nesting is not tracked: the match
/// ends at the first `)`.
pub fn remove_details(text: &str) -> String {
    COMMENT.replace_all(text, " ").into_owned()
}

/// Strip comments and normalize whitespace in one step
///
/// **Public** - the preprocessing shared by the `by` and protocol extractors
pub fn strip_and_clean(text: &str) -> String {
    cleanup_text(&remove_details(text))
}
