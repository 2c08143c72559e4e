//! Short and full display forms for the free-form timestamps found in chat sheets.
//!
//! Sheets are filled by hand or by different tools, so timestamps arrive as
//! ISO strings, `dd/mm/yyyy hh:mm:ss`, bare times or arbitrary text. The short
//! form tries to pull out a time of day and otherwise degrades to a prefix of
//! the input; it never fails.

use regex::Regex;
use std::sync::LazyLock;

/// `H:MM:SS` or `HH:MM:SS`, ASCII digits only.
static TIME_OF_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,2}:[0-9]{2}:[0-9]{2}").unwrap());

/// Length of the prefix used by the fallbacks ("HH:MM:SS" is 8 characters).
const SHORT_FORM_CHARS: usize = 8;

/// Collapsed display text for `timestamp`, or `None` when it should be hidden.
///
/// Tried in order, first hit wins:
/// 1. absent or empty: hidden
/// 2. the first `H:MM:SS`/`HH:MM:SS` anywhere in the text, verbatim
/// 3. text containing `T`: after the first `T`, before the first `.`, max 8 chars
/// 4. text containing a space: the second whitespace token, or the first
///    8 chars when there is only one token
/// 5. the first 8 chars
pub fn short_form(timestamp: Option<&str>) -> Option<&str> {
    let timestamp = timestamp.filter(|text| !text.is_empty())?;

    if let Some(found) = TIME_OF_DAY.find(timestamp) {
        return Some(found.as_str());
    }

    let short = if let Some((_, after_t)) = timestamp.split_once('T') {
        let time = after_t.split_once('.').map_or(after_t, |(head, _)| head);
        take_chars(time, SHORT_FORM_CHARS)
    } else if timestamp.contains(' ') {
        let mut tokens = timestamp.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(_), Some(second)) => second,
            _ => take_chars(timestamp, SHORT_FORM_CHARS),
        }
    } else {
        take_chars(timestamp, SHORT_FORM_CHARS)
    };

    tracing::trace!("Short form of '{}' is '{}'", timestamp, short);
    Some(short)
}

/// Expanded display text: the timestamp exactly as stored.
pub fn full_form(timestamp: &str) -> &str {
    timestamp
}

fn take_chars(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Display state of one message's timestamp, toggled between the short and
/// full forms. Starts collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampLabel {
    full: String,
    short: String,
    expanded: bool,
}

impl TimestampLabel {
    /// Returns `None` when the timestamp should not be displayed at all.
    pub fn new(timestamp: Option<&str>) -> Option<Self> {
        let full = timestamp?;
        let short = short_form(Some(full))?;
        Some(Self {
            full: full_form(full).to_string(),
            short: short.to_string(),
            expanded: false,
        })
    }

    pub fn text(&self) -> &str {
        if self.expanded {
            &self.full
        } else {
            &self.short
        }
    }

    #[allow(dead_code)]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Flips between collapsed and expanded, returning the new text.
    #[allow(dead_code)]
    pub fn toggle(&mut self) -> &str {
        self.expanded = !self.expanded;
        self.text()
    }
}
