//! Provider section isolation.

use regex::Regex;
use tracing::debug;

/// Narrow `text` to the part between the first `start` match and the first
/// following `end` match.
///
/// Without a `start` match the whole text is returned, so a document with an
/// unusual layout still gets searched. Without an `end` match the section runs
/// to the end of the text. The returned slice borrows from `text`.
pub fn isolate_section<'a>(text: &'a str, start: &Regex, end: Option<&Regex>) -> &'a str {
    let Some(start_match) = start.find(text) else {
        debug!("Section start marker not found, searching full text");
        return text;
    };

    let after_start = &text[start_match.end()..];

    match end.and_then(|re| re.find(after_start)) {
        Some(end_match) => {
            debug!(
                "Isolated section of {} bytes at offset {}",
                end_match.start(),
                start_match.end()
            );
            &after_start[..end_match.start()]
        }
        None => {
            debug!("Section end marker not found, section runs to end of text");
            after_start
        }
    }
}
