use lazy_static::lazy_static;
use regex::Regex;

/// Marks the end of a hand-picked summary in page content
pub const SUMMARY_MARKER: &str = "<!--more-->";

const WORDS_PER_MINUTE: usize = 200;

lazy_static! {
    static ref TAG_REGEX: Regex = Regex::new(r"(?s)<!--.*?-->|<[^>]*>").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Reduce HTML to plain text with single spaces between words
pub fn strip_html(html: &str) -> String {
    let without_tags = TAG_REGEX.replace_all(html, " ");
    let decoded = html_escape::decode_html_entities(&without_tags);
    WHITESPACE_REGEX.replace_all(decoded.trim(), " ").into_owned()
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes to read `words` words, rounded up
pub fn reading_time(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE)
}

/// Summary of rendered content.
///
/// Content before a `<!--more-->` marker is used as-is; otherwise the first
/// `length` words of the plain text.
pub fn extract_summary(html: &str, length: usize) -> String {
    if let Some(pos) = html.find(SUMMARY_MARKER) {
        return html[..pos].trim().to_string();
    }

    strip_html(html)
        .split_whitespace()
        .take(length)
        .collect::<Vec<_>>()
        .join(" ")
}
