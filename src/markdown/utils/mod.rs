mod text;

pub use text::{count_words, extract_summary, reading_time, strip_html, SUMMARY_MARKER};
