use lazy_static::lazy_static;
use regex::Regex;

use crate::builder::page::model::PageKind;

lazy_static! {
    static ref DATE_PREFIX_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}-").unwrap();
    static ref HYPHEN_RUN_REGEX: Regex = Regex::new(r"-{2,}").unwrap();
}

/// Turn arbitrary text into a URL slug.
///
/// Lowercases, maps whitespace and underscores to hyphens, drops anything
/// outside `[a-z0-9-.]`, collapses hyphen runs and trims edge hyphens.
pub fn slugify(text: &str) -> String {
    let mapped: String = text
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            c if c.is_whitespace() || c == '_' => Some('-'),
            'a'..='z' | '0'..='9' | '-' | '.' => Some(c),
            _ => None,
        })
        .collect();

    HYPHEN_RUN_REGEX
        .replace_all(&mapped, "-")
        .trim_matches('-')
        .to_string()
}

/// Drop a leading `YYYY-MM-DD-` from a file or directory name
pub fn strip_date_prefix(name: &str) -> &str {
    match DATE_PREFIX_REGEX.find(name) {
        Some(m) => &name[m.end()..],
        None => name,
    }
}

/// Site-relative URL of a page, derived from kind, section and slug only
pub fn build_url(kind: PageKind, section: &str, slug: &str) -> String {
    match kind {
        PageKind::Home => "/".to_string(),
        PageKind::List | PageKind::TaxonomyList => format!("/{}/", section),
        PageKind::Single | PageKind::Taxonomy if section.is_empty() => format!("/{}/", slug),
        PageKind::Single | PageKind::Taxonomy => format!("/{}/{}/", section, slug),
    }
}

/// Absolute URL of a page
pub fn make_permalink(base_url: &str, url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), url)
}
