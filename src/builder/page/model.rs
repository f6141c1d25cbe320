use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::builder::page::utils::{build_url, make_permalink};
use crate::front_matter::Metadata;

/// Stable identity of a page within one build.
///
/// Assigned at creation and never changed, so it survives re-sorting the
/// page vector. Navigation and taxonomy membership refer to pages by id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub usize);

/// What a page is; decides its URL shape and template search path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageKind {
    #[default]
    Single,
    List,
    Taxonomy,
    TaxonomyList,
    Home,
}

impl PageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Single => "single",
            PageKind::List => "list",
            PageKind::Taxonomy => "taxonomy",
            PageKind::TaxonomyList => "terms",
            PageKind::Home => "home",
        }
    }

    /// Pages that list other pages and get a paginator
    pub fn is_listing(self) -> bool {
        matches!(self, PageKind::List | PageKind::Home | PageKind::Taxonomy)
    }
}

/// Cover image metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    pub image: String,
    pub alt: String,
    pub caption: String,
}

/// A page in the site
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub id: PageId,
    pub kind: PageKind,

    pub title: String,
    pub slug: String,
    /// Site-relative URL, always starting and ending with `/`
    pub url: String,
    pub permalink: String,
    pub description: String,
    pub summary: String,

    pub date: Option<DateTime<Utc>>,
    pub lastmod: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,

    /// Markdown body as read from disk
    pub raw_content: String,
    /// Rendered HTML, filled in by the markdown phase
    pub content: String,
    pub table_of_contents: String,
    pub word_count: usize,
    pub reading_time: usize,

    pub draft: bool,
    pub section: String,
    pub layout: Option<String>,
    pub weight: i64,

    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub series: Vec<String>,
    pub aliases: Vec<String>,
    pub cover: Cover,
    pub author: Option<String>,

    pub is_bundle: bool,
    pub bundle_dir: Option<PathBuf>,
    /// Non-markdown files living next to a bundle's `index.md`
    pub bundle_files: Vec<PathBuf>,
    pub source_path: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,

    /// Extension fields not otherwise understood
    pub params: Metadata,

    /// Older sibling in the same section
    pub prev_page: Option<PageId>,
    /// Newer sibling in the same section
    pub next_page: Option<PageId>,

    /// Set on synthetic taxonomy pages only
    pub term: Option<String>,
    pub taxonomy: Option<String>,
    pub count: usize,
}

impl Page {
    pub fn new(id: PageId, kind: PageKind) -> Self {
        Page {
            id,
            kind,
            ..Page::default()
        }
    }

    /// Derive URL and permalink from kind, section and slug
    pub fn assign_url(&mut self, base_url: &str) {
        self.url = build_url(self.kind, &self.section, &self.slug);
        self.permalink = make_permalink(base_url, &self.url);
    }

    /// Taxonomy pages are generated, not read from disk
    pub fn is_synthetic(&self) -> bool {
        self.source_path.is_none()
    }

    /// Path used to attribute errors: the source file, or the URL
    pub fn origin(&self) -> PathBuf {
        self.source_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_url() {
        let mut page = Page::new(PageId(1), PageKind::Single);
        page.section = "blog".to_string();
        page.slug = "hello".to_string();
        page.assign_url("https://example.org/");

        assert_eq!(page.url, "/blog/hello/");
        assert_eq!(page.permalink, "https://example.org/blog/hello/");
        assert!(page.is_synthetic());
        assert_eq!(page.origin(), PathBuf::from("/blog/hello/"));
    }
}
