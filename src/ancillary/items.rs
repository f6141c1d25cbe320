use chrono::{DateTime, Utc};

use crate::builder::page::{Page, PageKind};
use crate::config::Config;

/// Site-wide values a generator may need
#[derive(Debug, Clone, PartialEq)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
    pub author: Option<String>,
    pub base_url: String,
    pub language_code: String,
    pub generated_at: DateTime<Utc>,
    /// Set from the `minify` build option
    pub minify: bool,
}

impl SiteMeta {
    pub fn from_config(config: &Config, generated_at: DateTime<Utc>) -> Self {
        SiteMeta {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            base_url: config.base_url.clone(),
            language_code: config.language_code.clone(),
            generated_at,
            minify: false,
        }
    }
}

/// One published page, flattened for generators
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub url: String,
    pub permalink: String,
    pub kind: PageKind,
    pub date: Option<DateTime<Utc>>,
    pub lastmod: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub summary: String,
    pub content: String,
    pub aliases: Vec<String>,
}

impl From<&Page> for FeedItem {
    fn from(page: &Page) -> Self {
        FeedItem {
            title: page.title.clone(),
            url: page.url.clone(),
            permalink: page.permalink.clone(),
            kind: page.kind,
            date: page.date,
            lastmod: page.lastmod.or(page.date),
            tags: page.tags.clone(),
            categories: page.categories.clone(),
            summary: page.summary.clone(),
            content: page.content.clone(),
            aliases: page.aliases.clone(),
        }
    }
}

/// Items for every non-draft page, in the order given
pub fn build_feed_items(pages: &[Page]) -> Vec<FeedItem> {
    pages
        .iter()
        .filter(|page| !page.draft)
        .map(FeedItem::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::page::PageId;
    use chrono::TimeZone;

    #[test]
    fn test_drafts_excluded_and_order_kept() {
        let mut first = Page::new(PageId(0), PageKind::Single);
        first.title = "First".to_string();
        first.date = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        let mut draft = Page::new(PageId(1), PageKind::Single);
        draft.draft = true;
        let mut home = Page::new(PageId(2), PageKind::Home);
        home.url = "/".to_string();

        let items = build_feed_items(&[first, draft, home]);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "First");
        assert_eq!(items[0].lastmod, items[0].date);
        assert_eq!(items[1].kind, PageKind::Home);
    }
}
