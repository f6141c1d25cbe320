use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::builder::page::{Page, PageId};
use crate::collections::page_set::newest_first;
use crate::front_matter::FrontValue;

/// A classification such as tags, with its terms and their pages
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    /// Plural name, e.g. `tags`
    pub name: String,
    pub singular: String,
    /// Normalized term to member pages, newest first
    pub terms: BTreeMap<String, Vec<PageId>>,
}

impl Taxonomy {
    pub fn pages_for(&self, term: &str) -> &[PageId] {
        self.terms.get(term).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Lowercase and trim a term; empty terms yield `None`
pub fn normalize_term(term: &str) -> Option<String> {
    let term = term.trim().to_lowercase();
    (!term.is_empty()).then_some(term)
}

/// Aggregate terms for every configured taxonomy.
///
/// `taxonomies` maps singular to plural names. `tags`, `categories` and
/// `series` read the page fields of the same name; any other taxonomy reads
/// `params[name]`, accepting a string or a list of strings. Synthetic pages
/// never contribute. The result is ordered by taxonomy name.
pub fn build_taxonomies(pages: &[Page], taxonomies: &BTreeMap<String, String>) -> Vec<Taxonomy> {
    let mut by_name: BTreeMap<String, Taxonomy> = BTreeMap::new();
    for (singular, plural) in taxonomies {
        by_name.entry(plural.clone()).or_insert_with(|| Taxonomy {
            name: plural.clone(),
            singular: singular.clone(),
            terms: BTreeMap::new(),
        });
    }

    let position: HashMap<PageId, &Page> = pages.iter().map(|page| (page.id, page)).collect();

    for taxonomy in by_name.values_mut() {
        for page in pages.iter().filter(|page| !page.is_synthetic()) {
            let mut terms: Vec<String> = raw_terms(page, &taxonomy.name)
                .iter()
                .filter_map(|term| normalize_term(term))
                .collect();
            terms.sort();
            terms.dedup();

            for term in terms {
                taxonomy.terms.entry(term).or_default().push(page.id);
            }
        }

        for members in taxonomy.terms.values_mut() {
            members.sort_by(|a, b| newest_first(position[a], position[b]));
        }

        debug!("Taxonomy '{}' has {} terms", taxonomy.name, taxonomy.terms.len());
    }

    by_name.into_values().collect()
}

fn raw_terms(page: &Page, taxonomy: &str) -> Vec<String> {
    match taxonomy {
        "tags" => page.tags.clone(),
        "categories" => page.categories.clone(),
        "series" => page.series.clone(),
        custom => match page.params.get(custom) {
            Some(FrontValue::String(term)) => vec![term.clone()],
            Some(FrontValue::List(items)) => items
                .iter()
                .filter_map(FrontValue::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::page::PageKind;
    use chrono::{TimeZone, Utc};

    fn page(id: usize, day: u32, tags: &[&str]) -> Page {
        let mut page = Page::new(PageId(id), PageKind::Single);
        page.title = format!("Page {}", id);
        page.source_path = Some(format!("content/{}.md", id).into());
        page.date = Some(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap());
        page.tags = tags.iter().map(|t| t.to_string()).collect();
        page
    }

    fn tags_only() -> BTreeMap<String, String> {
        BTreeMap::from([("tag".to_string(), "tags".to_string())])
    }

    #[test]
    fn test_terms_are_normalized() {
        let pages = vec![page(0, 1, &["Go"]), page(1, 3, &["go"]), page(2, 2, &[" GO "])];
        let taxonomies = build_taxonomies(&pages, &tags_only());

        assert_eq!(taxonomies.len(), 1);
        let tags = &taxonomies[0];
        assert_eq!(tags.singular, "tag");
        assert_eq!(tags.terms.len(), 1);
        assert_eq!(tags.pages_for("go"), &[PageId(1), PageId(2), PageId(0)]);
    }

    #[test]
    fn test_empty_terms_and_duplicates_skipped() {
        let pages = vec![page(0, 1, &["", "  ", "Rust", "rust"])];
        let tags = &build_taxonomies(&pages, &tags_only())[0];
        assert_eq!(tags.terms.keys().collect::<Vec<_>>(), vec!["rust"]);
        assert_eq!(tags.pages_for("rust"), &[PageId(0)]);
        assert!(tags.pages_for("missing").is_empty());
    }

    #[test]
    fn test_custom_taxonomy_from_params() {
        let mut with_list = page(0, 1, &[]);
        with_list.params.insert(
            "moods".to_string(),
            FrontValue::List(vec!["Happy".into(), FrontValue::Integer(1)]),
        );
        let mut with_string = page(1, 2, &[]);
        with_string.params.insert("moods".to_string(), "happy".into());
        let without = page(2, 3, &[]);

        let config = BTreeMap::from([("mood".to_string(), "moods".to_string())]);
        let moods = &build_taxonomies(&[with_list, with_string, without], &config)[0];

        assert_eq!(moods.name, "moods");
        assert_eq!(moods.pages_for("happy"), &[PageId(1), PageId(0)]);
    }

    #[test]
    fn test_synthetic_pages_do_not_contribute() {
        let mut synthetic = page(0, 1, &["x"]);
        synthetic.source_path = None;
        let tags = &build_taxonomies(&[synthetic], &tags_only())[0];
        assert!(tags.terms.is_empty());
    }
}
