//! Template contexts.
//!
//! Field names here are what themes program against, so every key is
//! always present: unset dates and strings are `""`, absent references are
//! `nil`.

use std::collections::{BTreeMap, HashMap};

use liquid::model::{KString, Value};
use liquid::Object;

use crate::builder::page::{Page, PageId, PageKind};
use crate::builder::processor::{metadata_to_liquid, yaml_to_liquid};
use crate::collections::{Pager, Taxonomy};
use crate::config::Config;
use crate::liquid::format_date;

/// Read-only view of the final page set, addressed by id
pub struct SiteIndex<'a> {
    pages: &'a [Page],
    by_id: HashMap<PageId, usize>,
    taxonomies: &'a [Taxonomy],
}

impl<'a> SiteIndex<'a> {
    pub fn new(pages: &'a [Page], taxonomies: &'a [Taxonomy]) -> Self {
        SiteIndex {
            pages,
            by_id: crate::collections::index_by_id(pages),
            taxonomies,
        }
    }

    pub fn get(&self, id: PageId) -> Option<&'a Page> {
        self.by_id.get(&id).map(|&index| &self.pages[index])
    }

    pub fn taxonomy(&self, name: &str) -> Option<&'a Taxonomy> {
        self.taxonomies.iter().find(|taxonomy| taxonomy.name == name)
    }

    /// Pages a listing page lists, newest first
    pub fn listed_pages(&self, page: &Page) -> Vec<PageId> {
        match page.kind {
            PageKind::Home => self.singles(|_| true),
            PageKind::List => self.singles(|p| p.section == page.section),
            PageKind::Taxonomy => match (&page.taxonomy, &page.term) {
                (Some(name), Some(term)) => self
                    .taxonomy(name)
                    .map(|taxonomy| taxonomy.pages_for(term).to_vec())
                    .unwrap_or_default(),
                _ => Vec::new(),
            },
            PageKind::Single | PageKind::TaxonomyList => Vec::new(),
        }
    }

    fn singles(&self, keep: impl Fn(&Page) -> bool) -> Vec<PageId> {
        self.pages
            .iter()
            .filter(|p| p.kind == PageKind::Single && keep(p))
            .map(|p| p.id)
            .collect()
    }

    fn refs(&self, ids: &[PageId]) -> Value {
        Value::Array(
            ids.iter()
                .filter_map(|&id| self.get(id))
                .map(|page| Value::Object(page_ref(page)))
                .collect(),
        )
    }
}

fn date_value(date: &Option<chrono::DateTime<chrono::Utc>>) -> Value {
    Value::scalar(date.as_ref().map(format_date).unwrap_or_default())
}

fn strings(values: &[String]) -> Value {
    Value::Array(values.iter().map(|s| Value::scalar(s.clone())).collect())
}

/// Fields shared by full page contexts and page references
fn base_fields(page: &Page) -> Object {
    let mut obj = Object::new();
    obj.insert("id".into(), Value::scalar(page.id.0 as i64));
    obj.insert("title".into(), Value::scalar(page.title.clone()));
    obj.insert("slug".into(), Value::scalar(page.slug.clone()));
    obj.insert("url".into(), Value::scalar(page.url.clone()));
    obj.insert("permalink".into(), Value::scalar(page.permalink.clone()));
    obj.insert("description".into(), Value::scalar(page.description.clone()));
    obj.insert("summary".into(), Value::scalar(page.summary.clone()));
    obj.insert("date".into(), date_value(&page.date));
    obj.insert("lastmod".into(), date_value(&page.lastmod));
    obj.insert("expiry_date".into(), date_value(&page.expiry_date));
    obj.insert("word_count".into(), Value::scalar(page.word_count as i64));
    obj.insert("reading_time".into(), Value::scalar(page.reading_time as i64));
    obj.insert("draft".into(), Value::scalar(page.draft));
    obj.insert("kind".into(), Value::scalar(page.kind.as_str()));
    obj.insert("section".into(), Value::scalar(page.section.clone()));
    obj.insert(
        "layout".into(),
        Value::scalar(page.layout.clone().unwrap_or_default()),
    );
    obj.insert("weight".into(), Value::scalar(page.weight));
    obj.insert("tags".into(), strings(&page.tags));
    obj.insert("categories".into(), strings(&page.categories));
    obj.insert("series".into(), strings(&page.series));
    obj.insert("aliases".into(), strings(&page.aliases));

    let mut cover = Object::new();
    cover.insert("image".into(), Value::scalar(page.cover.image.clone()));
    cover.insert("alt".into(), Value::scalar(page.cover.alt.clone()));
    cover.insert("caption".into(), Value::scalar(page.cover.caption.clone()));
    obj.insert("cover".into(), Value::Object(cover));

    obj.insert(
        "author".into(),
        Value::scalar(page.author.clone().unwrap_or_default()),
    );
    obj.insert("is_bundle".into(), Value::scalar(page.is_bundle));
    obj.insert("params".into(), Value::Object(metadata_to_liquid(&page.params)));
    obj.insert(
        "term".into(),
        Value::scalar(page.term.clone().unwrap_or_default()),
    );
    obj.insert(
        "taxonomy".into(),
        Value::scalar(page.taxonomy.clone().unwrap_or_default()),
    );
    obj.insert("count".into(), Value::scalar(page.count as i64));
    obj
}

/// Compact page object used inside lists: no body, no nested pages
pub fn page_ref(page: &Page) -> Object {
    base_fields(page)
}

/// A page reference that also carries the rendered body
fn page_ref_with_content(page: &Page) -> Object {
    let mut obj = base_fields(page);
    obj.insert("content".into(), Value::scalar(page.content.clone()));
    obj
}

/// The full `page` object for one page
pub fn page_context(page: &Page, index: &SiteIndex, site_author: Option<&str>) -> Object {
    let mut obj = base_fields(page);

    obj.insert("content".into(), Value::scalar(page.content.clone()));
    obj.insert(
        "table_of_contents".into(),
        Value::scalar(page.table_of_contents.clone()),
    );

    if page.author.is_none() {
        obj.insert(
            "author".into(),
            Value::scalar(site_author.unwrap_or_default().to_string()),
        );
    }

    let bundle_files: Vec<Value> = page
        .bundle_files
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| Value::scalar(format!("{}{}", page.url, name.to_string_lossy())))
        .collect();
    obj.insert("bundle_files".into(), Value::Array(bundle_files));

    let neighbour = |id: Option<PageId>| {
        id.and_then(|id| index.get(id))
            .map(|p| Value::Object(page_ref(p)))
            .unwrap_or(Value::Nil)
    };
    obj.insert("prev".into(), neighbour(page.prev_page));
    obj.insert("next".into(), neighbour(page.next_page));

    obj.insert("pages".into(), index.refs(&index.listed_pages(page)));
    obj.insert("terms".into(), terms_value(page, index));

    obj
}

/// Terms with counts for a taxonomy list page, in term order
fn terms_value(page: &Page, index: &SiteIndex) -> Value {
    if page.kind != PageKind::TaxonomyList {
        return Value::Array(Vec::new());
    }

    let taxonomy = match page.taxonomy.as_deref().and_then(|name| index.taxonomy(name)) {
        Some(taxonomy) => taxonomy,
        None => return Value::Array(Vec::new()),
    };

    let term_urls: HashMap<&str, &str> = index
        .pages
        .iter()
        .filter(|p| p.kind == PageKind::Taxonomy && p.taxonomy.as_deref() == Some(taxonomy.name.as_str()))
        .filter_map(|p| p.term.as_deref().map(|term| (term, p.url.as_str())))
        .collect();

    Value::Array(
        taxonomy
            .terms
            .iter()
            .map(|(term, members)| {
                let mut obj = Object::new();
                obj.insert("name".into(), Value::scalar(term.clone()));
                obj.insert(
                    "url".into(),
                    Value::scalar(term_urls.get(term.as_str()).copied().unwrap_or_default().to_string()),
                );
                obj.insert("count".into(), Value::scalar(members.len() as i64));
                obj.insert("pages".into(), index.refs(members));
                Value::Object(obj)
            })
            .collect(),
    )
}

/// The `site` object, built once per build
pub fn site_context(config: &Config, index: &SiteIndex) -> Object {
    let mut site = Object::new();
    site.insert("title".into(), Value::scalar(config.title.clone()));
    site.insert("description".into(), Value::scalar(config.description.clone()));
    site.insert(
        "author".into(),
        Value::scalar(config.author.clone().unwrap_or_default()),
    );
    site.insert("base_url".into(), Value::scalar(config.base_url.clone()));
    site.insert("language_code".into(), Value::scalar(config.language_code.clone()));

    let params: Object = config
        .params
        .iter()
        .map(|(key, value)| (KString::from(key.clone()), yaml_to_liquid(value)))
        .collect();
    site.insert("params".into(), Value::Object(params));

    site.insert(
        "pages".into(),
        Value::Array(index.pages.iter().map(|p| Value::Object(page_ref(p))).collect()),
    );

    let mut sections: BTreeMap<&str, Vec<PageId>> = BTreeMap::new();
    for page in index.pages.iter().filter(|p| p.kind == PageKind::Single && !p.section.is_empty()) {
        sections.entry(page.section.as_str()).or_default().push(page.id);
    }
    let sections: Object = sections
        .into_iter()
        .map(|(name, ids)| (KString::from(name.to_string()), index.refs(&ids)))
        .collect();
    site.insert("sections".into(), Value::Object(sections));

    let taxonomies: Object = index
        .taxonomies
        .iter()
        .map(|taxonomy| {
            let terms: Object = taxonomy
                .terms
                .iter()
                .map(|(term, members)| (KString::from(term.clone()), index.refs(members)))
                .collect();
            (KString::from(taxonomy.name.clone()), Value::Object(terms))
        })
        .collect();
    site.insert("taxonomies".into(), Value::Object(taxonomies));

    site
}

/// The `paginator` object for one pager of a listing page
pub fn paginator_context(pager: &Pager<PageId>, index: &SiteIndex) -> Object {
    let mut obj = Object::new();
    obj.insert(
        "pages".into(),
        Value::Array(
            pager
                .items
                .iter()
                .filter_map(|&id| index.get(id))
                .map(|page| Value::Object(page_ref_with_content(page)))
                .collect(),
        ),
    );
    obj.insert("page_number".into(), Value::scalar(pager.page_number as i64));
    obj.insert("total_pages".into(), Value::scalar(pager.total_pages as i64));
    obj.insert("url".into(), Value::scalar(pager.url.clone()));
    obj.insert("has_prev".into(), Value::scalar(pager.has_prev));
    obj.insert("has_next".into(), Value::scalar(pager.has_next));
    obj.insert(
        "prev_url".into(),
        Value::scalar(pager.prev_url.clone().unwrap_or_default()),
    );
    obj.insert(
        "next_url".into(),
        Value::scalar(pager.next_url.clone().unwrap_or_default()),
    );
    obj.insert("first_url".into(), Value::scalar(pager.first_url.clone()));
    obj.insert("last_url".into(), Value::scalar(pager.last_url.clone()));
    obj
}
