use std::collections::HashSet;

use log::warn;

use crate::builder::page::{slugify, Page, PageId, PageKind};
use crate::collections::taxonomy::Taxonomy;

/// Synthesize listing pages for taxonomies.
///
/// For each taxonomy in name order: one `TaxonomyList` page at `/{name}/`,
/// then one `Taxonomy` page per term at `/{name}/{term}/` in term order.
/// Terms whose segments collide get `-1`, `-2`, ... in term order. Ids are
/// handed out from `first_id` upward.
pub fn generate_taxonomy_pages(taxonomies: &[Taxonomy], first_id: usize, base_url: &str) -> Vec<Page> {
    let mut ordered: Vec<&Taxonomy> = taxonomies.iter().collect();
    ordered.sort_by(|a, b| a.name.cmp(&b.name));

    let mut pages = Vec::new();
    for taxonomy in ordered {
        let mut list = Page::new(PageId(first_id + pages.len()), PageKind::TaxonomyList);
        list.title = title_case(&taxonomy.name);
        list.section = taxonomy.name.clone();
        list.slug = taxonomy.name.clone();
        list.taxonomy = Some(taxonomy.name.clone());
        list.count = taxonomy.terms.len();
        list.assign_url(base_url);
        pages.push(list);

        let segments = term_segments(taxonomy.terms.keys());
        for ((term, members), segment) in taxonomy.terms.iter().zip(segments) {
            let mut page = Page::new(PageId(first_id + pages.len()), PageKind::Taxonomy);
            page.title = term.clone();
            page.section = taxonomy.name.clone();
            if segment != term_segment(term) {
                warn!(
                    "Term '{}' in {} shares its URL segment with another term; using /{}/{}/",
                    term, taxonomy.name, taxonomy.name, segment
                );
            }
            page.slug = segment;
            page.term = Some(term.clone());
            page.taxonomy = Some(taxonomy.name.clone());
            page.count = members.len();
            page.assign_url(base_url);
            pages.push(page);
        }
    }

    pages
}

/// URL segment for a term; terms with nothing sluggable keep their text
fn term_segment(term: &str) -> String {
    let slug = slugify(term);
    if slug.is_empty() {
        term.to_string()
    } else {
        slug
    }
}

/// URL segments for terms in order, unique within one taxonomy.
///
/// Terms keep their own segment when nothing earlier claimed it. The rest
/// get the first free `{segment}-1`, `{segment}-2`, ...
fn term_segments<'a>(terms: impl Iterator<Item = &'a String>) -> Vec<String> {
    let natural: Vec<String> = terms.map(|term| term_segment(term)).collect();

    let mut used = HashSet::new();
    let claimed: Vec<bool> = natural.iter().map(|segment| used.insert(segment.clone())).collect();

    natural
        .into_iter()
        .zip(claimed)
        .map(|(segment, claimed)| {
            if claimed {
                return segment;
            }
            let mut suffix = 1;
            let mut candidate = format!("{}-{}", segment, suffix);
            while used.contains(&candidate) {
                suffix += 1;
                candidate = format!("{}-{}", segment, suffix);
            }
            used.insert(candidate.clone());
            candidate
        })
        .collect()
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
