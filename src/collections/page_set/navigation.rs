use std::collections::{BTreeMap, HashMap};

use crate::builder::page::{Page, PageId, PageKind};
use crate::collections::page_set::sort::newest_first;

/// Position of every page in the slice, keyed by id
pub fn index_by_id(pages: &[Page]) -> HashMap<PageId, usize> {
    pages
        .iter()
        .enumerate()
        .map(|(index, page)| (page.id, index))
        .collect()
}

/// Link chronological siblings.
///
/// Single pages sharing a section are ordered newest first; each page's
/// `prev_page` is the next older sibling and `next_page` the next newer
/// one. Links on every other page are cleared.
pub fn link_prev_next(pages: &mut [Page]) {
    let mut sections: BTreeMap<String, Vec<usize>> = BTreeMap::new();

    for (index, page) in pages.iter_mut().enumerate() {
        page.prev_page = None;
        page.next_page = None;
        if page.kind == PageKind::Single {
            sections.entry(page.section.clone()).or_default().push(index);
        }
    }

    for indices in sections.values_mut() {
        indices.sort_by(|&a, &b| newest_first(&pages[a], &pages[b]));

        for pair in indices.windows(2) {
            let (newer, older) = (pair[0], pair[1]);
            pages[newer].prev_page = Some(pages[older].id);
            pages[older].next_page = Some(pages[newer].id);
        }
    }
}
