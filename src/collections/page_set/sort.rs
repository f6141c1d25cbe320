use std::cmp::Ordering;

use crate::builder::page::Page;

/// Date descending; undated pages sort after dated ones
pub fn newest_first(a: &Page, b: &Page) -> Ordering {
    b.date.cmp(&a.date)
}

/// Newest first. The sort is stable so equal dates keep their order.
pub fn sort_by_date(pages: &mut [Page]) {
    pages.sort_by(newest_first);
}

/// Lightest first; unset weights (0) go last, ties fall back to date
pub fn sort_by_weight(pages: &mut [Page]) {
    pages.sort_by(|a, b| {
        let weight = |page: &Page| if page.weight == 0 { i64::MAX } else { page.weight };
        weight(a).cmp(&weight(b)).then_with(|| newest_first(a, b))
    });
}

/// Alphabetical, ignoring case
pub fn sort_by_title(pages: &mut [Page]) {
    pages.sort_by(|a, b| {
        a.title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.title.cmp(&b.title))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::page::{PageId, PageKind};
    use chrono::{TimeZone, Utc};

    fn page(id: usize, title: &str, day: Option<u32>, weight: i64) -> Page {
        let mut page = Page::new(PageId(id), PageKind::Single);
        page.title = title.to_string();
        page.date = day.map(|d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap());
        page.weight = weight;
        page
    }

    fn ids(pages: &[Page]) -> Vec<usize> {
        pages.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn test_sort_by_date() {
        let mut pages = vec![
            page(0, "a", Some(1), 0),
            page(1, "b", None, 0),
            page(2, "c", Some(3), 0),
            page(3, "d", Some(1), 0),
        ];
        sort_by_date(&mut pages);
        assert_eq!(ids(&pages), vec![2, 0, 3, 1]);
    }

    #[test]
    fn test_sort_by_weight() {
        let mut pages = vec![
            page(0, "a", Some(1), 0),
            page(1, "b", Some(1), 5),
            page(2, "c", Some(1), -1),
            page(3, "d", Some(2), 5),
        ];
        sort_by_weight(&mut pages);
        assert_eq!(ids(&pages), vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_sort_by_title() {
        let mut pages = vec![page(0, "beta", None, 0), page(1, "Alpha", None, 0), page(2, "alpha", None, 0)];
        sort_by_title(&mut pages);
        assert_eq!(ids(&pages), vec![1, 2, 0]);
    }
}
