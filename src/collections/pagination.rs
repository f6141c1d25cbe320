const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a paginated collection
#[derive(Debug, Clone, PartialEq)]
pub struct Pager<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page_number: usize,
    pub total_pages: usize,
    pub url: String,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
    pub first_url: String,
    pub last_url: String,
}

/// URL of page `number` of a listing rooted at `base_url`
pub fn pager_url(base_url: &str, number: usize) -> String {
    if number <= 1 {
        base_url.to_string()
    } else {
        format!("{}page/{}/", base_url, number)
    }
}

/// Split `items` into pagers of `page_size`.
///
/// Page 1 lives at `base_url`, later pages at `{base_url}page/{n}/`. A
/// non-positive size falls back to 10. Empty input still yields one empty
/// pager so the listing renders.
pub fn paginate<T: Clone>(items: &[T], page_size: i64, base_url: &str) -> Vec<Pager<T>> {
    let size = usize::try_from(page_size)
        .ok()
        .filter(|&size| size > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let base_url = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };

    let total_pages = items.len().div_ceil(size).max(1);
    let last_url = pager_url(&base_url, total_pages);

    (1..=total_pages)
        .map(|number| {
            let start = (number - 1) * size;
            let end = (start + size).min(items.len());
            Pager {
                items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
                page_number: number,
                total_pages,
                url: pager_url(&base_url, number),
                has_prev: number > 1,
                has_next: number < total_pages,
                prev_url: (number > 1).then(|| pager_url(&base_url, number - 1)),
                next_url: (number < total_pages).then(|| pager_url(&base_url, number + 1)),
                first_url: base_url.clone(),
                last_url: last_url.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_items_by_three() {
        let items: Vec<u32> = (0..10).collect();
        let pagers = paginate(&items, 3, "/blog/");

        assert_eq!(pagers.len(), 4);
        assert_eq!(pagers[0].url, "/blog/");
        assert_eq!(pagers[0].prev_url, None);
        assert_eq!(pagers[0].next_url.as_deref(), Some("/blog/page/2/"));
        assert!(!pagers[3].has_next);
        assert!(pagers[3].has_prev);
        assert_eq!(pagers[3].prev_url.as_deref(), Some("/blog/page/3/"));
        assert_eq!(pagers[3].items, vec![9]);
        assert!(pagers.iter().all(|p| p.first_url == "/blog/" && p.last_url == "/blog/page/4/"));
    }

    #[test]
    fn test_pagers_partition_input() {
        for n in 1..30usize {
            for size in 1..8i64 {
                let items: Vec<usize> = (0..n).collect();
                let pagers = paginate(&items, size, "/");
                assert_eq!(pagers.len(), n.div_ceil(size as usize));
                let flattened: Vec<usize> = pagers.iter().flat_map(|p| p.items.clone()).collect();
                assert_eq!(flattened, items);
            }
        }
    }

    #[test]
    fn test_non_positive_size_defaults_to_ten() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(&items, 0, "/").len(), 3);
        assert_eq!(paginate(&items, -4, "/").len(), 3);
    }

    #[test]
    fn test_single_and_empty() {
        let pagers = paginate(&[1, 2], 5, "/tags/go");
        assert_eq!(pagers.len(), 1);
        assert_eq!(pagers[0].url, "/tags/go/");
        assert_eq!(pagers[0].last_url, "/tags/go/");
        assert!(!pagers[0].has_prev && !pagers[0].has_next);

        let empty = paginate::<u32>(&[], 5, "/");
        assert_eq!(empty.len(), 1);
        assert!(empty[0].items.is_empty());
        assert_eq!(empty[0].total_pages, 1);
    }
}
