//! Inclusion filters. Each returns a new vector and leaves its input alone.

use chrono::{DateTime, Utc};

use crate::builder::page::Page;

/// Pages not marked as drafts
pub fn filter_drafts(pages: &[Page]) -> Vec<Page> {
    retain(pages, |page| !page.draft)
}

/// Pages whose date is not after `now`; undated pages are kept
pub fn filter_future(pages: &[Page], now: DateTime<Utc>) -> Vec<Page> {
    retain(pages, |page| page.date.map_or(true, |date| date <= now))
}

/// Pages whose expiry date is still ahead of `now`; pages without one are kept
pub fn filter_expired(pages: &[Page], now: DateTime<Utc>) -> Vec<Page> {
    retain(pages, |page| page.expiry_date.map_or(true, |expiry| expiry > now))
}

fn retain(pages: &[Page], keep: impl Fn(&Page) -> bool) -> Vec<Page> {
    pages.iter().filter(|page| keep(page)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::page::{PageId, PageKind};
    use chrono::{Duration, TimeZone};

    fn page(id: usize) -> Page {
        let mut page = Page::new(PageId(id), PageKind::Single);
        page.title = format!("Page {}", id);
        page
    }

    fn ids(pages: &[Page]) -> Vec<usize> {
        pages.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn test_filter_drafts_is_idempotent_and_non_mutating() {
        let mut draft = page(1);
        draft.draft = true;
        let input = vec![page(0), draft, page(2)];

        let once = filter_drafts(&input);
        let twice = filter_drafts(&once);

        assert_eq!(ids(&once), vec![0, 2]);
        assert_eq!(ids(&twice), ids(&once));
        assert_eq!(input.len(), 3);
        assert!(input[1].draft);
    }

    #[test]
    fn test_filter_future() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut past = page(0);
        past.date = Some(now - Duration::days(1));
        let mut exact = page(1);
        exact.date = Some(now);
        let mut future = page(2);
        future.date = Some(now + Duration::seconds(1));
        let undated = page(3);

        let kept = filter_future(&[past, exact, future, undated], now);
        assert_eq!(ids(&kept), vec![0, 1, 3]);
    }

    #[test]
    fn test_filter_expired() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut expired = page(0);
        expired.expiry_date = Some(now - Duration::days(1));
        let mut expiring_now = page(1);
        expiring_now.expiry_date = Some(now);
        let mut live = page(2);
        live.expiry_date = Some(now + Duration::days(1));

        let kept = filter_expired(&[expired, expiring_now, live, page(3)], now);
        assert_eq!(ids(&kept), vec![2, 3]);
    }
}
