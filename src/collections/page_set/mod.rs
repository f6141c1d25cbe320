mod filter;
mod navigation;
mod sort;

pub use filter::{filter_drafts, filter_expired, filter_future};
pub use navigation::{index_by_id, link_prev_next};
pub use sort::{newest_first, sort_by_date, sort_by_title, sort_by_weight};
