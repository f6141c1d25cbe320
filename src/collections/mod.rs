pub mod page_set;
pub mod pagination;
pub mod taxonomy;

pub use page_set::{
    filter_drafts, filter_expired, filter_future, index_by_id, link_prev_next, sort_by_date,
    sort_by_title, sort_by_weight,
};
pub use pagination::{paginate, Pager};
pub use taxonomy::{build_taxonomies, generate_taxonomy_pages, Taxonomy};
