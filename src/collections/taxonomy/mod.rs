mod builder;
mod pages;

pub use builder::{build_taxonomies, Taxonomy};
pub use pages::generate_taxonomy_pages;
