//! Hand-off to ancillary artifact generators such as feeds, sitemaps,
//! search indexes and alias redirects.
//!
//! The build only derives a plain item list from the finished pages and
//! writes whatever bytes a generator returns to `{output_dir}/{file_name}`.

mod items;

use std::error::Error;

pub use items::{build_feed_items, FeedItem, SiteMeta};

/// Boxed error returned by generators
pub type GeneratorError = Box<dyn Error + Send + Sync>;

/// Produces one output file from the site's page list
pub trait ArtifactGenerator: Send + Sync {
    /// Path of the artifact relative to the output directory
    fn file_name(&self) -> &str;

    fn generate(&self, site: &SiteMeta, items: &[FeedItem]) -> Result<Vec<u8>, GeneratorError>;
}
