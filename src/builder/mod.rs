pub mod page;
pub mod processor;
pub mod site;
pub mod types;

pub use site::SiteBuilder;
pub use types::{BuildOptions, BuildResult};
