mod builder;
mod context;
mod parallel;

pub use builder::SiteBuilder;
