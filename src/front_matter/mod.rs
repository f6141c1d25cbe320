pub mod parser;
pub mod types;

// Re-export the most common items for convenience
pub use parser::{parse_front_matter, parse_front_matter_str, FrontMatterError, FrontMatterFormat, ParsedContent};
pub use types::{FrontValue, Metadata, ValueError};
