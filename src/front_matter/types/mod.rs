pub mod value;

pub use value::{parse_date_str, FrontValue, Metadata, ValueError};
