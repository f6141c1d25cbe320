mod collector;
mod model;
mod populate;
mod utils;

pub use collector::discover_content;
pub use model::{Cover, Page, PageId, PageKind};
pub use populate::PageError;
pub use utils::{make_permalink, slugify};
