mod partial;

use liquid::ParserBuilder;

use partial::PartialTag;
pub use partial::{TemplateStore, PARTIAL_NOT_FOUND};

/// Register custom tags for use in templates
pub fn register_tags(parser_builder: ParserBuilder, store: TemplateStore) -> ParserBuilder {
    parser_builder.tag(PartialTag::new(store))
}
