mod filters;
mod tags;

use chrono::{DateTime, SecondsFormat, Utc};
use liquid::{Parser, ParserBuilder};

pub use tags::{TemplateStore, PARTIAL_NOT_FOUND};

/// Build the template parser: liquid's standard library plus the `partial`
/// tag and the URL and date filters.
///
/// `store` is shared with the `partial` tag, which looks templates up in it
/// while rendering.
pub fn create_parser(base_url: &str, store: TemplateStore) -> Result<Parser, liquid::Error> {
    let parser_builder = ParserBuilder::with_stdlib();
    let parser_builder = filters::register_filters(parser_builder, base_url);
    let parser_builder = tags::register_tags(parser_builder, store);
    parser_builder.build()
}

/// Date format exposed to templates
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}
