mod absolute_url;
mod date_to_string;
mod date_to_xmlschema;
mod relative_url;

use liquid::ParserBuilder;

pub use absolute_url::AbsoluteUrlFilterParser;
pub use date_to_string::DateToStringFilterParser;
pub use date_to_xmlschema::DateToXmlSchemaFilterParser;
pub use relative_url::RelativeUrlFilterParser;

/// Register the site filters
pub fn register_filters(parser_builder: ParserBuilder, base_url: &str) -> ParserBuilder {
    parser_builder
        .filter(RelativeUrlFilterParser {
            base_path: base_path(base_url),
        })
        .filter(AbsoluteUrlFilterParser {
            base_url: base_url.to_string(),
        })
        .filter(DateToStringFilterParser)
        .filter(DateToXmlSchemaFilterParser)
}

/// Path part of the base URL, with leading and trailing slashes
fn base_path(base_url: &str) -> String {
    let path = match base_url.find("://") {
        Some(pos) => {
            let rest = &base_url[pos + 3..];
            rest.find('/').map_or("", |slash| &rest[slash..])
        }
        None => base_url,
    };

    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Input that already carries a scheme is left alone by the URL filters
fn is_absolute(url: &str) -> bool {
    url.contains("://") || url.starts_with("//")
}
