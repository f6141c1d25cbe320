use crate::front_matter::parser::FrontMatterError;
use crate::front_matter::types::{parse_date_str, FrontValue, Metadata};

/// Parse a TOML front matter block into a metadata map
pub fn parse_toml(block: &str) -> Result<Metadata, FrontMatterError> {
    let table: toml::Table = toml::from_str(block)?;
    Ok(table_to_metadata(table))
}

fn table_to_metadata(table: toml::Table) -> Metadata {
    table
        .into_iter()
        .map(|(key, value)| (key, toml_to_front(value)))
        .collect()
}

/// Convert TOML value to a front matter value
pub fn toml_to_front(value: toml::Value) -> FrontValue {
    match value {
        toml::Value::String(s) => FrontValue::String(s),
        toml::Value::Integer(i) => FrontValue::Integer(i),
        toml::Value::Float(f) => FrontValue::Float(f),
        toml::Value::Boolean(b) => FrontValue::Bool(b),
        toml::Value::Datetime(dt) => {
            // Local times have no date part and stay textual
            let text = dt.to_string();
            match parse_date_str(&text) {
                Some(parsed) => FrontValue::Datetime(parsed),
                None => FrontValue::String(text),
            }
        }
        toml::Value::Array(items) => FrontValue::List(items.into_iter().map(toml_to_front).collect()),
        toml::Value::Table(table) => FrontValue::Map(table_to_metadata(table)),
    }
}
