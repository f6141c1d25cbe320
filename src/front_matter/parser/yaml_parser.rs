use serde_yaml::Value as YamlValue;

use crate::front_matter::parser::FrontMatterError;
use crate::front_matter::types::{FrontValue, Metadata};

/// Parse a YAML front matter block into a metadata map
pub fn parse_yaml(block: &str) -> Result<Metadata, FrontMatterError> {
    let yaml: YamlValue = serde_yaml::from_str(block)?;

    match yaml_to_front(yaml) {
        FrontValue::Map(map) => Ok(map),
        FrontValue::Null => Ok(Metadata::new()),
        other => Err(FrontMatterError::NotAMapping(other.type_name())),
    }
}

/// Convert YAML value to a front matter value
pub fn yaml_to_front(yaml: YamlValue) -> FrontValue {
    match yaml {
        YamlValue::Null => FrontValue::Null,
        YamlValue::Bool(b) => FrontValue::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FrontValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FrontValue::Float(f)
            } else {
                // Default to string
                FrontValue::String(n.to_string())
            }
        }
        YamlValue::String(s) => FrontValue::String(s),
        YamlValue::Sequence(seq) => FrontValue::List(seq.into_iter().map(yaml_to_front).collect()),
        YamlValue::Mapping(map) => {
            let mut out = Metadata::new();
            for (k, v) in map {
                out.insert(yaml_key(k), yaml_to_front(v));
            }
            FrontValue::Map(out)
        }
        YamlValue::Tagged(tagged) => yaml_to_front(tagged.value),
    }
}

/// Keys are usually strings, but YAML allows any scalar
fn yaml_key(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Null => "null".to_string(),
        other => format!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_and_heterogeneous_values() {
        let map = parse_yaml("cover:\n  image: a.png\nmixed: [1, two, 3.5, true]\ncount: 7").unwrap();

        assert_eq!(map["cover"].as_map().unwrap()["image"].as_str(), Some("a.png"));
        assert_eq!(
            map["mixed"],
            FrontValue::List(vec![
                FrontValue::Integer(1),
                FrontValue::from("two"),
                FrontValue::Float(3.5),
                FrontValue::Bool(true),
            ])
        );
        assert_eq!(map["count"], FrontValue::Integer(7));
    }

    #[test]
    fn test_yaml_dates_stay_strings() {
        let map = parse_yaml("date: 2024-01-15").unwrap();
        assert_eq!(map["date"].as_str(), Some("2024-01-15"));
        assert!(map["date"].to_date().is_ok());
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(parse_yaml("title: [unclosed"), Err(FrontMatterError::Yaml(_))));
    }
}
