use liquid::model::Value as LiquidValue;
use serde_yaml::Value as YamlValue;

use crate::front_matter::{FrontValue, Metadata};
use crate::liquid::format_date;

/// Convert a front matter value for templates; datetimes become RFC 3339
pub fn front_to_liquid(value: &FrontValue) -> LiquidValue {
    match value {
        FrontValue::Null => LiquidValue::Nil,
        FrontValue::Bool(b) => LiquidValue::scalar(*b),
        FrontValue::Integer(i) => LiquidValue::scalar(*i),
        FrontValue::Float(f) => LiquidValue::scalar(*f),
        FrontValue::String(s) => LiquidValue::scalar(s.clone()),
        FrontValue::Datetime(dt) => LiquidValue::scalar(format_date(dt)),
        FrontValue::List(items) => LiquidValue::Array(items.iter().map(front_to_liquid).collect()),
        FrontValue::Map(map) => LiquidValue::Object(metadata_to_liquid(map)),
    }
}

pub fn metadata_to_liquid(map: &Metadata) -> liquid::Object {
    map.iter()
        .map(|(key, value)| (key.clone().into(), front_to_liquid(value)))
        .collect()
}

/// Convert a YAML value (site params) for templates
pub fn yaml_to_liquid(yaml: &YamlValue) -> LiquidValue {
    match yaml {
        YamlValue::Null => LiquidValue::Nil,
        YamlValue::Bool(b) => LiquidValue::scalar(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                LiquidValue::scalar(i)
            } else if let Some(f) = n.as_f64() {
                LiquidValue::scalar(f)
            } else {
                LiquidValue::scalar(n.to_string())
            }
        }
        YamlValue::String(s) => LiquidValue::scalar(s.clone()),
        YamlValue::Sequence(seq) => LiquidValue::Array(seq.iter().map(yaml_to_liquid).collect()),
        YamlValue::Mapping(map) => {
            let mut obj = liquid::Object::new();
            for (k, v) in map {
                let key = match k {
                    YamlValue::String(key) => key.clone(),
                    other => serde_yaml::to_string(other)
                        .map(|s| s.trim().to_string())
                        .unwrap_or_default(),
                };
                obj.insert(key.into(), yaml_to_liquid(v));
            }
            LiquidValue::Object(obj)
        }
        YamlValue::Tagged(tagged) => yaml_to_liquid(&tagged.value),
    }
}
