use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// Front matter as a generic key/value map
pub type Metadata = BTreeMap<String, FrontValue>;

/// A front matter value, independent of the notation it was written in.
///
/// YAML and TOML headers are both converted into this type so the page
/// populator only has one shape to reason about.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// A native timestamp (TOML datetimes)
    Datetime(DateTime<Utc>),
    List(Vec<FrontValue>),
    Map(Metadata),
}

/// A value had a different shape than the accessor required
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}")]
pub struct ValueError {
    pub expected: &'static str,
    pub found: &'static str,
}

/// String formats accepted for dates, tried in order
const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a date string against the fixed list of supported formats.
///
/// The first format that matches wins: date-only, then RFC 3339, then the
/// two naive timestamp variants. Naive values are taken as UTC.
pub fn parse_date_str(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_ONLY_FORMAT) {
        return date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|dt| Utc.from_utc_datetime(&dt))
}

impl FrontValue {
    /// Human-readable name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FrontValue::Null => "null",
            FrontValue::Bool(_) => "boolean",
            FrontValue::Integer(_) => "integer",
            FrontValue::Float(_) => "float",
            FrontValue::String(_) => "string",
            FrontValue::Datetime(_) => "datetime",
            FrontValue::List(_) => "list",
            FrontValue::Map(_) => "map",
        }
    }

    fn mismatch(&self, expected: &'static str) -> ValueError {
        ValueError {
            expected,
            found: self.type_name(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Metadata> {
        match self {
            FrontValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn to_bool(&self) -> Result<bool, ValueError> {
        match self {
            FrontValue::Bool(b) => Ok(*b),
            _ => Err(self.mismatch("boolean")),
        }
    }

    /// Interpret as a date: native timestamp or one of the supported strings
    pub fn to_date(&self) -> Result<DateTime<Utc>, ValueError> {
        match self {
            FrontValue::Datetime(dt) => Ok(*dt),
            FrontValue::String(s) => parse_date_str(s).ok_or(ValueError {
                expected: "date",
                found: "unrecognized date string",
            }),
            _ => Err(self.mismatch("date")),
        }
    }

    /// Interpret as a weight; floats truncate toward zero
    pub fn to_weight(&self) -> Result<i64, ValueError> {
        match self {
            FrontValue::Integer(i) => Ok(*i),
            FrontValue::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
            _ => Err(self.mismatch("number")),
        }
    }

    /// Interpret as a list of strings.
    ///
    /// Every element must be a string; a single bad element fails the
    /// whole list.
    pub fn to_string_list(&self) -> Result<Vec<String>, ValueError> {
        match self {
            FrontValue::List(items) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or(ValueError {
                        expected: "list of strings",
                        found: item.type_name(),
                    })
                })
                .collect(),
            _ => Err(self.mismatch("list of strings")),
        }
    }
}

impl From<&str> for FrontValue {
    fn from(value: &str) -> Self {
        FrontValue::String(value.to_string())
    }
}

impl From<String> for FrontValue {
    fn from(value: String) -> Self {
        FrontValue::String(value)
    }
}
