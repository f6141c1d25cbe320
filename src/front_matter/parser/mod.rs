pub mod toml_parser;
pub mod yaml_parser;

use log::debug;
use thiserror::Error;

use crate::front_matter::types::Metadata;

/// Errors raised while splitting and parsing a front matter header
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("content is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("missing closing '{0}' delimiter")]
    MissingDelimiter(&'static str),

    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front matter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("front matter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Notation used by a front matter block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterFormat {
    Yaml,
    Toml,
}

impl FrontMatterFormat {
    pub fn delimiter(self) -> &'static str {
        match self {
            FrontMatterFormat::Yaml => "---",
            FrontMatterFormat::Toml => "+++",
        }
    }

    fn from_line(line: &str) -> Option<Self> {
        match line.trim_end() {
            "---" => Some(FrontMatterFormat::Yaml),
            "+++" => Some(FrontMatterFormat::Toml),
            _ => None,
        }
    }
}

/// A content file split into its header and body
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedContent<'a> {
    /// `None` when the file has no header at all
    pub metadata: Option<Metadata>,
    pub format: Option<FrontMatterFormat>,
    pub body: &'a str,
}

/// Split and parse the front matter of a content file.
///
/// Leading blank lines are skipped when looking for the opening delimiter.
/// Without one, the whole input is the body. The body starts right after
/// the closing delimiter line and is returned untouched.
pub fn parse_front_matter(input: &[u8]) -> Result<ParsedContent<'_>, FrontMatterError> {
    let text = std::str::from_utf8(input)?;
    parse_front_matter_str(text)
}

/// Same as [`parse_front_matter`] for input already known to be UTF-8
pub fn parse_front_matter_str(text: &str) -> Result<ParsedContent<'_>, FrontMatterError> {
    let mut offset = 0;
    let mut opener = None;

    for line in text.split_inclusive('\n') {
        let line_end = offset + line.len();
        if line.trim().is_empty() {
            offset = line_end;
            continue;
        }
        opener = FrontMatterFormat::from_line(line).map(|format| (format, line_end));
        break;
    }

    let Some((format, block_start)) = opener else {
        return Ok(ParsedContent {
            metadata: None,
            format: None,
            body: text,
        });
    };

    let delimiter = format.delimiter();
    let mut offset = block_start;
    let mut closer = None;
    for line in text[block_start..].split_inclusive('\n') {
        let line_end = offset + line.len();
        if line.trim_end() == delimiter {
            closer = Some((offset, line_end));
            break;
        }
        offset = line_end;
    }

    let (block_end, body_start) = closer.ok_or(FrontMatterError::MissingDelimiter(delimiter))?;
    let block = strip_trailing_newline(&text[block_start..block_end]);
    debug!("Found {:?} front matter block of {} bytes", format, block.len());

    let metadata = if block.trim().is_empty() {
        Metadata::new()
    } else {
        match format {
            FrontMatterFormat::Yaml => yaml_parser::parse_yaml(block)?,
            FrontMatterFormat::Toml => toml_parser::parse_toml(block)?,
        }
    };

    Ok(ParsedContent {
        metadata: Some(metadata),
        format: Some(format),
        body: &text[body_start..],
    })
}

fn strip_trailing_newline(block: &str) -> &str {
    block
        .strip_suffix("\r\n")
        .or_else(|| block.strip_suffix('\n'))
        .unwrap_or(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::front_matter::FrontValue;

    #[test]
    fn test_no_front_matter() {
        let input = "# Just a heading\n\nSome text.\n";
        let parsed = parse_front_matter(input.as_bytes()).unwrap();

        assert!(parsed.metadata.is_none());
        assert_eq!(parsed.format, None);
        assert_eq!(parsed.body, input);
    }

    #[test]
    fn test_yaml_front_matter() {
        let input = "---\ntitle: \"X\"\ntags: [a, b]\n---\nBody\n";
        let parsed = parse_front_matter(input.as_bytes()).unwrap();
        let metadata = parsed.metadata.unwrap();

        assert_eq!(metadata["title"], FrontValue::from("X"));
        assert_eq!(metadata["tags"].to_string_list().unwrap().len(), 2);
        assert_eq!(parsed.body, "Body\n");
        assert_eq!(parsed.format, Some(FrontMatterFormat::Yaml));
    }

    #[test]
    fn test_toml_front_matter() {
        let input = "+++\ntitle = \"Hello\"\nweight = 3\ndate = 2024-01-15T10:00:00Z\n+++\n\nText";
        let parsed = parse_front_matter(input.as_bytes()).unwrap();
        let metadata = parsed.metadata.unwrap();

        assert_eq!(metadata["title"].as_str(), Some("Hello"));
        assert_eq!(metadata["weight"], FrontValue::Integer(3));
        assert!(matches!(metadata["date"], FrontValue::Datetime(_)));
        assert_eq!(parsed.body, "\nText");
    }

    #[test]
    fn test_leading_blank_lines_are_skipped() {
        let input = "\n  \n---\ntitle: Late\n---\nBody";
        let parsed = parse_front_matter(input.as_bytes()).unwrap();

        assert_eq!(parsed.metadata.unwrap()["title"].as_str(), Some("Late"));
        assert_eq!(parsed.body, "Body");
    }

    #[test]
    fn test_missing_closer_names_delimiter() {
        let err = parse_front_matter(b"+++\ntitle = \"x\"\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::MissingDelimiter("+++")));
        assert!(err.to_string().contains("+++"));

        let err = parse_front_matter(b"---\ntitle: x\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::MissingDelimiter("---")));
    }

    #[test]
    fn test_whitespace_block_is_empty_map() {
        let parsed = parse_front_matter(b"---\n   \n---\nBody").unwrap();
        assert_eq!(parsed.metadata, Some(Metadata::new()));
        assert_eq!(parsed.body, "Body");

        let parsed = parse_front_matter(b"---\n---\n").unwrap();
        assert_eq!(parsed.metadata, Some(Metadata::new()));
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_body_round_trips_byte_for_byte() {
        let bodies = ["", "x", "line\n", "\n\n  indented\r\nwindows\r\n", "--- not a closer\n"];
        for body in bodies {
            for header in ["---\ntitle: T\n---\n", "+++\ntitle = \"T\"\n+++\n", "---\r\ntitle: T\r\n---\r\n"] {
                let input = format!("{}{}", header, body);
                let parsed = parse_front_matter(input.as_bytes()).unwrap();
                assert_eq!(parsed.body, body, "header {:?}", header);
            }
        }
    }

    #[test]
    fn test_non_mapping_yaml_fails() {
        let err = parse_front_matter(b"---\n- a\n- b\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping("list")));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = parse_front_matter(&[0x2d, 0x2d, 0x2d, 0x0a, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, FrontMatterError::InvalidUtf8(_)));
    }
}
