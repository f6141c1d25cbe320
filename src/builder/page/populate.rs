use thiserror::Error;

use crate::builder::page::model::{Cover, Page};
use crate::front_matter::{FrontValue, Metadata, ValueError};

/// Keys the populator turns into typed fields; everything else lands in params
const CONSUMED_KEYS: &[&str] = &[
    "title",
    "slug",
    "description",
    "summary",
    "date",
    "lastmod",
    "expirydate",
    "expiry_date",
    "draft",
    "layout",
    "weight",
    "tags",
    "categories",
    "series",
    "aliases",
    "cover",
    "author",
    "params",
];

#[derive(Debug, Error, PartialEq)]
pub enum PageError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' has the wrong type: {source}")]
    TypeMismatch {
        field: &'static str,
        #[source]
        source: ValueError,
    },
}

/// Project a parsed front matter map onto the typed fields of a page.
///
/// `title` is required. Dates, weight, draft and list fields fail with a
/// field-named error when present with the wrong shape. Cosmetic strings are
/// skipped when mistyped.
pub fn populate_page(page: &mut Page, metadata: &Metadata) -> Result<(), PageError> {
    page.title = match metadata.get("title").and_then(FrontValue::as_str) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => return Err(PageError::MissingField("title")),
    };

    if let Some(slug) = cosmetic(metadata, "slug") {
        page.slug = slug;
    }
    if let Some(description) = cosmetic(metadata, "description") {
        page.description = description;
    }
    if let Some(summary) = cosmetic(metadata, "summary") {
        page.summary = summary;
    }
    page.layout = cosmetic(metadata, "layout");
    page.author = cosmetic(metadata, "author");

    page.date = typed(metadata, "date", FrontValue::to_date)?;
    page.lastmod = typed(metadata, "lastmod", FrontValue::to_date)?;
    page.expiry_date = match typed(metadata, "expirydate", FrontValue::to_date)? {
        Some(date) => Some(date),
        None => typed(metadata, "expiry_date", FrontValue::to_date)?,
    };

    page.draft = typed(metadata, "draft", FrontValue::to_bool)?.unwrap_or(false);
    page.weight = typed(metadata, "weight", FrontValue::to_weight)?.unwrap_or(0);

    page.tags = typed(metadata, "tags", FrontValue::to_string_list)?.unwrap_or_default();
    page.categories = typed(metadata, "categories", FrontValue::to_string_list)?.unwrap_or_default();
    page.series = typed(metadata, "series", FrontValue::to_string_list)?.unwrap_or_default();
    page.aliases = typed(metadata, "aliases", FrontValue::to_string_list)?.unwrap_or_default();

    page.cover = metadata.get("cover").map(extract_cover).unwrap_or_default();
    page.params = extract_params(metadata);

    Ok(())
}

/// A typed field: absent or null is `None`, a wrong shape is an error
fn typed<T>(
    metadata: &Metadata,
    field: &'static str,
    convert: impl Fn(&FrontValue) -> Result<T, ValueError>,
) -> Result<Option<T>, PageError> {
    match metadata.get(field) {
        None | Some(FrontValue::Null) => Ok(None),
        Some(value) => convert(value)
            .map(Some)
            .map_err(|source| PageError::TypeMismatch { field, source }),
    }
}

/// A cosmetic string field, dropped unless it is a non-empty string
fn cosmetic(metadata: &Metadata, field: &str) -> Option<String> {
    metadata
        .get(field)
        .and_then(FrontValue::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn extract_cover(value: &FrontValue) -> Cover {
    match value {
        FrontValue::Map(map) => {
            let field = |name: &str| {
                map.get(name)
                    .and_then(FrontValue::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            Cover {
                image: field("image"),
                alt: field("alt"),
                caption: field("caption"),
            }
        }
        // Shorthand: `cover: path/to/image.png`
        FrontValue::String(image) => Cover {
            image: image.clone(),
            ..Cover::default()
        },
        _ => Cover::default(),
    }
}

fn extract_params(metadata: &Metadata) -> Metadata {
    let mut params: Metadata = metadata
        .iter()
        .filter(|(key, _)| !CONSUMED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    if let Some(explicit) = metadata.get("params").and_then(FrontValue::as_map) {
        for (key, value) in explicit {
            params.insert(key.clone(), value.clone());
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::page::model::{PageId, PageKind};
    use crate::front_matter::parse_front_matter_str;
    use chrono::{Datelike, TimeZone, Utc};

    fn populate(source: &str) -> Result<Page, PageError> {
        let parsed = parse_front_matter_str(source).unwrap();
        let mut page = Page::new(PageId(0), PageKind::Single);
        populate_page(&mut page, &parsed.metadata.unwrap_or_default())?;
        Ok(page)
    }

    #[test]
    fn test_title_is_required() {
        assert_eq!(
            populate("---\ndraft: true\n---\n").unwrap_err(),
            PageError::MissingField("title")
        );
        assert_eq!(
            populate("---\ntitle: \"\"\n---\n").unwrap_err(),
            PageError::MissingField("title")
        );
        assert_eq!(
            populate("---\ntitle: 42\n---\n").unwrap_err(),
            PageError::MissingField("title")
        );
    }

    #[test]
    fn test_typed_fields() {
        let page = populate(
            "---\ntitle: Post\ndate: 2024-02-03\nweight: 2.7\ndraft: true\ntags: [a, b]\naliases: [/old/]\n---\n",
        )
        .unwrap();

        assert_eq!(page.title, "Post");
        assert_eq!(page.date.unwrap().day(), 3);
        assert_eq!(page.weight, 2);
        assert!(page.draft);
        assert_eq!(page.tags, vec!["a", "b"]);
        assert_eq!(page.aliases, vec!["/old/"]);
        assert!(page.lastmod.is_none());
    }

    #[test]
    fn test_toml_datetime_is_accepted() {
        let page = populate("+++\ntitle = \"T\"\ndate = 2024-05-06T07:08:09Z\nexpirydate = \"2030-01-01\"\n+++\n").unwrap();
        assert_eq!(page.date, Some(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()));
        assert_eq!(page.expiry_date.unwrap().year(), 2030);
    }

    #[test]
    fn test_type_mismatch_names_field() {
        let err = populate("---\ntitle: T\ntags: [a, 3]\n---\n").unwrap_err();
        assert!(matches!(err, PageError::TypeMismatch { field: "tags", .. }));

        let err = populate("---\ntitle: T\ndraft: \"yes\"\n---\n").unwrap_err();
        assert!(matches!(err, PageError::TypeMismatch { field: "draft", .. }));

        let err = populate("---\ntitle: T\ndate: tomorrow\n---\n").unwrap_err();
        assert!(matches!(err, PageError::TypeMismatch { field: "date", .. }));
    }

    #[test]
    fn test_cosmetic_fields_are_tolerant() {
        let page = populate("---\ntitle: T\nslug: 12\ndescription: [x]\nlayout: wide\n---\n").unwrap();
        assert_eq!(page.slug, "");
        assert_eq!(page.description, "");
        assert_eq!(page.layout.as_deref(), Some("wide"));
    }

    #[test]
    fn test_cover_and_params() {
        let page = populate(
            "---\ntitle: T\ncover:\n  image: a.png\n  alt: An image\nmood: happy\nparams:\n  mood: calm\n  color: red\n---\n",
        )
        .unwrap();

        assert_eq!(page.cover.image, "a.png");
        assert_eq!(page.cover.alt, "An image");
        assert_eq!(page.cover.caption, "");
        assert_eq!(page.params.get("mood"), Some(&FrontValue::from("calm")));
        assert_eq!(page.params.get("color"), Some(&FrontValue::from("red")));
        assert!(!page.params.contains_key("title"));
        assert!(!page.params.contains_key("params"));
    }
}
