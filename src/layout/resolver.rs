use crate::builder::page::PageKind;

/// Template names to try for a page, most specific first.
///
/// Candidates that need a section are skipped when the section is empty,
/// and layout candidates only appear for an explicit, non-empty layout.
pub fn candidates(kind: PageKind, section: &str, layout: Option<&str>) -> Vec<String> {
    let layout = layout.filter(|layout| !layout.is_empty());
    let has_section = !section.is_empty();
    let mut names = Vec::new();

    let push_section = |names: &mut Vec<String>, file: &str| {
        if has_section {
            names.push(format!("{}/{}", section, file));
        }
    };

    match kind {
        PageKind::Single => {
            if let Some(layout) = layout {
                push_section(&mut names, &format!("{}.html", layout));
            }
            push_section(&mut names, "single.html");
            if let Some(layout) = layout {
                names.push(format!("_default/{}.html", layout));
            }
            names.push("_default/single.html".to_string());
        }
        PageKind::List => {
            push_section(&mut names, "list.html");
            names.push("_default/list.html".to_string());
        }
        PageKind::Home => {
            names.push("index.html".to_string());
            names.push("_default/list.html".to_string());
        }
        PageKind::Taxonomy => {
            push_section(&mut names, "taxonomy.html");
            names.push("_default/taxonomy.html".to_string());
            names.push("_default/list.html".to_string());
        }
        PageKind::TaxonomyList => {
            push_section(&mut names, "terms.html");
            names.push("_default/terms.html".to_string());
            names.push("_default/list.html".to_string());
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cascade() {
        assert_eq!(
            candidates(PageKind::Single, "blog", Some("wide")),
            vec!["blog/wide.html", "blog/single.html", "_default/wide.html", "_default/single.html"]
        );
        assert_eq!(
            candidates(PageKind::Single, "blog", None),
            vec!["blog/single.html", "_default/single.html"]
        );
        assert_eq!(
            candidates(PageKind::Single, "", Some("wide")),
            vec!["_default/wide.html", "_default/single.html"]
        );
        assert_eq!(candidates(PageKind::Single, "", Some("")), vec!["_default/single.html"]);
    }

    #[test]
    fn test_listing_cascades() {
        assert_eq!(
            candidates(PageKind::List, "blog", None),
            vec!["blog/list.html", "_default/list.html"]
        );
        assert_eq!(
            candidates(PageKind::Home, "", Some("ignored")),
            vec!["index.html", "_default/list.html"]
        );
        assert_eq!(
            candidates(PageKind::Taxonomy, "tags", None),
            vec!["tags/taxonomy.html", "_default/taxonomy.html", "_default/list.html"]
        );
        assert_eq!(
            candidates(PageKind::TaxonomyList, "tags", None),
            vec!["tags/terms.html", "_default/terms.html", "_default/list.html"]
        );
    }
}
