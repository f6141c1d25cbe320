/// A heading found in rendered HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: usize,
    pub id: String,
    /// Already HTML-escaped
    pub text: String,
}

/// Build a nested `<ul class="toc">` from headings in document order.
///
/// The shallowest heading level becomes the top of the list. Jumps of more
/// than one level are flattened to a single step so the markup stays
/// balanced.
pub fn generate_toc(headings: &[Heading]) -> String {
    let Some(base) = headings.iter().map(|h| h.level).min() else {
        return String::new();
    };

    let mut toc = String::from("<ul class=\"toc\">");
    let mut depth = 1;
    let mut first = true;

    for heading in headings {
        let target = (heading.level - base + 1).min(depth + 1);

        if first {
            first = false;
        } else if target > depth {
            toc.push_str("<ul>");
            depth = target;
        } else {
            toc.push_str("</li>");
            while depth > target {
                toc.push_str("</ul></li>");
                depth -= 1;
            }
        }

        toc.push_str(&format!("<li><a href=\"#{}\">{}</a>", heading.id, heading.text));
    }

    toc.push_str("</li>");
    while depth > 1 {
        toc.push_str("</ul></li>");
        depth -= 1;
    }
    toc.push_str("</ul>");

    toc
}
