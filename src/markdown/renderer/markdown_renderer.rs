use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::markdown::engine::{create_comrak_options, render_markdown};
use crate::markdown::toc::{generate_toc, Heading};
use crate::markdown::utils::strip_html;
use crate::markdown::{MarkdownError, MarkdownRenderer};

lazy_static! {
    static ref HEADING_REGEX: Regex = Regex::new(r"(?s)<h([1-6])>(.*?)</h[1-6]>").unwrap();
}

/// Default renderer: comrak with GFM extensions, slug ids on every heading
#[derive(Debug, Clone)]
pub struct ComrakRenderer {
    unsafe_html: bool,
}

impl ComrakRenderer {
    pub fn new() -> Self {
        ComrakRenderer { unsafe_html: true }
    }

    /// Escape raw HTML in the source instead of passing it through
    pub fn escape_html(mut self) -> Self {
        self.unsafe_html = false;
        self
    }
}

impl Default for ComrakRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for ComrakRenderer {
    fn render_with_toc(&self, markdown: &str) -> Result<(String, String), MarkdownError> {
        let options = create_comrak_options(self.unsafe_html);
        let html = render_markdown(markdown, &options);
        let (html, headings) = assign_heading_ids(&html);
        Ok((html, generate_toc(&headings)))
    }
}

/// Give every bare `<hN>` an id slugged from its text.
///
/// Repeated slugs get `-1`, `-2`, ... appended in document order.
fn assign_heading_ids(html: &str) -> (String, Vec<Heading>) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headings = Vec::new();

    let rewritten = HEADING_REGEX.replace_all(html, |caps: &Captures| {
        let level: usize = caps[1].parse().unwrap_or(1);
        let inner = &caps[2];
        let text = strip_html(inner);

        let mut base = slug::slugify(&text);
        if base.is_empty() {
            base = "section".to_string();
        }
        let id = match seen.get_mut(&base) {
            Some(count) => {
                *count += 1;
                format!("{}-{}", base, count)
            }
            None => {
                seen.insert(base.clone(), 0);
                base
            }
        };

        headings.push(Heading {
            level,
            id: id.clone(),
            text: html_escape::encode_text(&text).into_owned(),
        });

        format!("<h{level} id=\"{id}\">{inner}</h{level}>")
    });

    (rewritten.into_owned(), headings)
}
