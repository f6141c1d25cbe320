pub mod engine;
pub mod renderer;
pub mod toc;
pub mod utils;

use thiserror::Error;

pub use renderer::ComrakRenderer;
pub use utils::{count_words, extract_summary, reading_time, strip_html};

#[derive(Debug, Error)]
pub enum MarkdownError {
    #[error("Markdown rendering failed: {0}")]
    Render(String),
}

/// Converts Markdown to HTML.
///
/// Implementations must give headings stable ids derived from their text
/// and return the same output for the same input every time. The renderer
/// is shared by every worker of the render phase.
pub trait MarkdownRenderer: Send + Sync {
    /// Render a document, returning the HTML body and its table of contents
    fn render_with_toc(&self, markdown: &str) -> Result<(String, String), MarkdownError>;
}
