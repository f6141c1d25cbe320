mod engine;
mod registry;
mod resolver;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use engine::Engine;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Failed to render template {name}: {message}")]
    Render { name: String, message: String },

    #[error("Failed to parse template {name}: {message}")]
    Parse { name: String, message: String },

    #[error("Failed to read template {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
