use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::builder::page::PageError;
use crate::config::ConfigError;
use crate::front_matter::FrontMatterError;
use crate::layout::TemplateError;
use crate::markdown::MarkdownError;

/// Top-level error for a site build.
///
/// Every variant that can be traced back to a single file carries its path,
/// so the message printed by the CLI is enough to find the culprit.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Front matter error in {}: {source}", path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("Invalid page {}: {source}", path.display())]
    Page {
        path: PathBuf,
        #[source]
        source: PageError,
    },

    #[error("Markdown error in {}: {source}", path.display())]
    Markdown {
        path: PathBuf,
        #[source]
        source: MarkdownError,
    },

    #[error("Template error for {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Artifact generator '{name}' failed: {message}")]
    Artifact { name: String, message: String },
}

impl BuildError {
    /// The file this error is attributed to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            BuildError::Io { path, .. }
            | BuildError::FrontMatter { path, .. }
            | BuildError::Page { path, .. }
            | BuildError::Markdown { path, .. }
            | BuildError::Template { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Attach a path to an IO result.
pub trait BuildResultExt<T> {
    fn at_path(self, path: &Path) -> Result<T, BuildError>;
}

impl<T> BuildResultExt<T> for io::Result<T> {
    fn at_path(self, path: &Path) -> Result<T, BuildError> {
        self.map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.at_path(Path::new("content/post.md")).unwrap_err();

        assert_eq!(err.path(), Some(Path::new("content/post.md")));
        assert!(err.to_string().contains("content/post.md"));
        assert!(err.to_string().contains("gone"));
    }
}
