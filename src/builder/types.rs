use std::path::PathBuf;
use std::time::Duration;

/// Options for one build, usually filled from the command line
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub include_drafts: bool,
    pub include_future: bool,
    pub include_expired: bool,
    /// Overrides the configured output directory
    pub output_dir: Option<PathBuf>,
    /// Overrides the configured base URL
    pub base_url: Option<String>,
    pub project_root: PathBuf,
    pub verbose: bool,
    /// Advisory; passed through for output collaborators
    pub minify: bool,
}

/// What a finished build produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildResult {
    /// Rendered outputs, counting every pager and the 404 page
    pub pages_rendered: usize,
    pub files_written: usize,
    pub files_copied: usize,
    pub duration: Duration,
    /// Bytes written plus bytes copied
    pub output_size: u64,
    /// URLs of rendered outputs, sorted
    pub urls: Vec<String>,
}
