mod utils;
mod writer;

use std::io;
use std::path::Path;

pub use utils::{clean_dir, copy_dir, copy_file, output_path_for_url, CopyStats};
pub use writer::FsWriter;

/// Destination for everything a build produces.
///
/// Shared by the build's single writer step; implementations only need to
/// be thread-safe so they can live next to the rest of the build state.
pub trait OutputWriter: Send + Sync {
    /// Write a rendered page or artifact addressed by its site URL.
    ///
    /// URLs ending in `/` become `{url}/index.html`; a URL whose last
    /// segment has an extension is written as-is. Returns bytes written.
    fn write_file(&self, output_dir: &Path, url: &str, bytes: &[u8]) -> io::Result<u64>;

    /// Copy one file, creating parent directories. Returns bytes copied.
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Copy a directory tree. A missing source copies nothing.
    fn copy_dir(&self, from: &Path, to: &Path) -> io::Result<CopyStats>;

    /// Leave `dir` existing and empty, whatever was there before
    fn clean_dir(&self, dir: &Path) -> io::Result<()>;
}
