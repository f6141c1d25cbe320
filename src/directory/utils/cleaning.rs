use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};

/// Empty a directory, creating it if needed.
///
/// The directory itself is kept so a mount point or an open shell inside
/// it survives. A plain file at `dir` is replaced by a directory.
pub fn clean_dir(dir: &Path) -> io::Result<()> {
    if dir.is_file() {
        warn!("Replacing file {} with an output directory", dir.display());
        fs::remove_file(dir)?;
    }

    if dir.is_dir() {
        debug!("Cleaning directory: {}", dir.display());
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
    }

    fs::create_dir_all(dir)
}
