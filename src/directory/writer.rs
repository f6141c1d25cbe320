use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use crate::directory::utils::{clean_dir, copy_dir, copy_file, output_path_for_url, CopyStats};
use crate::directory::OutputWriter;

/// Writes straight to the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

impl OutputWriter for FsWriter {
    fn write_file(&self, output_dir: &Path, url: &str, bytes: &[u8]) -> io::Result<u64> {
        let path = output_path_for_url(output_dir, url);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(bytes.len() as u64)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<u64> {
        copy_file(from, to)
    }

    fn copy_dir(&self, from: &Path, to: &Path) -> io::Result<CopyStats> {
        copy_dir(from, to)
    }

    fn clean_dir(&self, dir: &Path) -> io::Result<()> {
        clean_dir(dir)
    }
}
