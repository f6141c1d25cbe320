use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

/// Files and bytes moved by a directory copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub bytes: u64,
}

/// Map a site URL onto a file under `output_dir`
pub fn output_path_for_url(output_dir: &Path, url: &str) -> PathBuf {
    let mut path = output_dir.to_path_buf();
    for segment in url.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            continue;
        }
        path.push(segment);
    }

    let names_a_file = !url.ends_with('/')
        && Path::new(url).extension().is_some()
        && path != output_dir;

    if !names_a_file {
        path.push("index.html");
    }
    path
}

/// Copy a file, creating parent directories. Returns bytes copied.
pub fn copy_file(from: &Path, to: &Path) -> io::Result<u64> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to)
}

/// Copy every file under `from` to the same relative place under `to`
pub fn copy_dir(from: &Path, to: &Path) -> io::Result<CopyStats> {
    let mut stats = CopyStats::default();
    if !from.is_dir() {
        return Ok(stats);
    }

    for entry in WalkDir::new(from).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(from).unwrap_or(entry.path());
        if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
            continue;
        }

        stats.bytes += copy_file(entry.path(), &to.join(relative))?;
        stats.files += 1;
    }

    debug!(
        "Copied {} files ({} bytes) from {} to {}",
        stats.files,
        stats.bytes,
        from.display(),
        to.display()
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_for_url() {
        let out = Path::new("/site/public");
        assert_eq!(output_path_for_url(out, "/"), out.join("index.html"));
        assert_eq!(output_path_for_url(out, "/blog/"), out.join("blog/index.html"));
        assert_eq!(output_path_for_url(out, "/blog/v1.2-notes/"), out.join("blog/v1.2-notes/index.html"));
        assert_eq!(output_path_for_url(out, "/feed.xml"), out.join("feed.xml"));
        assert_eq!(output_path_for_url(out, "404.html"), out.join("404.html"));
        assert_eq!(output_path_for_url(out, "/about"), out.join("about/index.html"));
        assert_eq!(output_path_for_url(out, "/../../etc/"), out.join("etc/index.html"));
    }

    #[test]
    fn test_copy_dir() {
        let src = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("css")).unwrap();
        fs::write(src.path().join("css/site.css"), "body{}").unwrap();
        fs::write(src.path().join("robots.txt"), "ok").unwrap();

        let dst = TempDir::new().unwrap();
        let stats = copy_dir(src.path(), dst.path()).unwrap();

        assert_eq!(stats, CopyStats { files: 2, bytes: 8 });
        assert_eq!(fs::read_to_string(dst.path().join("css/site.css")).unwrap(), "body{}");
    }

    #[test]
    fn test_copy_dir_missing_source() {
        let dst = TempDir::new().unwrap();
        let stats = copy_dir(&dst.path().join("nope"), dst.path()).unwrap();
        assert_eq!(stats, CopyStats::default());
    }
}
