use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::builder::page::model::{Page, PageId, PageKind};
use crate::builder::page::populate::populate_page;
use crate::builder::page::utils::{slugify, strip_date_prefix};
use crate::front_matter::parse_front_matter;
use crate::markdown::{count_words, reading_time};
use crate::utils::path::{first_segment, get_stem, has_extension};
use crate::utils::{BuildError, BuildResultExt};

const BUNDLE_INDEX: &str = "index.md";
const LIST_INDEX: &str = "_index.md";

/// Walk the content tree and build one page per Markdown file.
///
/// The first pass finds bundles: directories below the root holding an
/// `index.md`. Their other files become page assets, except stray Markdown files which are
/// dropped with a warning. The second pass classifies and loads every
/// remaining Markdown file. Any read or parse failure aborts discovery.
pub fn discover_content(content_dir: &Path, base_url: &str) -> Result<Vec<Page>, BuildError> {
    debug!("Discovering content in {}", content_dir.display());
    let files = walk_files(content_dir)?;

    // Pass 1: bundle directories and their assets
    let mut bundles: BTreeMap<PathBuf, Vec<PathBuf>> = files
        .iter()
        .filter(|path| is_named(path, BUNDLE_INDEX))
        .filter_map(|path| path.parent())
        .filter(|dir| *dir != content_dir)
        .map(|dir| (dir.to_path_buf(), Vec::new()))
        .collect();

    for path in &files {
        if has_extension(path, "md") {
            continue;
        }
        if let Some(assets) = path.parent().and_then(|dir| bundles.get_mut(dir)) {
            assets.push(path.clone());
        }
    }

    // Pass 2: classify every Markdown file
    let mut pages = Vec::new();
    for path in &files {
        if !has_extension(path, "md") {
            continue;
        }

        let parent = path.parent().unwrap_or(content_dir);
        let bundle_assets = bundles.get(parent);

        if bundle_assets.is_some() && !is_named(path, BUNDLE_INDEX) {
            warn!(
                "Ignoring {}: Markdown files inside a page bundle are not rendered",
                path.display()
            );
            continue;
        }

        let id = PageId(pages.len());
        let mut page = load_page(id, path, content_dir, base_url)?;
        if let Some(assets) = bundle_assets {
            page.is_bundle = true;
            page.bundle_dir = Some(parent.to_path_buf());
            page.bundle_files = assets.clone();
        }

        debug!("Discovered {} page {} from {}", page.kind.as_str(), page.url, path.display());
        pages.push(page);
    }

    warn_duplicate_urls(&pages);
    info!("Discovered {} pages", pages.len());

    Ok(pages)
}

/// Every regular file under the content root, sorted by path
fn walk_files(content_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let walker = WalkDir::new(content_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| content_dir.to_path_buf());
            BuildError::Io {
                path,
                source: err.into(),
            }
        })?;

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// File name comparison ignoring ASCII case, matching `has_extension`
fn is_named(path: &Path, expected: &str) -> bool {
    file_name(path).eq_ignore_ascii_case(expected)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read, parse and populate one content file
fn load_page(id: PageId, path: &Path, content_dir: &Path, base_url: &str) -> Result<Page, BuildError> {
    let bytes = fs::read(path).at_path(path)?;
    let parsed = parse_front_matter(&bytes).map_err(|source| BuildError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;

    let relative = path.strip_prefix(content_dir).unwrap_or(path);
    let relative_dir = relative.parent().unwrap_or_else(|| Path::new(""));
    let is_bundle_index = is_named(path, BUNDLE_INDEX);

    let kind = if is_named(path, LIST_INDEX) {
        if relative_dir.as_os_str().is_empty() {
            PageKind::Home
        } else {
            PageKind::List
        }
    } else {
        PageKind::Single
    };

    let mut page = Page::new(id, kind);
    populate_page(&mut page, &parsed.metadata.unwrap_or_default()).map_err(|source| {
        BuildError::Page {
            path: path.to_path_buf(),
            source,
        }
    })?;

    // A bundle page sits where its directory sits
    let page_path = if is_bundle_index {
        relative_dir
    } else {
        relative
    };

    page.section = match kind {
        PageKind::Home => String::new(),
        PageKind::List => first_segment(relative_dir),
        _ => first_segment(page_path.parent().unwrap_or_else(|| Path::new(""))),
    };

    page.slug = match kind {
        PageKind::Home => String::new(),
        PageKind::List => page.section.clone(),
        _ if !page.slug.is_empty() => page.slug.clone(),
        _ => {
            let stem = if is_bundle_index {
                file_name(page_path)
            } else {
                get_stem(page_path).unwrap_or_default()
            };
            slugify(strip_date_prefix(&stem))
        }
    };

    page.assign_url(base_url);
    page.source_path = Some(path.to_path_buf());
    page.source_dir = path.parent().map(Path::to_path_buf);
    page.raw_content = parsed.body.to_string();
    page.word_count = count_words(&page.raw_content);
    page.reading_time = reading_time(page.word_count);

    Ok(page)
}

fn warn_duplicate_urls(pages: &[Page]) {
    let mut seen: HashMap<&str, &Page> = HashMap::new();
    for page in pages {
        if let Some(first) = seen.insert(page.url.as_str(), page) {
            warn!(
                "{} and {} both map to {}; the later one wins",
                first.origin().display(),
                page.origin().display(),
                page.url
            );
        }
    }
}
