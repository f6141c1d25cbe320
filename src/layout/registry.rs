use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::layout::TemplateError;
use crate::utils::path::{has_extension, to_slash};

/// Register every `.html` file under `dir` by its slash-separated path
/// relative to `dir`.
///
/// Entries already present under the same name are replaced. A missing
/// directory registers nothing. Returns the number of files loaded.
pub fn load_templates(dir: &Path, registry: &mut BTreeMap<String, String>) -> Result<usize, TemplateError> {
    if !dir.is_dir() {
        debug!("No templates at {}", dir.display());
        return Ok(0);
    }

    let mut loaded = 0;
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            TemplateError::Io {
                path,
                source: err.into(),
            }
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || !has_extension(path, "html") {
            continue;
        }

        let name = to_slash(path.strip_prefix(dir).unwrap_or(path));
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if registry.insert(name.clone(), source).is_some() {
            debug!("Template {} overridden by {}", name, path.display());
        }
        loaded += 1;
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_user_layouts_replace_theme() {
        let theme = TempDir::new().unwrap();
        write(theme.path(), "_default/single.html", "theme single");
        write(theme.path(), "_default/list.html", "theme list");
        write(theme.path(), "notes.txt", "ignored");

        let user = TempDir::new().unwrap();
        write(user.path(), "_default/single.html", "user single");
        write(user.path(), "partials/nav.html", "nav");

        let mut registry = BTreeMap::new();
        assert_eq!(load_templates(theme.path(), &mut registry).unwrap(), 2);
        assert_eq!(load_templates(user.path(), &mut registry).unwrap(), 2);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry["_default/single.html"], "user single");
        assert_eq!(registry["_default/list.html"], "theme list");
        assert!(registry.contains_key("partials/nav.html"));
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let mut registry = BTreeMap::new();
        let count = load_templates(Path::new("/definitely/not/here"), &mut registry).unwrap();
        assert_eq!(count, 0);
        assert!(registry.is_empty());
    }
}
