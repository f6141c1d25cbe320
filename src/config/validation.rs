use std::env;
use std::path::{Component, Path, PathBuf};

use log::{info, warn};

use crate::config::loader::ConfigError;
use crate::config::types::Config;

/// Validate the configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_content_directory(config)?;
    validate_output_directory(config)?;
    validate_layouts_directory(config);

    if config.paginate <= 0 {
        warn!("paginate = {} is not positive; listings will use 10 items per page", config.paginate);
    }

    Ok(())
}

/// Validate the content directory
fn validate_content_directory(config: &Config) -> Result<(), ConfigError> {
    let content = config.content_path();

    if !content.is_dir() {
        return Err(ConfigError::Validation(format!(
            "Content directory does not exist: {}",
            content.display()
        )));
    }

    info!("Content directory: {}", content.display());
    Ok(())
}

/// Validate the output directory; it is wiped on every build.
///
/// It must not be the project root or one of its ancestors, and must not
/// overlap the content, layouts, static or theme layouts directories.
fn validate_output_directory(config: &Config) -> Result<(), ConfigError> {
    let output = config.output_path();
    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "Output directory must not be empty".to_string(),
        ));
    }

    let resolved_output = resolve_path(&output);
    if resolve_path(&config.project_root).starts_with(&resolved_output) {
        return Err(ConfigError::Validation(format!(
            "Output directory must not be the project root or contain it: {}",
            output.display()
        )));
    }

    let mut protected = vec![
        ("content", config.content_path()),
        ("layouts", config.layouts_path()),
        ("static", config.static_path()),
    ];
    if let Some(theme_layouts) = config.theme_layouts_path() {
        protected.push(("theme layouts", theme_layouts));
    }

    for (label, dir) in protected {
        let resolved = resolve_path(&dir);
        if resolved.starts_with(&resolved_output) || resolved_output.starts_with(&resolved) {
            return Err(ConfigError::Validation(format!(
                "Output directory {} overlaps the {} directory {}",
                output.display(),
                label,
                dir.display()
            )));
        }
    }

    if output.exists() && !output.is_dir() {
        return Err(ConfigError::Validation(format!(
            "Output path exists but is not a directory: {}",
            output.display()
        )));
    }

    Ok(())
}

/// Absolute form of `path` with `.` and `..` folded away and symlinks in
/// its existing part resolved. The path does not need to exist.
fn resolve_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut lexical = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(lexical.components().next_back(), Some(Component::Normal(_))) {
                    lexical.pop();
                }
            }
            other => lexical.push(other),
        }
    }

    // Canonicalize the deepest existing ancestor, then re-append the rest
    let mut existing = lexical.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.file_name(), existing.parent()) {
            (Some(name), Some(parent)) => {
                missing.push(name);
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = existing
        .canonicalize()
        .unwrap_or_else(|_| existing.to_path_buf());
    for name in missing.iter().rev() {
        resolved.push(name);
    }
    resolved
}

/// Missing layouts are not fatal: pages fall back to raw content
fn validate_layouts_directory(config: &Config) {
    if let Some(theme_layouts) = missing_theme_layouts(config) {
        warn!(
            "Theme '{}' has no layouts directory at {}",
            config.theme.as_deref().unwrap_or_default(),
            theme_layouts.display()
        );
    }

    let layouts = config.layouts_path();
    if !layouts.is_dir() && config.theme_layouts_path().map_or(true, |p| !p.is_dir()) {
        warn!("No layouts found at {}; pages will be written without templates", layouts.display());
    }
}

/// Layouts directory of the configured theme, when it does not exist
fn missing_theme_layouts(config: &Config) -> Option<PathBuf> {
    config.theme_layouts_path().filter(|path| !path.is_dir())
}
