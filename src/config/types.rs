use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Site configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Absolute URL the site is published under
    #[serde(default = "defaults::default_base_url", alias = "baseurl", alias = "baseURL")]
    pub base_url: String,

    /// Site title
    #[serde(default = "defaults::default_site_title")]
    pub title: String,

    /// Site description
    #[serde(default)]
    pub description: String,

    /// Default author for pages without an author override
    #[serde(default)]
    pub author: Option<String>,

    #[serde(default = "defaults::default_language_code", alias = "languageCode")]
    pub language_code: String,

    /// Content directory, relative to the project root
    #[serde(default = "defaults::default_content_dir")]
    pub content_dir: PathBuf,

    /// User layouts directory
    #[serde(default = "defaults::default_layouts_dir")]
    pub layouts_dir: PathBuf,

    /// Theme name; its layouts live at `{themes_dir}/{theme}/layouts`
    #[serde(default)]
    pub theme: Option<String>,

    #[serde(default = "defaults::default_themes_dir")]
    pub themes_dir: PathBuf,

    /// Files copied verbatim to the output root
    #[serde(default = "defaults::default_static_dir")]
    pub static_dir: PathBuf,

    /// Destination directory for generated site
    #[serde(default = "defaults::default_output_dir", alias = "publishDir")]
    pub output_dir: PathBuf,

    /// Items per listing page; non-positive values fall back to 10
    #[serde(default = "defaults::default_paginate")]
    pub paginate: i64,

    /// Number of words in a generated summary
    #[serde(default = "defaults::default_summary_length", alias = "summaryLength")]
    pub summary_length: usize,

    /// Taxonomies to build, singular name to plural name
    #[serde(default = "defaults::default_taxonomies")]
    pub taxonomies: BTreeMap<String, String>,

    /// Free-form site parameters exposed to templates
    #[serde(default)]
    pub params: BTreeMap<String, serde_yaml::Value>,

    /// Directory the configuration was loaded from
    #[serde(skip)]
    pub project_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: defaults::default_base_url(),
            title: defaults::default_site_title(),
            description: String::new(),
            author: None,
            language_code: defaults::default_language_code(),
            content_dir: defaults::default_content_dir(),
            layouts_dir: defaults::default_layouts_dir(),
            theme: None,
            themes_dir: defaults::default_themes_dir(),
            static_dir: defaults::default_static_dir(),
            output_dir: defaults::default_output_dir(),
            paginate: defaults::default_paginate(),
            summary_length: defaults::default_summary_length(),
            taxonomies: defaults::default_taxonomies(),
            params: BTreeMap::new(),
            project_root: PathBuf::from("."),
        }
    }
}

impl Config {
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    pub fn content_path(&self) -> PathBuf {
        self.resolve(&self.content_dir)
    }

    pub fn layouts_path(&self) -> PathBuf {
        self.resolve(&self.layouts_dir)
    }

    /// Layouts shipped by the configured theme, if any
    pub fn theme_layouts_path(&self) -> Option<PathBuf> {
        self.theme
            .as_ref()
            .map(|theme| self.resolve(&self.themes_dir).join(theme).join("layouts"))
    }

    pub fn static_path(&self) -> PathBuf {
        self.resolve(&self.static_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }
}
