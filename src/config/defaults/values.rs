use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default base URL
pub fn default_base_url() -> String {
    "/".to_string()
}

/// Default site title
pub fn default_site_title() -> String {
    "My New Site".to_string()
}

/// Default language code
pub fn default_language_code() -> String {
    "en-us".to_string()
}

/// Default content directory
pub fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

/// Default layouts directory
pub fn default_layouts_dir() -> PathBuf {
    PathBuf::from("layouts")
}

/// Default themes directory
pub fn default_themes_dir() -> PathBuf {
    PathBuf::from("themes")
}

/// Default static files directory
pub fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

/// Default output directory
pub fn default_output_dir() -> PathBuf {
    PathBuf::from("public")
}

/// Default number of items per listing page
pub fn default_paginate() -> i64 {
    10
}

/// Default summary length in words
pub fn default_summary_length() -> usize {
    70
}

/// Default taxonomies, singular name to plural name
pub fn default_taxonomies() -> BTreeMap<String, String> {
    let mut taxonomies = BTreeMap::new();
    taxonomies.insert("tag".to_string(), "tags".to_string());
    taxonomies.insert("category".to_string(), "categories".to_string());
    taxonomies.insert("series".to_string(), "series".to_string());
    taxonomies
}
