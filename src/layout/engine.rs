use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use crate::builder::page::PageKind;
use crate::layout::registry::load_templates;
use crate::layout::resolver::candidates;
use crate::layout::TemplateError;
use crate::liquid::{create_parser, TemplateStore};

lazy_static! {
    static ref MISSING_PARTIAL_REGEX: Regex = Regex::new(&format!(
        r"{}(\S+)",
        regex::escape(crate::liquid::PARTIAL_NOT_FOUND)
    ))
    .unwrap();
}

/// The template registry plus everything needed to run it.
///
/// Every template is parsed once at construction. After that the engine is
/// read-only and can be shared by rendering threads.
#[derive(Debug)]
pub struct Engine {
    store: TemplateStore,
    names: Vec<String>,
}

impl Engine {
    /// Load theme templates, then user templates over them, and parse all
    pub fn new(theme_dir: Option<&Path>, user_dir: Option<&Path>, base_url: &str) -> Result<Self, TemplateError> {
        let mut sources = BTreeMap::new();

        if let Some(dir) = theme_dir {
            let count = load_templates(dir, &mut sources)?;
            debug!("Loaded {} theme templates from {}", count, dir.display());
        }
        if let Some(dir) = user_dir {
            let count = load_templates(dir, &mut sources)?;
            debug!("Loaded {} user templates from {}", count, dir.display());
        }

        let engine = Self::from_sources(sources, base_url)?;
        info!("Template registry holds {} templates", engine.names.len());
        Ok(engine)
    }

    /// Build from in-memory sources keyed by registry name
    pub fn from_sources(sources: BTreeMap<String, String>, base_url: &str) -> Result<Self, TemplateError> {
        let store = TemplateStore::default();
        let parser = create_parser(base_url, store.clone()).map_err(|e| TemplateError::Parse {
            name: "<parser>".to_string(),
            message: e.to_string(),
        })?;

        let mut templates = HashMap::with_capacity(sources.len());
        for (name, source) in &sources {
            let template = parser.parse(source).map_err(|e| TemplateError::Parse {
                name: name.clone(),
                message: e.to_string(),
            })?;
            templates.insert(name.clone(), template);
        }
        store.fill(templates);

        Ok(Engine {
            store,
            names: sources.into_keys().collect(),
        })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.store.contains(name)
    }

    /// Registered names, sorted
    pub fn template_names(&self) -> &[String] {
        &self.names
    }

    /// First registered template in the cascade for this page shape
    pub fn resolve(&self, kind: PageKind, section: &str, layout: Option<&str>) -> Option<String> {
        candidates(kind, section, layout)
            .into_iter()
            .find(|name| self.has_template(name))
    }

    /// Render a registered template against `globals`
    pub fn execute(&self, name: &str, globals: &dyn liquid::ObjectView) -> Result<String, TemplateError> {
        let template = self
            .store
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;

        template.render(globals).map_err(|e| {
            let message = e.to_string();
            match MISSING_PARTIAL_REGEX.captures(&message) {
                Some(caps) => TemplateError::NotFound(caps[1].to_string()),
                None => TemplateError::Render {
                    name: name.to_string(),
                    message,
                },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liquid::object;
    use std::fs;
    use tempfile::TempDir;

    fn engine(templates: &[(&str, &str)]) -> Engine {
        let sources = templates
            .iter()
            .map(|(name, source)| (name.to_string(), source.to_string()))
            .collect();
        Engine::from_sources(sources, "https://example.org/").unwrap()
    }

    #[test]
    fn test_resolve_default_single() {
        let registry = engine(&[("_default/single.html", "x")]);
        assert_eq!(
            registry.resolve(PageKind::Single, "blog", None).as_deref(),
            Some("_default/single.html")
        );

        let empty = engine(&[]);
        assert_eq!(empty.resolve(PageKind::Single, "blog", None), None);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let registry = engine(&[
            ("blog/single.html", "a"),
            ("_default/wide.html", "b"),
            ("_default/single.html", "c"),
        ]);
        let first = registry.resolve(PageKind::Single, "blog", Some("wide"));
        for _ in 0..10 {
            assert_eq!(registry.resolve(PageKind::Single, "blog", Some("wide")), first);
        }
        assert_eq!(first.as_deref(), Some("blog/single.html"));
        assert_eq!(
            registry.resolve(PageKind::Single, "notes", Some("wide")).as_deref(),
            Some("_default/wide.html")
        );
    }

    #[test]
    fn test_execute() {
        let registry = engine(&[
            ("_default/single.html", "{% partial \"head.html\" %}<main>{{ page.content }}</main>"),
            ("partials/head.html", "<title>{{ page.title }}</title>"),
        ]);
        let output = registry
            .execute(
                "_default/single.html",
                &object!({ "page": { "title": "Hi", "content": "<p>x</p>" } }),
            )
            .unwrap();
        assert_eq!(output, "<title>Hi</title><main><p>x</p></main>");
    }

    #[test]
    fn test_execute_errors() {
        let registry = engine(&[
            ("broken.html", "{% partial \"missing.html\" %}"),
            ("bad.html", "{{ nothing_here }}"),
        ]);

        let err = registry.execute("absent.html", &object!({})).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(ref name) if name == "absent.html"));

        let err = registry.execute("broken.html", &object!({})).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(ref name) if name == "missing.html"));

        let err = registry.execute("bad.html", &object!({})).unwrap_err();
        assert!(matches!(err, TemplateError::Render { ref name, .. } if name == "bad.html"));
    }

    #[test]
    fn test_parse_error_names_template() {
        let sources = BTreeMap::from([("oops.html".to_string(), "{% if %}".to_string())]);
        let err = Engine::from_sources(sources, "/").unwrap_err();
        assert!(matches!(err, TemplateError::Parse { ref name, .. } if name == "oops.html"));
    }

    #[test]
    fn test_new_loads_theme_then_user() {
        let theme = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        fs::create_dir_all(theme.path().join("_default")).unwrap();
        fs::create_dir_all(user.path().join("_default")).unwrap();
        fs::write(theme.path().join("_default/single.html"), "theme").unwrap();
        fs::write(theme.path().join("index.html"), "home").unwrap();
        fs::write(user.path().join("_default/single.html"), "user").unwrap();

        let registry = Engine::new(Some(theme.path()), Some(user.path()), "/").unwrap();
        assert_eq!(registry.template_names(), &["_default/single.html", "index.html"]);
        assert_eq!(registry.execute("_default/single.html", &object!({})).unwrap(), "user");
    }
}
