use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, OnceLock};

use liquid::Template;
use liquid_core::model::{KString, ScalarCow, ValueCow};
use liquid_core::parser::Language;
use liquid_core::{
    Error, Expression, ParseTag, Renderable, Runtime, TagReflection, TagTokenIter, ValueView,
};

/// Prefix of the error raised when a partial cannot be found
pub const PARTIAL_NOT_FOUND: &str = "partial not found: ";

/// Directory partials are looked up in first
const PARTIALS_PREFIX: &str = "partials/";

/// Globals a partial sees from the template that includes it
const INHERITED_GLOBALS: &[&str] = &["site", "page", "paginator"];

/// Parsed templates by registry name.
///
/// Filled exactly once after every template has been parsed, then only
/// read, so rendering threads share it without locking.
#[derive(Clone, Default)]
pub struct TemplateStore {
    templates: Arc<OnceLock<HashMap<String, Template>>>,
}

impl TemplateStore {
    /// Install the parsed templates; returns false if already filled
    pub fn fill(&self, templates: HashMap<String, Template>) -> bool {
        self.templates.set(templates).is_ok()
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get().and_then(|templates| templates.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Partial lookup: `partials/{name}` first, then `name` itself
    pub fn find_partial(&self, name: &str) -> Option<&Template> {
        self.get(&format!("{}{}", PARTIALS_PREFIX, name))
            .or_else(|| self.get(name))
    }
}

impl fmt::Debug for TemplateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self
            .templates
            .get()
            .map(|templates| templates.keys().collect())
            .unwrap_or_default();
        names.sort();
        f.debug_struct("TemplateStore").field("templates", &names).finish()
    }
}

/// `{% partial "name.html" %}` or `{% partial name_var item %}`.
///
/// The partial renders with the caller's `site`, `page` and `paginator`. An
/// optional second argument is exposed to it as `context`.
#[derive(Debug, Clone)]
pub struct PartialTag {
    store: TemplateStore,
}

impl PartialTag {
    pub fn new(store: TemplateStore) -> Self {
        Self { store }
    }
}

struct PartialTagReflection;

impl TagReflection for PartialTagReflection {
    fn tag(&self) -> &str {
        "partial"
    }

    fn description(&self) -> &str {
        "Render another template, looked up under partials/ first"
    }
}

impl ParseTag for PartialTag {
    fn reflection(&self) -> &dyn TagReflection {
        &PartialTagReflection
    }

    fn parse(
        &self,
        mut arguments: TagTokenIter,
        _options: &Language,
    ) -> Result<Box<dyn Renderable>, Error> {
        let name = arguments
            .expect_next("Partial name expected.")?
            .expect_value()
            .into_result()?;

        let context = match arguments.next() {
            Some(token) => Some(token.expect_value().into_result()?),
            None => None,
        };
        arguments.expect_nothing()?;

        Ok(Box::new(PartialRenderer {
            store: self.store.clone(),
            name,
            context,
        }))
    }
}

#[derive(Debug)]
struct PartialRenderer {
    store: TemplateStore,
    name: Expression,
    context: Option<Expression>,
}

impl PartialRenderer {
    /// Variables visible inside the partial, borrowed from the caller's runtime
    fn scope<'r>(&'r self, runtime: &'r dyn Runtime) -> Result<HashMap<KString, ValueCow<'r>>, Error> {
        let mut globals = HashMap::with_capacity(INHERITED_GLOBALS.len() + 1);

        for name in INHERITED_GLOBALS {
            if let Ok(value) = runtime.get(&[ScalarCow::from(*name)]) {
                globals.insert(KString::from_static(*name), value);
            }
        }

        if let Some(context) = &self.context {
            globals.insert(KString::from_static("context"), context.evaluate(runtime)?);
        }

        Ok(globals)
    }
}

impl Renderable for PartialRenderer {
    fn render(&self, runtime: &dyn Runtime) -> Result<String, Error> {
        let mut output = Vec::new();
        self.render_to(&mut output, runtime)?;
        String::from_utf8(output).map_err(|e| Error::with_msg(format!("Partial output is not UTF-8: {}", e)))
    }

    fn render_to(&self, writer: &mut dyn Write, runtime: &dyn Runtime) -> Result<(), Error> {
        let name = self.name.evaluate(runtime)?.to_kstr().to_string();

        let template = self
            .store
            .find_partial(&name)
            .ok_or_else(|| Error::with_msg(format!("{}{}", PARTIAL_NOT_FOUND, name)))?;

        let globals = self.scope(runtime)?;
        template
            .render_to(writer, &globals)
            .map_err(|e| Error::with_msg(format!("Error rendering partial {}: {}", name, e)))
    }
}
