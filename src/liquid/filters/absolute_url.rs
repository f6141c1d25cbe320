use std::fmt;

use liquid_core::parser::{FilterArguments, ParameterReflection, ParseFilter};
use liquid_core::FilterReflection;
use liquid_core::{Result as LiquidResult, Runtime, Value, ValueView};

use super::is_absolute;

/// Joins a site path onto the full base URL
#[derive(Debug, Clone)]
pub struct AbsoluteUrlFilter {
    base_url: String,
}

impl liquid_core::Filter for AbsoluteUrlFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> LiquidResult<Value> {
        let path = input.to_kstr().to_string();
        if is_absolute(&path) {
            return Ok(Value::scalar(path));
        }

        Ok(Value::scalar(format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )))
    }
}

impl fmt::Display for AbsoluteUrlFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "absolute_url")
    }
}

#[derive(Debug, Clone)]
pub struct AbsoluteUrlFilterParser {
    pub base_url: String,
}

impl FilterReflection for AbsoluteUrlFilterParser {
    fn name(&self) -> &str {
        "absolute_url"
    }

    fn description(&self) -> &str {
        "Prepends the site's base URL to the input"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for AbsoluteUrlFilterParser {
    fn parse(&self, _args: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        Ok(Box::new(AbsoluteUrlFilter {
            base_url: self.base_url.clone(),
        }))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}

#[cfg(test)]
mod tests {
    use liquid::object;

    fn render(base_url: &str, source: &str) -> String {
        let parser = crate::liquid::create_parser(base_url, Default::default()).unwrap();
        parser.parse(source).unwrap().render(&object!({})).unwrap()
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            render("https://x.org/", "{{ '/feed.xml' | absolute_url }}"),
            "https://x.org/feed.xml"
        );
        assert_eq!(render("https://x.org/blog", "{{ '' | absolute_url }}"), "https://x.org/blog/");
        assert_eq!(render("https://x.org/", "{{ 'http://y.org/a' | absolute_url }}"), "http://y.org/a");
    }
}
