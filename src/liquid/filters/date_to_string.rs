use std::fmt;

use liquid_core::parser::{FilterArguments, ParameterReflection, ParseFilter};
use liquid_core::FilterReflection;
use liquid_core::{Result as LiquidResult, Runtime, Value, ValueView};

use crate::front_matter::types::parse_date_str;

/// Formats a date as `05 Mar 2024`; anything unparseable passes through
#[derive(Debug, Clone)]
pub struct DateToStringFilter;

impl fmt::Display for DateToStringFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "date_to_string")
    }
}

impl liquid_core::Filter for DateToStringFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> LiquidResult<Value> {
        let date_str = input.to_kstr().to_string();

        match parse_date_str(&date_str) {
            Some(date) => Ok(Value::scalar(date.format("%d %b %Y").to_string())),
            None => Ok(Value::scalar(date_str)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DateToStringFilterParser;

impl FilterReflection for DateToStringFilterParser {
    fn name(&self) -> &str {
        "date_to_string"
    }

    fn description(&self) -> &str {
        "Converts a date to short format, e.g. 05 Mar 2024"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for DateToStringFilterParser {
    fn parse(&self, _args: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        Ok(Box::new(DateToStringFilter))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}

#[cfg(test)]
mod tests {
    use liquid::object;

    #[test]
    fn test_date_to_string() {
        let parser = crate::liquid::create_parser("/", Default::default()).unwrap();
        let template = parser.parse("{{ a | date_to_string }}|{{ b | date_to_string }}").unwrap();
        let output = template
            .render(&object!({ "a": "2024-12-25 08:00:00", "b": "" }))
            .unwrap();
        assert_eq!(output, "25 Dec 2024|");
    }
}
