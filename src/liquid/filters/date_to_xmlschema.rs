use std::fmt;

use liquid_core::parser::{FilterArguments, ParameterReflection, ParseFilter};
use liquid_core::FilterReflection;
use liquid_core::{Result as LiquidResult, Runtime, Value, ValueView};

use crate::front_matter::types::parse_date_str;
use crate::liquid::format_date;

/// Formats a date as RFC 3339; anything unparseable passes through
#[derive(Debug, Clone)]
pub struct DateToXmlSchemaFilter;

impl fmt::Display for DateToXmlSchemaFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "date_to_xmlschema")
    }
}

impl liquid_core::Filter for DateToXmlSchemaFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> LiquidResult<Value> {
        let date_str = input.to_kstr().to_string();

        match parse_date_str(&date_str) {
            Some(date) => Ok(Value::scalar(format_date(&date))),
            None => Ok(Value::scalar(date_str)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DateToXmlSchemaFilterParser;

impl FilterReflection for DateToXmlSchemaFilterParser {
    fn name(&self) -> &str {
        "date_to_xmlschema"
    }

    fn description(&self) -> &str {
        "Converts a date to XML Schema (RFC 3339) format"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for DateToXmlSchemaFilterParser {
    fn parse(&self, _arguments: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        Ok(Box::new(DateToXmlSchemaFilter))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}

#[cfg(test)]
mod tests {
    use liquid::object;

    #[test]
    fn test_date_to_xmlschema() {
        let parser = crate::liquid::create_parser("/", Default::default()).unwrap();
        let template = parser.parse("{{ d | date_to_xmlschema }}").unwrap();
        let output = template.render(&object!({ "d": "2024-01-02" })).unwrap();
        assert_eq!(output, "2024-01-02T00:00:00Z");
    }
}
