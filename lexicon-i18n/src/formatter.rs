use std::collections::HashMap;

use crate::config::Config;
use crate::error::{I18nError, I18nResult};
use crate::template::{TemplateNode, TemplateParser};

/// Values bound to placeholder names for one lookup.
pub type Substitutions = HashMap<String, String>;

/// Interpolates substitution values into templates.
///
/// In strict mode a placeholder without a value, or a delimiter that does
/// not start a valid placeholder, is an error. Otherwise such text is kept
/// verbatim. Values that no placeholder refers to are ignored either way.
#[derive(Debug, Clone, Copy)]
pub struct Formatter<'a> {
    delimiter: &'a str,
    strict: bool,
}

impl<'a> Formatter<'a> {
    pub fn new(delimiter: &'a str, strict: bool) -> Self {
        Formatter { delimiter, strict }
    }

    pub fn from_config(config: &'a Config) -> Self {
        Formatter::new(
            &config.placeholder_delimiter,
            config.error_on_missing_placeholder,
        )
    }

    pub fn format(&self, template: &str, values: &Substitutions) -> I18nResult<String> {
        let nodes = TemplateParser::new(template, self.delimiter).parse();
        let mut result = String::with_capacity(template.len());

        for node in nodes {
            match node {
                TemplateNode::Text(text) => result.push_str(&text),
                TemplateNode::Placeholder(placeholder) => match values.get(&placeholder.name) {
                    Some(value) => result.push_str(value),
                    None if self.strict => {
                        return Err(I18nError::MissingPlaceholder {
                            placeholder: placeholder.raw,
                        });
                    }
                    None => {
                        tracing::debug!("no value for placeholder {}, leaving it as is", placeholder);
                        result.push_str(&placeholder.raw);
                    }
                },
                TemplateNode::Invalid(delimiter) => {
                    if self.strict {
                        return Err(I18nError::MissingPlaceholder {
                            placeholder: delimiter,
                        });
                    }
                    result.push_str(&delimiter);
                }
            }
        }
        Ok(result)
    }
}

/// Format `template` with the delimiter and strictness of `config`.
pub fn format(template: &str, values: &Substitutions, config: &Config) -> I18nResult<String> {
    Formatter::from_config(config).format(template, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> Substitutions {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_format() {
        let formatter = Formatter::new("%", false);
        assert_eq!(
            formatter
                .format("Hello, %{name}!", &values(&[("name", "Ada")]))
                .unwrap(),
            "Hello, Ada!"
        );
        assert_eq!(
            formatter
                .format("%greeting %name", &values(&[("greeting", "Hi"), ("name", "Ada")]))
                .unwrap(),
            "Hi Ada"
        );
    }

    #[test]
    fn test_lenient_keeps_unresolved() {
        let formatter = Formatter::new("%", false);
        assert_eq!(
            formatter.format("Hello, %{name}!", &Substitutions::new()).unwrap(),
            "Hello, %{name}!"
        );
        assert_eq!(
            formatter.format("50% off %%", &Substitutions::new()).unwrap(),
            "50% off %"
        );
    }

    #[test]
    fn test_strict_missing_value() {
        let formatter = Formatter::new("%", true);
        match formatter.format("Hello, %{name}!", &Substitutions::new()) {
            Err(I18nError::MissingPlaceholder { placeholder }) => {
                assert_eq!(placeholder, "%{name}")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_strict_invalid_placeholder() {
        let formatter = Formatter::new("%", true);
        assert!(formatter.format("50% off", &Substitutions::new()).is_err());
        assert_eq!(
            formatter.format("50%% off", &Substitutions::new()).unwrap(),
            "50% off"
        );
    }

    #[test]
    fn test_extra_values_ignored() {
        for strict in [false, true] {
            let formatter = Formatter::new("%", strict);
            assert_eq!(
                formatter
                    .format("Hi %{name}", &values(&[("name", "Ada"), ("unused", "x")]))
                    .unwrap(),
                "Hi Ada"
            );
        }
    }

    #[test]
    fn test_configured_delimiter() {
        let mut config = Config::default();
        config.placeholder_delimiter = "$".to_string();
        assert_eq!(
            format("Hello, ${name}! 100%", &values(&[("name", "Ada")]), &config).unwrap(),
            "Hello, Ada! 100%"
        );
    }
}
