//! Resolver configuration.
//!
//! Options are read at call time by the resolver, so changing them through
//! [`I18n::config_mut`](crate::I18n::config_mut) affects the next lookup.
//! Every option can also be addressed by name through [`Config::get`] and
//! [`Config::set`], or read from a TOML document using the same names:
//!
//! ```toml
//! locale = "fr"
//! fallback = "en"
//! error_on_missing_translation = true
//! load_path = ["translations"]
//! file_format = "toml"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{I18nError, I18nResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub locale: String,
    pub fallback: String,
    pub placeholder_delimiter: String,
    pub error_on_missing_translation: bool,
    pub error_on_missing_placeholder: bool,
    pub error_on_missing_plural: bool,
    /// Counts up to this value (other than 0 and 1) select the "few" form.
    pub plural_few: i64,
    /// Cache file contents in the file loader.
    pub enable_memoization: bool,
    pub load_path: Vec<PathBuf>,
    pub file_format: String,
    pub filename_format: String,
    pub namespace_delimiter: String,
    /// Resource files hold translations at the root instead of under a
    /// top-level locale member.
    pub skip_locale_root_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            locale: "en".to_string(),
            fallback: "en".to_string(),
            placeholder_delimiter: "%".to_string(),
            error_on_missing_translation: false,
            error_on_missing_placeholder: false,
            error_on_missing_plural: false,
            plural_few: 5,
            enable_memoization: false,
            load_path: Vec::new(),
            file_format: "json".to_string(),
            filename_format: "{namespace}.{locale}.{format}".to_string(),
            namespace_delimiter: ".".to_string(),
            skip_locale_root_data: false,
        }
    }
}

/// A configuration value addressed by option name.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Paths(Vec<PathBuf>),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Str(s) => write!(f, "{}", s),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Int(i) => write!(f, "{}", i),
            ConfigValue::Paths(paths) => {
                let joined: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
                write!(f, "[{}]", joined.join(", "))
            }
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Str(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Str(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<Vec<PathBuf>> for ConfigValue {
    fn from(value: Vec<PathBuf>) -> Self {
        ConfigValue::Paths(value)
    }
}

impl Config {
    /// Parse a TOML document. Missing options keep their defaults.
    pub fn from_toml_str(content: &str) -> I18nResult<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| I18nError::Config(format!("invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the options no lookup can work without: both delimiters must
    /// be non-empty.
    pub fn validate(&self) -> I18nResult<()> {
        non_empty("placeholder_delimiter", &self.placeholder_delimiter)?;
        non_empty("namespace_delimiter", &self.namespace_delimiter)
    }

    /// Read a TOML config file.
    pub fn load(path: &Path) -> I18nResult<Config> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            I18nError::Config(format!("failed to read '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("loaded i18n config from {}", path.display());
        Ok(config)
    }

    /// Look up an option by name.
    pub fn get(&self, name: &str) -> I18nResult<ConfigValue> {
        let value = match name {
            "locale" => self.locale.clone().into(),
            "fallback" => self.fallback.clone().into(),
            "placeholder_delimiter" => self.placeholder_delimiter.clone().into(),
            "error_on_missing_translation" => self.error_on_missing_translation.into(),
            "error_on_missing_placeholder" => self.error_on_missing_placeholder.into(),
            "error_on_missing_plural" => self.error_on_missing_plural.into(),
            "plural_few" => self.plural_few.into(),
            "enable_memoization" => self.enable_memoization.into(),
            "load_path" => self.load_path.clone().into(),
            "file_format" => self.file_format.clone().into(),
            "filename_format" => self.filename_format.clone().into(),
            "namespace_delimiter" => self.namespace_delimiter.clone().into(),
            "skip_locale_root_data" => self.skip_locale_root_data.into(),
            _ => return Err(I18nError::Config(format!("unknown option '{}'", name))),
        };
        Ok(value)
    }

    /// Set an option by name. The value must have the option's type.
    pub fn set(&mut self, name: &str, value: impl Into<ConfigValue>) -> I18nResult<()> {
        let value = value.into();
        match (name, value) {
            ("locale", ConfigValue::Str(s)) => self.locale = s,
            ("fallback", ConfigValue::Str(s)) => self.fallback = s,
            ("placeholder_delimiter", ConfigValue::Str(s)) => {
                non_empty(name, &s)?;
                self.placeholder_delimiter = s
            }
            ("error_on_missing_translation", ConfigValue::Bool(b)) => {
                self.error_on_missing_translation = b
            }
            ("error_on_missing_placeholder", ConfigValue::Bool(b)) => {
                self.error_on_missing_placeholder = b
            }
            ("error_on_missing_plural", ConfigValue::Bool(b)) => self.error_on_missing_plural = b,
            ("plural_few", ConfigValue::Int(i)) => self.plural_few = i,
            ("enable_memoization", ConfigValue::Bool(b)) => self.enable_memoization = b,
            ("load_path", ConfigValue::Paths(paths)) => self.load_path = paths,
            ("file_format", ConfigValue::Str(s)) => self.file_format = s,
            ("filename_format", ConfigValue::Str(s)) => self.filename_format = s,
            ("namespace_delimiter", ConfigValue::Str(s)) => {
                non_empty(name, &s)?;
                self.namespace_delimiter = s
            }
            ("skip_locale_root_data", ConfigValue::Bool(b)) => self.skip_locale_root_data = b,
            (name, value) => {
                // Distinguish an unknown option from a badly typed value.
                self.get(name)?;
                return Err(I18nError::Config(format!(
                    "invalid value '{}' for option '{}'",
                    value, name
                )));
            }
        }
        Ok(())
    }

    /// Turn all three `error_on_*` flags on or off.
    pub fn set_strict(&mut self, strict: bool) {
        self.error_on_missing_translation = strict;
        self.error_on_missing_placeholder = strict;
        self.error_on_missing_plural = strict;
    }
}

fn non_empty(name: &str, value: &str) -> I18nResult<()> {
    if value.is_empty() {
        return Err(I18nError::Config(format!("{} cannot be empty", name)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.get("locale").unwrap(), ConfigValue::Str("en".into()));
        assert_eq!(config.get("fallback").unwrap(), ConfigValue::Str("en".into()));
        assert_eq!(
            config.get("placeholder_delimiter").unwrap(),
            ConfigValue::Str("%".into())
        );
        assert_eq!(config.get("plural_few").unwrap(), ConfigValue::Int(5));
        assert_eq!(
            config.get("error_on_missing_translation").unwrap(),
            ConfigValue::Bool(false)
        );
        assert_eq!(config.get("load_path").unwrap(), ConfigValue::Paths(vec![]));
    }

    #[test]
    fn test_set_by_name() {
        let mut config = Config::default();
        config.set("locale", "fr").unwrap();
        config.set("plural_few", 4i64).unwrap();
        config.set("error_on_missing_plural", true).unwrap();
        config
            .set("load_path", vec![PathBuf::from("locales")])
            .unwrap();

        assert_eq!(config.locale, "fr");
        assert_eq!(config.plural_few, 4);
        assert!(config.error_on_missing_plural);
        assert_eq!(config.load_path, vec![PathBuf::from("locales")]);
    }

    #[test]
    fn test_set_rejects_unknown_and_mistyped() {
        let mut config = Config::default();
        let err = config.set("colour", "blue").unwrap_err();
        assert!(err.to_string().contains("unknown option 'colour'"));

        let err = config.set("plural_few", "many").unwrap_err();
        assert!(err.to_string().contains("invalid value 'many'"));

        assert!(config.set("placeholder_delimiter", "").is_err());
        assert_eq!(config.placeholder_delimiter, "%");
    }

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml_str(
            r#"
            locale = "de"
            error_on_missing_translation = true
            load_path = ["a", "b"]
            "#,
        )
        .unwrap();
        assert_eq!(config.locale, "de");
        assert!(config.error_on_missing_translation);
        assert_eq!(config.load_path, vec![PathBuf::from("a"), PathBuf::from("b")]);
        // untouched options keep defaults
        assert_eq!(config.fallback, "en");
        assert_eq!(config.file_format, "json");
    }

    #[test]
    fn test_from_toml_rejects_unknown_option() {
        assert!(Config::from_toml_str("encoding = \"latin-1\"").is_err());
    }

    #[test]
    fn test_from_toml_rejects_empty_delimiters() {
        for option in ["placeholder_delimiter", "namespace_delimiter"] {
            match Config::from_toml_str(&format!("{} = \"\"", option)) {
                Err(I18nError::Config(reason)) => assert!(reason.contains(option), "{}", reason),
                other => panic!("unexpected result for {}: {:?}", option, other),
            }
        }
        assert!(Config::from_toml_str("placeholder_delimiter = \"$\"").is_ok());
    }

    #[test]
    fn test_validate_struct_literal() {
        let config = Config {
            namespace_delimiter: String::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_set_strict() {
        let mut config = Config::default();
        config.set_strict(true);
        assert!(config.error_on_missing_translation);
        assert!(config.error_on_missing_placeholder);
        assert!(config.error_on_missing_plural);
    }
}
