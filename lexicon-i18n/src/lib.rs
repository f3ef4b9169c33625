//! Key-based translation lookup.
//!
//! [`I18n`] resolves a message key for a locale to a display string. It
//! looks the key up in its [`TranslationStore`], asks its
//! [`ResourceLoader`] to load it on a miss, retries once with the
//! configured fallback locale, picks a plural form when a count is given
//! and finally fills in placeholders.
//!
//! ```
//! use lexicon_i18n::{I18n, PluralForms, TranslateOptions};
//!
//! let mut i18n = I18n::new();
//! i18n.add_translation("en", "greeting", "Hello, %{name}!");
//! i18n.add_translation(
//!     "en",
//!     "inbox",
//!     PluralForms::new()
//!         .with_zero("No messages")
//!         .with_one("One message")
//!         .with_other("%{count} messages"),
//! );
//!
//! let hello = i18n
//!     .resolve("greeting", &TranslateOptions::new().with_value("name", "Ada"))
//!     .unwrap();
//! assert_eq!(hello.to_string(), "Hello, Ada!");
//!
//! let inbox = i18n
//!     .resolve("inbox", &TranslateOptions::new().with_count(3))
//!     .unwrap();
//! assert_eq!(inbox.to_string(), "3 messages");
//! ```
//!
//! Lookups are synchronous and take `&mut self`, since a miss may fill the
//! store. Share an `I18n` between threads behind a lock.

use std::borrow::Cow;
use std::fmt::Display;
use std::path::PathBuf;

pub mod config;
pub mod error;
pub mod formatter;
pub mod loader;
pub mod plural;
pub mod store;
pub mod template;
pub mod value;


pub use config::{Config, ConfigValue};
pub use error::{I18nError, I18nResult};
pub use formatter::{Formatter, Substitutions};
pub use loader::{FileLoader, NoopLoader, ResourceLoader};
pub use plural::pluralize;
pub use store::{LocaleTranslations, TranslationStore};
pub use value::{PluralForms, Translation, TranslationValue};

/// Per-call options for [`I18n::resolve`].
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// Locale to use instead of the configured one.
    pub locale: Option<String>,
    /// Selects a plural form; also available to templates as `count`.
    pub count: Option<i64>,
    /// Returned as is when the key is not found.
    pub default: Option<String>,
    pub values: Substitutions,
}

impl TranslateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_string());
        self
    }

    pub fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn with_value(mut self, name: &str, value: impl Display) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    /// Substitutions for formatting, with `count` bound unless the caller
    /// bound it explicitly.
    fn substitutions(&self) -> Cow<'_, Substitutions> {
        match self.count {
            Some(count) if !self.values.contains_key("count") => {
                let mut values = self.values.clone();
                values.insert("count".to_string(), count.to_string());
                Cow::Owned(values)
            }
            _ => Cow::Borrowed(&self.values),
        }
    }
}

pub struct I18n {
    store: TranslationStore,
    loader: Box<dyn ResourceLoader>,
    config: Config,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new()
    }
}

impl I18n {
    /// A resolver with default configuration and a [`FileLoader`].
    pub fn new() -> Self {
        I18n {
            store: TranslationStore::new(),
            loader: Box::new(FileLoader::new()),
            config: Config::default(),
        }
    }

    pub fn with_config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    pub fn with_loader(&mut self, loader: Box<dyn ResourceLoader>) -> &mut Self {
        self.loader = loader;
        self
    }

    pub fn with_locale(&mut self, locale: &str) -> &mut Self {
        self.config.locale = locale.to_string();
        self
    }

    pub fn with_fallback(&mut self, locale: &str) -> &mut Self {
        self.config.fallback = locale.to_string();
        self
    }

    /// Add a directory to search for translation files.
    pub fn with_load_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.config.load_path.push(path.into());
        self
    }

    pub fn with_translations_for_locale(
        &mut self,
        locale: &str,
        translations: LocaleTranslations,
    ) -> &mut Self {
        self.store.add_all(locale, translations);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn store(&self) -> &TranslationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TranslationStore {
        &mut self.store
    }

    /// Add a translation without going through the loader. An existing
    /// translation for the same locale and key is kept.
    pub fn add_translation(&mut self, locale: &str, key: &str, value: impl Into<TranslationValue>) {
        self.store.add(locale, key, value);
    }

    pub fn has_translation(&self, locale: &str, key: &str) -> bool {
        self.store.has(locale, key)
    }

    /// Resolve `key` in the configured locale without options.
    pub fn t(&mut self, key: &str) -> I18nResult<Translation> {
        self.resolve(key, &TranslateOptions::default())
    }

    /// Resolve `key` to its formatted translation.
    ///
    /// The requested locale is tried first, then the fallback locale if it
    /// differs. When neither has the key, the default is returned verbatim
    /// if one was given, else an error with `error_on_missing_translation`,
    /// else the key itself. A configuration with an empty delimiter is
    /// rejected before any lookup.
    pub fn resolve(&mut self, key: &str, options: &TranslateOptions) -> I18nResult<Translation> {
        self.config.validate()?;
        let requested = options
            .locale
            .clone()
            .unwrap_or_else(|| self.config.locale.clone());
        let fallback = self.config.fallback.clone();

        let mut locales = vec![requested.as_str()];
        if requested != fallback {
            locales.push(fallback.as_str());
        }

        for locale in locales {
            if self.find(key, locale)? {
                if locale != requested {
                    tracing::debug!(
                        "Fallback: using translation '{}' from locale '{}' (requested: '{}')",
                        key,
                        locale,
                        requested
                    );
                }
                return self.translate(key, locale, options.count, &options.substitutions());
            }
        }

        if let Some(default) = &options.default {
            return Ok(Translation::Text(default.clone()));
        }
        if self.config.error_on_missing_translation {
            return Err(I18nError::TranslationNotFound {
                key: key.to_string(),
            });
        }
        tracing::warn!(
            "No translation found for '{}' in locale '{}' or fallback '{}'",
            key,
            requested,
            fallback
        );
        Ok(Translation::Text(key.to_string()))
    }

    /// Whether `key` is available for `locale`, loading it if needed.
    fn find(&mut self, key: &str, locale: &str) -> I18nResult<bool> {
        if self.store.has(locale, key) {
            return Ok(true);
        }
        self.loader
            .search_translation(key, locale, &mut self.store, &self.config)?;
        Ok(self.store.has(locale, key))
    }

    fn translate(
        &self,
        key: &str,
        locale: &str,
        count: Option<i64>,
        values: &Substitutions,
    ) -> I18nResult<Translation> {
        let value = self.store.get(locale, key)?;
        let formatter = Formatter::from_config(&self.config);

        let TranslationValue::List(items) = value else {
            let template = match (value, count) {
                (TranslationValue::Scalar(text), None) => Cow::Borrowed(text.as_str()),
                _ => pluralize(key, value, count, &self.config)?,
            };
            return Ok(Translation::Text(formatter.format(&template, values)?));
        };

        // Lists holding anything but scalars and plural forms are returned untouched.
        if !items.iter().all(TranslationValue::is_translatable) {
            tracing::debug!("'{}' holds nested lists or raw data, skipping formatting", key);
            return Ok(Translation::List(items.clone()));
        }

        let mut result = Vec::with_capacity(items.len());
        for item in items {
            let item = match count {
                Some(_) => TranslationValue::Scalar(
                    pluralize(key, item, count, &self.config)?.into_owned(),
                ),
                None => item.clone(),
            };
            let item = match item {
                TranslationValue::Scalar(text) => {
                    TranslationValue::Scalar(formatter.format(&text, values)?)
                }
                other => other,
            };
            result.push(item);
        }
        Ok(Translation::List(result))
    }

    /// Forget all translations and cached resources.
    pub fn reset(&mut self) {
        self.store.clear();
        self.loader.clear_cache();
    }
}
