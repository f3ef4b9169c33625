use std::collections::HashMap;

use crate::error::{I18nError, I18nResult};
use crate::value::TranslationValue;

/// Translations of one locale, keyed by message key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleTranslations(pub HashMap<String, TranslationValue>);

impl LocaleTranslations {
    pub fn new() -> Self {
        LocaleTranslations(HashMap::new())
    }

    /// Insert unless the key is already present.
    pub fn with_translation(&mut self, key: &str, value: impl Into<TranslationValue>) -> &mut Self {
        self.0.entry(key.to_owned()).or_insert_with(|| value.into());
        self
    }

    pub fn get_translation(&self, key: &str) -> Option<&TranslationValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// In-memory translations for every locale.
///
/// Insertion never overwrites: the first value added for a (locale, key)
/// pair wins, so reloading the same resource is harmless.
#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
    // Keyed by locale and then by message key
    // e.g. translations["en"]["greeting"] = "Hello"
    //      translations["fr"]["greeting"] = "Bonjour"
    translations: HashMap<String, LocaleTranslations>,
}

impl TranslationStore {
    pub fn new() -> Self {
        TranslationStore {
            translations: HashMap::new(),
        }
    }

    /// Add a translation unless one already exists for this locale and key.
    pub fn add(&mut self, locale: &str, key: &str, value: impl Into<TranslationValue>) {
        self.translations
            .entry(locale.to_string())
            .or_insert_with(LocaleTranslations::new)
            .with_translation(key, value);
    }

    /// Add every translation of `translations` under `locale`, keeping
    /// existing entries.
    pub fn add_all(&mut self, locale: &str, translations: LocaleTranslations) {
        for (key, value) in translations.0 {
            self.add(locale, &key, value);
        }
    }

    pub fn has(&self, locale: &str, key: &str) -> bool {
        self.translations
            .get(locale)
            .is_some_and(|translations| translations.contains(key))
    }

    pub fn get(&self, locale: &str, key: &str) -> I18nResult<&TranslationValue> {
        self.translations
            .get(locale)
            .and_then(|translations| translations.get_translation(key))
            .ok_or_else(|| I18nError::KeyNotFound {
                locale: locale.to_string(),
                key: key.to_string(),
            })
    }

    pub fn locale(&self, locale: &str) -> Option<&LocaleTranslations> {
        self.translations.get(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }

    /// Total number of translations across locales.
    pub fn len(&self) -> usize {
        self.translations.values().map(LocaleTranslations::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.translations.clear();
    }
}
