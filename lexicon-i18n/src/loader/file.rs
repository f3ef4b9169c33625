use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde_json::{Map, Value};

use super::ResourceLoader;
use super::format::{FormatParser, JsonParser, TomlParser, YamlParser};
use crate::config::Config;
use crate::error::{I18nError, I18nResult};
use crate::store::TranslationStore;
use crate::value::{PLURAL_TAGS, PluralForms, TranslationValue};

/// Loads translation files from the directories of `load_path`.
///
/// For a key `admin.users.count` the namespace is `admin.users`. In each
/// root directory the loader looks for a file named by `filename_format`
/// after the first namespace segment (`admin.en.json`); failing that it
/// descends into a sub-directory of that name and repeats with the next
/// segment (`admin/users.en.json`).
///
/// Unless `skip_locale_root_data` is set, a file holds its translations
/// under a top-level member named after the locale:
///
/// ```json
/// {
///     "en": {
///         "title": "Users",
///         "count": { "one": "one user", "other": "%{count} users" },
///         "menu": { "open": "Open" }
///     }
/// }
/// ```
///
/// Nested objects with fewer than two plural tags are namespaces, so the
/// file above defines `admin.users.title`, `admin.users.count` and
/// `admin.users.menu.open`.
pub struct FileLoader {
    parsers: HashMap<String, Box<dyn FormatParser>>,
    // File contents by path, filled only with `enable_memoization`
    cache: HashMap<PathBuf, String>,
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLoader {
    /// A loader with parsers for `json`, `toml`, `yml` and `yaml`.
    pub fn new() -> Self {
        let mut loader = FileLoader {
            parsers: HashMap::new(),
            cache: HashMap::new(),
        };
        loader
            .register_parser("json", Box::new(JsonParser))
            .register_parser("toml", Box::new(TomlParser))
            .register_parser("yml", Box::new(YamlParser))
            .register_parser("yaml", Box::new(YamlParser));
        loader
    }

    /// Use `parser` for files whose `file_format` is `extension`.
    pub fn register_parser(&mut self, extension: &str, parser: Box<dyn FormatParser>) -> &mut Self {
        self.parsers.insert(extension.to_string(), parser);
        self
    }

    pub fn supports(&self, extension: &str) -> bool {
        self.parsers.contains_key(extension)
    }

    fn read_file(&mut self, path: &Path, config: &Config) -> I18nResult<String> {
        if config.enable_memoization {
            if let Some(content) = self.cache.get(path) {
                return Ok(content.clone());
            }
        }
        let content = fs::read_to_string(path)
            .map_err(|e| I18nError::resource_load(path.display(), format!("error loading file: {}", e)))?;
        if config.enable_memoization {
            self.cache.insert(path.to_path_buf(), content.clone());
        }
        Ok(content)
    }

    /// Read and parse `path`, returning the member named `root_data` of the
    /// document, or the whole document when `root_data` is `None`.
    pub fn load_resource(
        &mut self,
        path: &Path,
        root_data: Option<&str>,
        config: &Config,
    ) -> I18nResult<Value> {
        let content = self.read_file(path, config)?;
        let parser = self.parsers.get(&config.file_format).ok_or_else(|| {
            I18nError::Config(format!(
                "no parser registered for file format '{}'",
                config.file_format
            ))
        })?;
        let data = parser
            .parse(&content)
            .map_err(|reason| I18nError::resource_load(path.display(), reason))?;

        match root_data {
            None => Ok(data),
            Some(root) => match data {
                Value::Object(mut members) if members.contains_key(root) => {
                    Ok(members.remove(root).unwrap_or(Value::Null))
                }
                _ => Err(I18nError::resource_load(
                    path.display(),
                    format!("{} not defined", root),
                )),
            },
        }
    }

    fn search_dir(
        &mut self,
        segments: &[&str],
        root: &Path,
        locale: &str,
        store: &mut TranslationStore,
        config: &Config,
    ) -> I18nResult<()> {
        let mut directory = PathBuf::new();
        let mut segments = segments;
        loop {
            let namespace = segments.first().copied().unwrap_or("");
            let file_name = resource_file_name(config, namespace, locale);
            let entries = list_dir(&root.join(&directory))?;

            if entries.contains(&file_name) {
                return self.load_translation_file(&directory.join(file_name), root, locale, store, config);
            }
            let subdir = root.join(&directory).join(namespace);
            if namespace.is_empty() || !entries.contains(namespace) || !subdir.is_dir() {
                tracing::debug!(
                    "no {} translations for '{}' under {}",
                    locale,
                    namespace,
                    root.join(&directory).display()
                );
                return Ok(());
            }
            directory.push(namespace);
            segments = &segments[1..];
        }
    }

    fn load_translation_file(
        &mut self,
        relative: &Path,
        root: &Path,
        locale: &str,
        store: &mut TranslationStore,
        config: &Config,
    ) -> I18nResult<()> {
        let path = root.join(relative);
        let root_data = if config.skip_locale_root_data {
            None
        } else {
            Some(locale)
        };
        let data = self.load_resource(&path, root_data, config)?;
        let namespace = namespace_from_path(relative, config)
            .map_err(|reason| I18nError::resource_load(path.display(), reason))?;

        let Value::Object(members) = data else {
            return Err(I18nError::resource_load(
                path.display(),
                "translations must be an object",
            ));
        };
        load_translation_map(&members, &namespace, locale, store, &config.namespace_delimiter);
        tracing::debug!("loaded {} translations from {}", locale, path.display());
        Ok(())
    }
}

impl ResourceLoader for FileLoader {
    fn search_translation(
        &mut self,
        key: &str,
        locale: &str,
        store: &mut TranslationStore,
        config: &Config,
    ) -> I18nResult<()> {
        let segments: Vec<&str> = key.split(config.namespace_delimiter.as_str()).collect();
        let namespace = &segments[..segments.len() - 1];
        let search = if namespace.is_empty() && !config.filename_format.contains("{namespace}") {
            &segments[..]
        } else {
            namespace
        };
        if search.is_empty() {
            tracing::debug!("'{}' has no namespace, no file to search", key);
            return Ok(());
        }

        for root in &config.load_path {
            self.search_dir(search, root, locale, store, config)?;
        }
        Ok(())
    }

    fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

fn resource_file_name(config: &Config, namespace: &str, locale: &str) -> String {
    config
        .filename_format
        .replace("{namespace}", namespace)
        .replace("{locale}", locale)
        .replace("{format}", &config.file_format)
}

fn list_dir(dir: &Path) -> I18nResult<HashSet<String>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| I18nError::resource_load(dir.display(), format!("failed to read directory: {}", e)))?;

    let mut names = HashSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            I18nError::resource_load(dir.display(), format!("error reading directory entry: {}", e))
        })?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Namespace of the keys in a resource file, from its path relative to
/// the load path root: `admin/users.en.json` gives `admin.users`.
fn namespace_from_path(relative: &Path, config: &Config) -> Result<String, String> {
    let mut parts: Vec<String> = relative
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|c| match c {
                    Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if config.filename_format.contains("{namespace}") {
        let index = config
            .filename_format
            .split('.')
            .position(|part| part == "{namespace}")
            .ok_or_else(|| "incorrect file format".to_string())?;
        let file_name = relative
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let namespace = file_name
            .split('.')
            .nth(index)
            .ok_or_else(|| "incorrect file format".to_string())?;
        if !namespace.is_empty() {
            parts.push(namespace.to_string());
        }
    }

    Ok(parts.join(&config.namespace_delimiter))
}

fn plural_tag_count(members: &Map<String, Value>) -> usize {
    PLURAL_TAGS
        .iter()
        .filter(|tag| members.contains_key(**tag))
        .count()
}

/// Add every translation of `members` to the store under `namespace`.
pub fn load_translation_map(
    members: &Map<String, Value>,
    namespace: &str,
    locale: &str,
    store: &mut TranslationStore,
    delimiter: &str,
) {
    for (key, value) in members {
        let full_key = if namespace.is_empty() {
            key.clone()
        } else {
            format!("{}{}{}", namespace, delimiter, key)
        };
        match value {
            Value::Object(inner) if plural_tag_count(inner) < 2 => {
                load_translation_map(inner, &full_key, locale, store, delimiter);
            }
            _ => match to_translation_value(value) {
                Some(translation) => store.add(locale, &full_key, translation),
                None => tracing::debug!("skipping null translation for '{}'", full_key),
            },
        }
    }
}

/// Convert parsed data into a [`TranslationValue`]. `null` has no
/// translation; numbers and booleans become their text.
pub fn to_translation_value(value: &Value) -> Option<TranslationValue> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(TranslationValue::Scalar(text.clone())),
        Value::Bool(_) | Value::Number(_) => Some(TranslationValue::Scalar(value.to_string())),
        Value::Array(items) => Some(to_list(items)),
        Value::Object(members) => Some(to_plural_forms(members)),
    }
}

/// List elements keep their position. Anything that is not a string, a
/// list or an object with plural tags is kept as raw data.
fn to_list(items: &[Value]) -> TranslationValue {
    let element = |item: &Value| match item {
        Value::String(text) => TranslationValue::Scalar(text.clone()),
        Value::Array(inner) => to_list(inner),
        Value::Object(members) if plural_tag_count(members) > 0 => to_plural_forms(members),
        _ => TranslationValue::Raw(item.clone()),
    };
    TranslationValue::List(items.iter().map(element).collect())
}

fn to_plural_forms(members: &Map<String, Value>) -> TranslationValue {
    let mut forms = PluralForms::new();
    for (tag, text) in members {
        let text = match text {
            Value::String(text) => text.clone(),
            Value::Bool(_) | Value::Number(_) => text.to_string(),
            _ => continue,
        };
        forms.set(tag, text);
    }
    TranslationValue::Plural(forms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_file_name() {
        let config = Config::default();
        assert_eq!(resource_file_name(&config, "app", "fr"), "app.fr.json");

        let config = Config {
            filename_format: "{locale}.{format}".to_string(),
            file_format: "toml".to_string(),
            ..Config::default()
        };
        assert_eq!(resource_file_name(&config, "app", "fr"), "fr.toml");
    }

    #[test]
    fn test_namespace_from_path() {
        let config = Config::default();
        assert_eq!(
            namespace_from_path(Path::new("admin/users.en.json"), &config).unwrap(),
            "admin.users"
        );
        assert_eq!(
            namespace_from_path(Path::new("app.en.json"), &config).unwrap(),
            "app"
        );

        let config = Config {
            filename_format: "{locale}.{format}".to_string(),
            ..Config::default()
        };
        assert_eq!(
            namespace_from_path(Path::new("admin/en.json"), &config).unwrap(),
            "admin"
        );

        let config = Config {
            filename_format: "{namespace}_{locale}.{format}".to_string(),
            ..Config::default()
        };
        assert!(namespace_from_path(Path::new("app_en.json"), &config).is_err());
    }

    #[test]
    fn test_load_translation_map() {
        let data = json!({
            "title": "Users",
            "count": {"one": "one user", "other": "%{count} users"},
            "menu": {"open": "Open", "one": "single"},
            "days": ["Mon", "Tue"],
            "limit": 10,
            "unset": null
        });
        let mut store = TranslationStore::new();
        load_translation_map(data.as_object().unwrap(), "users", "en", &mut store, ".");

        assert_eq!(store.get("en", "users.title").unwrap(), &TranslationValue::from("Users"));
        assert_eq!(
            store.get("en", "users.count").unwrap(),
            &TranslationValue::from(
                PluralForms::new()
                    .with_one("one user")
                    .with_other("%{count} users")
            )
        );
        // a single plural tag does not make a plural mapping
        assert_eq!(store.get("en", "users.menu.open").unwrap(), &TranslationValue::from("Open"));
        assert_eq!(store.get("en", "users.menu.one").unwrap(), &TranslationValue::from("single"));
        assert_eq!(
            store.get("en", "users.days").unwrap(),
            &TranslationValue::from(vec!["Mon", "Tue"])
        );
        assert_eq!(store.get("en", "users.limit").unwrap(), &TranslationValue::from("10"));
        assert!(!store.has("en", "users.unset"));
    }

    #[test]
    fn test_list_elements_keep_their_position() {
        let value = json!(["a %{n}", null, {"foo": "bar"}, 3, {"one": "x"}, ["b"]]);
        assert_eq!(
            to_translation_value(&value),
            Some(TranslationValue::List(vec![
                "a %{n}".into(),
                TranslationValue::Raw(Value::Null),
                TranslationValue::Raw(json!({"foo": "bar"})),
                TranslationValue::Raw(json!(3)),
                PluralForms::new().with_one("x").into(),
                TranslationValue::from(vec!["b"]),
            ]))
        );
    }

    #[test]
    fn test_supported_formats() {
        let loader = FileLoader::new();
        for format in ["json", "toml", "yml", "yaml"] {
            assert!(loader.supports(format), "{}", format);
        }
        assert!(!loader.supports("py"));
    }

    #[test]
    fn test_plural_mapping_ignores_unknown_members() {
        let value = json!({"one": "a", "other": "b", "note": "ignored"});
        assert_eq!(
            to_translation_value(&value),
            Some(PluralForms::new().with_one("a").with_other("b").into())
        );
    }
}
