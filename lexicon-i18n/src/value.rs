use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Plural tags recognised in translation data, in declaration order.
pub const PLURAL_TAGS: [&str; 5] = ["zero", "one", "few", "many", "other"];

/// Plural variants of a message, keyed by tag.
///
/// Any subset of forms may be present. Selection by count lives in
/// [`crate::plural`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PluralForms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub few: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub many: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl PluralForms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zero(mut self, text: &str) -> Self {
        self.zero = Some(text.to_string());
        self
    }

    pub fn with_one(mut self, text: &str) -> Self {
        self.one = Some(text.to_string());
        self
    }

    pub fn with_few(mut self, text: &str) -> Self {
        self.few = Some(text.to_string());
        self
    }

    pub fn with_many(mut self, text: &str) -> Self {
        self.many = Some(text.to_string());
        self
    }

    pub fn with_other(mut self, text: &str) -> Self {
        self.other = Some(text.to_string());
        self
    }

    /// Set a form by tag name. Returns false for an unknown tag.
    pub fn set(&mut self, tag: &str, text: String) -> bool {
        let slot = match tag {
            "zero" => &mut self.zero,
            "one" => &mut self.one,
            "few" => &mut self.few,
            "many" => &mut self.many,
            "other" => &mut self.other,
            _ => return false,
        };
        *slot = Some(text);
        true
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        match tag {
            "zero" => self.zero.as_deref(),
            "one" => self.one.as_deref(),
            "few" => self.few.as_deref(),
            "many" => self.many.as_deref(),
            "other" => self.other.as_deref(),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        PLURAL_TAGS.iter().all(|tag| self.get(tag).is_none())
    }
}

/// A stored translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TranslationValue {
    /// A plain template string.
    Scalar(String),
    /// Count-dependent variants.
    Plural(PluralForms),
    /// An enumerated list of translations.
    List(Vec<TranslationValue>),
    /// List data that is not a translation (`null`, numbers, objects
    /// without plural tags), kept exactly as parsed.
    Raw(Value),
}

impl TranslationValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TranslationValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// True for the elements a list may hold and still be formatted.
    pub fn is_translatable(&self) -> bool {
        matches!(self, TranslationValue::Scalar(_) | TranslationValue::Plural(_))
    }
}

impl From<&str> for TranslationValue {
    fn from(value: &str) -> Self {
        TranslationValue::Scalar(value.to_string())
    }
}

impl From<String> for TranslationValue {
    fn from(value: String) -> Self {
        TranslationValue::Scalar(value)
    }
}

impl From<PluralForms> for TranslationValue {
    fn from(value: PluralForms) -> Self {
        TranslationValue::Plural(value)
    }
}

impl<T: Into<TranslationValue>> From<Vec<T>> for TranslationValue {
    fn from(value: Vec<T>) -> Self {
        TranslationValue::List(value.into_iter().map(Into::into).collect())
    }
}

/// The result of resolving a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Translation {
    Text(String),
    /// Formatted list elements. Elements that could not be formatted are
    /// passed through as stored.
    List(Vec<TranslationValue>),
}

impl Translation {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Translation::Text(text) => Some(text),
            Translation::List(_) => None,
        }
    }

    /// Text of every scalar element. A text result yields one item.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Translation::Text(text) => vec![text.as_str()],
            Translation::List(items) => items.iter().filter_map(TranslationValue::as_str).collect(),
        }
    }
}

/// Lists print their scalar elements one per line. Plural forms, nested
/// lists and raw data are left out; serialize the translation to keep them.
impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Translation::Text(text) => write!(f, "{}", text),
            Translation::List(_) => write!(f, "{}", self.texts().join("\n")),
        }
    }
}

impl PartialEq<&str> for Translation {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_forms_by_tag() {
        let mut forms = PluralForms::new().with_one("a cat");
        assert!(forms.set("other", "cats".to_string()));
        assert!(!forms.set("several", "cats".to_string()));
        assert_eq!(forms.get("one"), Some("a cat"));
        assert_eq!(forms.get("other"), Some("cats"));
        assert_eq!(forms.get("zero"), None);
        assert!(!forms.is_empty());
        assert!(PluralForms::new().is_empty());
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(
            TranslationValue::from("hi"),
            TranslationValue::Scalar("hi".to_string())
        );
        assert_eq!(
            TranslationValue::from(vec!["a", "b"]),
            TranslationValue::List(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn test_translation_display() {
        assert_eq!(Translation::Text("hi".into()).to_string(), "hi");
        let list = Translation::List(vec![
            "first".into(),
            PluralForms::new().with_one("x").into(),
            "second".into(),
        ]);
        assert_eq!(list.texts(), vec!["first", "second"]);
        assert_eq!(list.to_string(), "first\nsecond");
        assert!(Translation::Text("hi".into()) == "hi");
    }

    #[test]
    fn test_serialize_untagged() {
        let list = Translation::List(vec!["a".into(), PluralForms::new().with_one("b").into()]);
        assert_eq!(
            serde_json::to_string(&list).unwrap(),
            r#"["a",{"one":"b"}]"#
        );
    }

    #[test]
    fn test_display_omits_what_serializing_keeps() {
        let list = Translation::List(vec![
            "a".into(),
            TranslationValue::Raw(Value::Null),
            TranslationValue::Raw(serde_json::json!({"foo": "bar"})),
            TranslationValue::List(vec!["b".into()]),
        ]);
        assert_eq!(list.to_string(), "a");
        assert_eq!(
            serde_json::to_string(&list).unwrap(),
            r#"["a",null,{"foo":"bar"},["b"]]"#
        );
    }

    #[test]
    fn test_is_translatable() {
        assert!(TranslationValue::from("a").is_translatable());
        assert!(TranslationValue::from(PluralForms::new().with_one("a")).is_translatable());
        assert!(!TranslationValue::from(vec!["a"]).is_translatable());
        assert!(!TranslationValue::Raw(Value::from(3)).is_translatable());
    }
}
