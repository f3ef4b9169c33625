use thiserror::Error;

/// Errors raised while resolving translations.
///
/// Every missing-data condition has a lenient path that never produces one
/// of these; the matching `error_on_*` flag in [`Config`](crate::Config)
/// turns it into an error instead. `ResourceLoad` is always surfaced.
#[derive(Debug, Error)]
pub enum I18nError {
    /// Backing storage was unreadable or held malformed data.
    #[error("failed to load translations from {path}: {reason}")]
    ResourceLoad { path: String, reason: String },

    /// The key is absent in every locale that was tried.
    #[error("key {key} not found")]
    TranslationNotFound { key: String },

    /// Store lookup of a (locale, key) pair that was never added.
    #[error("no translation stored for key {key} in locale {locale}")]
    KeyNotFound { locale: String, key: String },

    /// A count was supplied for a value that has no plural forms.
    #[error("use of count without plural forms for key {key}")]
    PluralMismatch { key: String },

    /// None of the plural forms matched the count.
    #[error("\"many\" not defined for key {key}")]
    PluralFormMissing { key: String },

    /// A template placeholder had no value, or was not a valid placeholder.
    #[error("missing value for placeholder {placeholder}")]
    MissingPlaceholder { placeholder: String },

    /// Unknown option, badly typed option value or unreadable config file.
    #[error("config error: {0}")]
    Config(String),
}

impl I18nError {
    pub(crate) fn resource_load(path: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        I18nError::ResourceLoad {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
