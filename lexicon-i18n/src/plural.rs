//! Plural form selection.
//!
//! This is a fixed ladder, not CLDR plural rules: the same tags are tried
//! in the same order for every locale.
//!
//! | count | form tried |
//! |-------|------------|
//! | 0 | `zero` |
//! | 1 | `one` |
//! | other counts up to `plural_few` | `few` |
//! | any | `other`, then `many` |
//!
//! `other` is tried before `many`. This ordering predates `many` being
//! treated as the catch-all and is kept for compatibility with existing
//! translation files.

use std::borrow::Cow;

use crate::config::Config;
use crate::error::{I18nError, I18nResult};
use crate::value::{PluralForms, TranslationValue};

/// Pick the form of `forms` for `count`. `None` means no count is known,
/// which only the catch-all forms can serve.
pub fn select_form(forms: &PluralForms, count: Option<i64>, plural_few: i64) -> Option<&str> {
    let exact = match count {
        Some(0) => forms.zero.as_deref(),
        Some(1) => forms.one.as_deref(),
        Some(n) if n <= plural_few => forms.few.as_deref(),
        _ => None,
    };
    exact
        .or(forms.other.as_deref())
        .or(forms.many.as_deref())
}

/// Resolve `value` to a single template for `count`.
///
/// A value without plural forms is a mismatch; a mapping with no usable
/// form is a missing form. With `error_on_missing_plural` unset, a scalar
/// mismatch yields the scalar itself and every other failure yields `key`.
pub fn pluralize<'a>(
    key: &'a str,
    value: &'a TranslationValue,
    count: Option<i64>,
    config: &Config,
) -> I18nResult<Cow<'a, str>> {
    let forms = match value {
        TranslationValue::Plural(forms) => forms,
        TranslationValue::Scalar(text) => {
            return degrade(
                I18nError::PluralMismatch {
                    key: key.to_string(),
                },
                text,
                config,
            );
        }
        TranslationValue::List(_) | TranslationValue::Raw(_) => {
            return degrade(
                I18nError::PluralMismatch {
                    key: key.to_string(),
                },
                key,
                config,
            );
        }
    };

    match select_form(forms, count, config.plural_few) {
        Some(form) => Ok(Cow::Borrowed(form)),
        None => degrade(
            I18nError::PluralFormMissing {
                key: key.to_string(),
            },
            key,
            config,
        ),
    }
}

fn degrade<'a>(error: I18nError, fallback: &'a str, config: &Config) -> I18nResult<Cow<'a, str>> {
    if config.error_on_missing_plural {
        return Err(error);
    }
    tracing::debug!("{}, using '{}'", error, fallback);
    Ok(Cow::Borrowed(fallback))
}
