//! Resource loading.
//!
//! The resolver calls a [`ResourceLoader`] when a key is missing from the
//! store. A loader looks for backing data that may hold the key and adds
//! whatever it finds to the store. Finding nothing is not an error; data
//! that cannot be read or parsed is.
//!
//! [`FileLoader`] searches the directories of `load_path` for files named
//! after the key's namespace:
//!
//! ```text
//! translations/
//! ├── app.en.json        # app.title, app.menu.open, ...
//! └── admin/
//!     └── users.fr.json  # admin.users.count, ...
//! ```

pub mod file;
pub mod format;

pub use file::FileLoader;
pub use format::{FormatParser, JsonParser, TomlParser, YamlParser};

use crate::config::Config;
use crate::error::I18nResult;
use crate::store::TranslationStore;

/// Populates a [`TranslationStore`] from backing storage on demand.
pub trait ResourceLoader: Send {
    /// Try to load translations that may contain `key` for `locale`.
    ///
    /// Implementations add everything they load with
    /// [`TranslationStore::add`], so existing translations are kept.
    fn search_translation(
        &mut self,
        key: &str,
        locale: &str,
        store: &mut TranslationStore,
        config: &Config,
    ) -> I18nResult<()>;

    /// Drop any cached resource data.
    fn clear_cache(&mut self) {}
}

/// A loader that never finds anything, for stores filled in code.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLoader;

impl ResourceLoader for NoopLoader {
    fn search_translation(
        &mut self,
        _key: &str,
        _locale: &str,
        _store: &mut TranslationStore,
        _config: &Config,
    ) -> I18nResult<()> {
        Ok(())
    }
}
