use crate::locale::Language;
use crate::store::kv::{self, KeyValueStore, StoreError};

pub const ACCOUNTS_KEY: &str = "accounts";
pub const SESSION_KEY: &str = "session";
pub const LANGUAGE_KEY: &str = "language";
pub const TYPING_HISTORY_KEY: &str = "typing_history";

pub fn load_language(store: &dyn KeyValueStore) -> Language {
    kv::load::<Option<Language>>(store, LANGUAGE_KEY).unwrap_or_default()
}

pub fn save_language(store: &dyn KeyValueStore, language: Language) -> Result<(), StoreError> {
    kv::save(store, LANGUAGE_KEY, &language)
}
