//! Local accounts and the "remember me" session marker.
//!
//! This is a demo credential store: passwords are kept in plain text and
//! compared verbatim. It is not a security boundary.

use rust_i18n::t;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::locale::Language;
use crate::store::kv::{self, KeyValueStore, StoreError};
use crate::store::schema::{ACCOUNTS_KEY, SESSION_KEY};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Account {
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .or_else(|| self.email.chars().next())
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('?')
    }
}

#[derive(Clone, Debug, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email and password are required")]
    MissingFields,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("an account with this email already exists")]
    AlreadyExists,
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl AuthError {
    /// Inline message shown under the auth form.
    pub fn localized(&self, lang: Language) -> String {
        let locale = lang.code();
        match self {
            AuthError::MissingFields => t!("auth.error.missing_fields", locale = locale),
            AuthError::InvalidCredentials => t!("auth.error.invalid_credentials", locale = locale),
            AuthError::PasswordMismatch => t!("auth.error.password_mismatch", locale = locale),
            AuthError::AlreadyExists => t!("auth.error.already_exists", locale = locale),
            AuthError::Storage(err) => {
                t!("auth.error.storage", locale = locale, detail = err.to_string())
            }
        }
        .into_owned()
    }
}

pub struct AccountStore<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> AccountStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Read failures are errors, never an empty list: `signup` rewrites the
    /// whole blob from this.
    pub fn accounts(&self) -> Result<Vec<Account>, StoreError> {
        kv::try_load(self.store, ACCOUNTS_KEY)
    }

    pub fn find(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts()?.into_iter().find(|a| a.email == email))
    }

    pub fn login(&self, email: &str, password: &str, remember: bool) -> Result<Account, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let account = self
            .accounts()?
            .into_iter()
            .find(|a| a.email == email && a.password == password);

        match account {
            Some(account) => {
                if remember {
                    self.remember(&account.email)?;
                }
                tracing::info!(remember, "login succeeded");
                Ok(account)
            }
            None => {
                tracing::warn!("login rejected: no matching credentials");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Validation order: missing fields, password confirmation, duplicate email.
    pub fn signup(&self, form: &SignupForm, remember: bool) -> Result<Account, AuthError> {
        if form.email.is_empty() || form.password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if form.password != form.confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let mut accounts = self.accounts()?;
        if accounts.iter().any(|a| a.email == form.email) {
            tracing::warn!("signup rejected: email already registered");
            return Err(AuthError::AlreadyExists);
        }

        let account = Account {
            name: form.name.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
        };
        accounts.push(account.clone());
        kv::save(self.store, ACCOUNTS_KEY, &accounts)?;

        if remember {
            self.remember(&account.email)?;
        }
        tracing::info!(total_accounts = accounts.len(), remember, "account created");
        Ok(account)
    }

    /// Account named by the session marker, if it still exists.
    pub fn restore_session(&self) -> Option<Account> {
        let email: Option<String> = kv::load(self.store, SESSION_KEY);
        let account = self.find(&email?).unwrap_or_else(|err| {
            tracing::warn!(%err, "could not read accounts to restore session");
            None
        });
        if account.is_none() {
            tracing::debug!("session marker points at an unknown account");
        }
        account
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(SESSION_KEY)?;
        tracing::info!("session cleared");
        Ok(())
    }

    fn remember(&self, email: &str) -> Result<(), StoreError> {
        kv::save(self.store, SESSION_KEY, email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::kv::MemoryStore;

    fn form(name: &str, email: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm: confirm.to_string(),
        }
    }

    /// Holds data but cannot read it back.
    struct UnreadableStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for UnreadableStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Io {
                key: key.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        }
        fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.inner.put(key, value)
        }
        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_unreadable_store_never_overwrites_accounts() {
        let inner = MemoryStore::new();
        let existing = r#"[{"name":"A","email":"a@x.in","password":"p"},{"name":"B","email":"b@x.in","password":"p"}]"#;
        inner.put(ACCOUNTS_KEY, existing).unwrap();
        let store = UnreadableStore { inner };
        let accounts = AccountStore::new(&store);

        let err = accounts
            .signup(&form("C", "c@x.in", "p", "p"), true)
            .unwrap_err();
        assert!(matches!(err, AuthError::Storage(_)));
        assert_eq!(
            store.inner.get(ACCOUNTS_KEY).unwrap().as_deref(),
            Some(existing)
        );
        assert!(store.inner.get(SESSION_KEY).unwrap().is_none());

        assert!(matches!(
            accounts.login("a@x.in", "p", false),
            Err(AuthError::Storage(_))
        ));
        assert!(accounts.restore_session().is_none());
    }

    #[test]
    fn test_signup_then_login() {
        let store = MemoryStore::new();
        let accounts = AccountStore::new(&store);
        let created = accounts
            .signup(&form("Asha", "asha@example.com", "pw", "pw"), false)
            .unwrap();
        assert_eq!(created.name, "Asha");

        let logged_in = accounts.login("asha@example.com", "pw", false).unwrap();
        assert_eq!(logged_in, created);
    }

    #[test]
    fn test_signup_duplicate_email_rejected_list_unchanged() {
        let store = MemoryStore::new();
        let accounts = AccountStore::new(&store);
        accounts
            .signup(&form("A", "a@x.in", "one", "one"), false)
            .unwrap();
        let before = accounts.accounts().unwrap();

        let err = accounts
            .signup(&form("B", "a@x.in", "two", "two"), false)
            .unwrap_err();
        assert!(matches!(err, AuthError::AlreadyExists));
        assert_eq!(accounts.accounts().unwrap(), before);
    }

    #[test]
    fn test_email_match_is_case_sensitive() {
        let store = MemoryStore::new();
        let accounts = AccountStore::new(&store);
        accounts
            .signup(&form("A", "a@x.in", "pw", "pw"), false)
            .unwrap();
        assert!(
            accounts
                .signup(&form("A2", "A@x.in", "pw", "pw"), false)
                .is_ok()
        );
        assert_eq!(accounts.accounts().unwrap().len(), 2);
    }

    #[test]
    fn test_password_mismatch_checked_before_duplicate() {
        let store = MemoryStore::new();
        let accounts = AccountStore::new(&store);
        accounts
            .signup(&form("A", "a@x.in", "pw", "pw"), false)
            .unwrap();
        let err = accounts
            .signup(&form("A", "a@x.in", "pw", "other"), false)
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
    }

    #[test]
    fn test_missing_fields() {
        let store = MemoryStore::new();
        let accounts = AccountStore::new(&store);
        assert!(matches!(
            accounts.login("", "pw", false),
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            accounts.signup(&form("A", "a@x.in", "", ""), false),
            Err(AuthError::MissingFields)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let store = MemoryStore::new();
        let accounts = AccountStore::new(&store);
        accounts
            .signup(&form("A", "a@x.in", "pw", "pw"), false)
            .unwrap();
        assert!(matches!(
            accounts.login("a@x.in", "nope", true),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(store.get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_remember_me_restores_session_until_logout() {
        let store = MemoryStore::new();
        let accounts = AccountStore::new(&store);
        accounts
            .signup(&form("A", "a@x.in", "pw", "pw"), false)
            .unwrap();
        assert!(accounts.restore_session().is_none());

        accounts.login("a@x.in", "pw", true).unwrap();
        assert_eq!(accounts.restore_session().unwrap().email, "a@x.in");

        accounts.logout().unwrap();
        assert!(accounts.restore_session().is_none());
    }

    #[test]
    fn test_signup_with_remember_sets_session() {
        let store = MemoryStore::new();
        let accounts = AccountStore::new(&store);
        accounts
            .signup(&form("A", "a@x.in", "pw", "pw"), true)
            .unwrap();
        assert_eq!(accounts.restore_session().unwrap().name, "A");
    }

    #[test]
    fn test_localized_messages() {
        assert_eq!(
            AuthError::PasswordMismatch.localized(Language::En),
            "Passwords don't match"
        );
        assert_eq!(
            AuthError::InvalidCredentials.localized(Language::Ta),
            "தவறான மின்னஞ்சல் அல்லது கடவுச்சொல்"
        );
    }

    #[test]
    fn test_initial_falls_back_to_email() {
        let account = Account {
            name: String::new(),
            email: "zed@x.in".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(account.initial(), 'Z');
    }
}
