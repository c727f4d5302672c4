use std::fs;

use mentorbridge::account::{AccountStore, AuthError, SignupForm};
use mentorbridge::locale::Language;
use mentorbridge::store::schema::{self, ACCOUNTS_KEY, SESSION_KEY};
use mentorbridge::store::{FileStore, KeyValueStore};
use tempfile::TempDir;

fn signup_form(email: &str) -> SignupForm {
    SignupForm {
        name: "Meena".to_string(),
        email: email.to_string(),
        password: "letmein".to_string(),
        confirm: "letmein".to_string(),
    }
}

fn file_store(dir: &TempDir) -> FileStore {
    FileStore::with_base_dir(dir.path().join("mentorbridge")).unwrap()
}

#[test]
fn signup_persists_across_store_instances() {
    let dir = TempDir::new().unwrap();
    {
        let store = file_store(&dir);
        AccountStore::new(&store)
            .signup(&signup_form("meena@example.com"), true)
            .unwrap();
    }

    let store = file_store(&dir);
    let accounts = AccountStore::new(&store);
    assert_eq!(accounts.accounts().unwrap().len(), 1);
    assert_eq!(
        accounts.restore_session().map(|a| a.name),
        Some("Meena".to_string())
    );

    let on_disk = fs::read_to_string(dir.path().join("mentorbridge").join("accounts.json")).unwrap();
    assert!(on_disk.contains("meena@example.com"));
}

#[test]
fn duplicate_signup_leaves_accounts_unchanged() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    let accounts = AccountStore::new(&store);
    accounts.signup(&signup_form("dup@example.com"), false).unwrap();
    let before = store.get(ACCOUNTS_KEY).unwrap();

    let err = accounts
        .signup(&signup_form("dup@example.com"), false)
        .unwrap_err();
    assert!(matches!(err, AuthError::AlreadyExists));
    assert_eq!(store.get(ACCOUNTS_KEY).unwrap(), before);
    assert_eq!(
        err.localized(Language::En),
        "User already exists. Please login."
    );
}

#[test]
fn bad_login_is_rejected_without_side_effects() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    let accounts = AccountStore::new(&store);
    accounts.signup(&signup_form("a@example.com"), false).unwrap();

    let err = accounts.login("a@example.com", "wrong", true).unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(store.get(SESSION_KEY).unwrap().is_none());
    assert_eq!(accounts.accounts().unwrap().len(), 1);
}

#[test]
fn login_without_remember_does_not_set_session() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    let accounts = AccountStore::new(&store);
    accounts.signup(&signup_form("b@example.com"), false).unwrap();

    let account = accounts.login("b@example.com", "letmein", false).unwrap();
    assert_eq!(account.email, "b@example.com");
    assert!(accounts.restore_session().is_none());

    accounts.login("b@example.com", "letmein", true).unwrap();
    assert!(accounts.restore_session().is_some());
    accounts.logout().unwrap();
    assert!(accounts.restore_session().is_none());
}

#[test]
fn corrupt_accounts_file_is_kept_aside_and_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    store.put(ACCOUNTS_KEY, "{not json").unwrap();

    let accounts = AccountStore::new(&store);
    assert!(accounts.accounts().unwrap().is_empty());
    accounts.signup(&signup_form("c@example.com"), false).unwrap();
    assert_eq!(accounts.accounts().unwrap().len(), 1);

    let backup = dir.path().join("mentorbridge").join("accounts_corrupt.json");
    assert_eq!(fs::read_to_string(backup).unwrap(), "{not json");
}

#[test]
fn language_choice_survives_restart() {
    let dir = TempDir::new().unwrap();
    schema::save_language(&file_store(&dir), Language::Ta).unwrap();
    assert_eq!(schema::load_language(&file_store(&dir)), Language::Ta);
}
