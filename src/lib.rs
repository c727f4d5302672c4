// The binary entry point is main.rs; everything it drives lives here so the
// integration tests and criterion benches can reach the same types.

rust_i18n::i18n!("locales", fallback = "en");

pub mod account;
pub mod app;
pub mod chat;
pub mod config;
pub mod event;
pub mod locale;
pub mod mode;
pub mod store;
pub mod typing;
pub mod ui;
