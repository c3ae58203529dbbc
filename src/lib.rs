// Everything lives in the library so the binary, benchmarks and integration
// tests share one module tree and one set of translations.
rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod event;
pub mod logging;
pub mod ui;
