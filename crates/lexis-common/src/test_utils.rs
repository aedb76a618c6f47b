//! Test utilities and shared test helpers for Lexis.
//!
//! This module provides logging setup, temporary directories and translation
//! fixtures that can be used across all crates in the workspace.

use crate::types::{PluralCategory, PluralForms, TranslationValue, Variant};
use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
#[allow(dead_code)]
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        fmt().with_test_writer().with_env_filter(filter).init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Full four-category plural mapping used across tests.
pub fn mail_plural() -> PluralForms {
    PluralForms::new()
        .with(PluralCategory::Zero, "no mail")
        .with(PluralCategory::One, "1 mail")
        .with(PluralCategory::Few, "only %{count} mails")
        .with(PluralCategory::Many, "%{count} mails")
}

/// The `en` translations most formatter tests start from.
pub fn sample_translations() -> Vec<(&'static str, TranslationValue)> {
    vec![
        ("foo.normal_key", "normal_value".into()),
        ("foo.hi", "Hello %{name} !".into()),
        (
            "foo.basic_plural",
            PluralForms::new()
                .with(PluralCategory::One, "1 elem")
                .with(PluralCategory::Many, "%{count} elems")
                .into(),
        ),
        ("foo.plural", mail_plural().into()),
        (
            "foo.bad_plural",
            PluralForms::new().with(PluralCategory::Zero, "no elems").into(),
        ),
        ("foo.custom_func", "%{count} day%{p(|s)}".into()),
        ("foo.inexistent_func", "%{a(b|c)}".into()),
        (
            "foo.welcome",
            vec![
                Variant::from("Hi %{name}"),
                Variant::from(
                    PluralForms::new()
                        .with(PluralCategory::One, "Hello %{name}")
                        .with(PluralCategory::Many, "Hello %{name} and friends"),
                ),
            ]
            .into(),
        ),
    ]
}

/// Property-based testing strategies using proptest.
#[cfg(any(test, feature = "proptest"))]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for one key segment.
    pub fn key_segment_strategy() -> impl Strategy<Value = String> {
        r"[a-z][a-z0-9_]{0,7}".prop_map(|s| s.to_string())
    }

    /// Strategy for keys of one to four segments joined with `delimiter`.
    pub fn key_strategy(delimiter: &'static str) -> impl Strategy<Value = String> {
        proptest::collection::vec(key_segment_strategy(), 1..=4)
            .prop_map(move |segments| segments.join(delimiter))
    }

    /// Strategy for templates without any placeholder delimiter.
    pub fn plain_template_strategy() -> impl Strategy<Value = String> {
        r"[a-zA-Z0-9 .,!?{}()|]{0,40}".prop_map(|s| s.to_string())
    }
}
