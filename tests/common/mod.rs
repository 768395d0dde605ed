//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use wikisearch::testing::StaticSource;
use wikisearch::{SearchEngine, SourceItem};

static TRACING: Once = Once::new();

/// Install a tracing subscriber once per test binary so rebuild and
/// skip logs are visible under `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A small wiki-like corpus with titles, categories, and dates.
pub fn wiki_corpus() -> Vec<SourceItem> {
    vec![
        item(
            "hello-world",
            "Hello World",
            "Greetings page",
            "This page says world once.",
            Some("2024-01-10"),
            Some("page"),
        ),
        item(
            "goodbye-world",
            "Goodbye World",
            "Farewell page",
            "The world ends here. Goodbye cruel world.",
            Some("2024-03-05"),
            Some("page"),
        ),
        item(
            "hello-again",
            "Hello Again",
            "Returning page",
            "Nothing relevant in this body.",
            Some("2023-11-20"),
            Some("template"),
        ),
    ]
}

pub fn item(
    id: &str,
    title: &str,
    description: &str,
    body: &str,
    date: Option<&str>,
    category: Option<&str>,
) -> SourceItem {
    SourceItem {
        id: id.to_string(),
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        body: body.to_string(),
        date: date.map(str::to_string),
        category: category.map(str::to_string),
        ..Default::default()
    }
}

pub fn engine_over(items: Vec<SourceItem>) -> SearchEngine<StaticSource> {
    init_tracing();
    SearchEngine::new(StaticSource::new(items))
}
