//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::indexer::compose_search_text;
use crate::source::{DocumentSource, SourceItem};
use crate::types::SearchDocument;

/// Create an indexed document directly from plain-text fields.
///
/// `search_text` is composed the same way the indexer composes it, so
/// scoring tests see exactly what a rebuilt index would hold.
pub fn make_document(id: &str, title: &str, description: &str, plain_text: &str) -> SearchDocument {
    SearchDocument {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        plain_text: plain_text.to_string(),
        search_text: compose_search_text(title, description, plain_text),
        date: None,
        category: None,
        last_modified: None,
        metadata: Default::default(),
    }
}

/// Create a source item with a title and markdown body.
pub fn make_item(id: &str, title: &str, body: &str) -> SourceItem {
    SourceItem {
        id: id.to_string(),
        title: Some(title.to_string()),
        body: body.to_string(),
        ..Default::default()
    }
}

/// An in-memory document source over a fixed corpus.
///
/// Counts `list_all` calls (for single-flight assertions) and can be
/// switched into a failing mode to exercise the error paths.
#[derive(Debug, Default)]
pub struct StaticSource {
    items: Vec<SourceItem>,
    list_calls: AtomicUsize,
    failing: AtomicBool,
}

impl StaticSource {
    pub fn new(items: Vec<SourceItem>) -> Self {
        Self {
            items,
            list_calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Number of times `list_all` has been invoked.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Make every source call fail with a source-unavailable error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl DocumentSource for StaticSource {
    fn list_all(&self) -> Result<Vec<SourceItem>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::source("static source set to fail"));
        }
        Ok(self.items.clone())
    }

    fn search_substring(&self, query: &str) -> Result<Vec<SourceItem>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::source("static source set to fail"));
        }
        let needle = query.to_lowercase();
        Ok(self
            .items
            .iter()
            .filter(|item| {
                item.body.to_lowercase().contains(&needle)
                    || item
                        .title
                        .as_deref()
                        .is_some_and(|t| t.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect())
    }
}
