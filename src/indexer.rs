// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning raw source items into indexed documents.
//!
//! One [`SourceItem`] becomes one [`SearchDocument`]: the body is stripped
//! to plain text, the search text is composed from title + description +
//! plain text, and metadata passes through untouched. A malformed item is
//! logged and skipped; it never aborts the rebuild.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{Error, Result};
use crate::source::SourceItem;
use crate::text::{extract_plain_text, normalize};
use crate::types::SearchDocument;

/// Compose the scoring text from a document's display fields.
///
/// Pure function of its inputs: unchanged inputs produce byte-identical
/// output. Determinism here is load-bearing for caching and tests.
pub fn compose_search_text(title: &str, description: &str, plain_text: &str) -> String {
    normalize(&format!("{} {} {}", title, description, plain_text))
}

/// Index a single source item.
///
/// Title and description default to the item's `id` when absent or empty.
///
/// # Errors
///
/// Returns [`Error::MalformedDocument`] when the item has a blank `id` —
/// documents without a stable identifier cannot be keyed into the index.
pub fn index_item(item: &SourceItem) -> Result<SearchDocument> {
    if item.id.trim().is_empty() {
        return Err(Error::malformed("<unknown>", "blank id"));
    }

    let title = item
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| item.id.clone());
    let description = item
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| item.id.clone());

    let plain_text = extract_plain_text(&item.body);
    let search_text = compose_search_text(&title, &description, &plain_text);

    Ok(SearchDocument {
        id: item.id.clone(),
        title,
        description,
        plain_text,
        search_text,
        date: item.date.clone(),
        category: item.category.clone(),
        last_modified: item.last_modified,
        metadata: item.metadata.clone(),
    })
}

/// Index a whole corpus into a fresh document map.
///
/// Malformed items are logged at `warn` and skipped. Later items with a
/// duplicate id replace earlier ones, matching source ordering semantics.
pub fn build_documents(items: Vec<SourceItem>) -> HashMap<String, SearchDocument> {
    let mut docs = HashMap::with_capacity(items.len());
    for item in items {
        match index_item(&item) {
            Ok(doc) => {
                docs.insert(doc.id.clone(), doc);
            }
            Err(err) => {
                warn!(id = %item.id, error = %err, "skipping unindexable document");
            }
        }
    }
    docs
}
