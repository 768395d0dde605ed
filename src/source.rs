// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The collaborator contract: where documents come from.
//!
//! The engine never owns content. The surrounding system (page store,
//! CMS, wiki) implements [`DocumentSource`] and hands back [`SourceItem`]s
//! on demand: the full corpus for index rebuilds, and a native substring
//! search for the fallback path when indexing is disabled. The engine
//! never writes to the source.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// One raw item from the document source, before indexing.
///
/// `title` and `description` default to `id` when absent; `body` is the
/// raw (typically markdown) content the normalizer strips.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceItem {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: String,
    pub date: Option<String>,
    pub category: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    /// Opaque metadata passed through to search results unmodified.
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl SourceItem {
    /// Convenience constructor for the common id + body case.
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
            ..Self::default()
        }
    }
}

/// The external content layer the engine indexes.
///
/// # Bounds
///
/// - `Send + Sync`: the engine is shared across threads and calls the
///   source from whichever thread triggers a rebuild.
pub trait DocumentSource: Send + Sync {
    /// Fetch the full corpus in one call.
    ///
    /// Implementations should return everything up to the engine's corpus
    /// bound; the engine truncates anything beyond it.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying store is unavailable. The
    /// engine surfaces this as an error response, never a panic.
    fn list_all(&self) -> Result<Vec<SourceItem>>;

    /// Native substring search, used only by the fallback path when
    /// indexing is disabled.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying store is unavailable.
    fn search_substring(&self, query: &str) -> Result<Vec<SourceItem>>;
}

impl<T: DocumentSource + ?Sized> DocumentSource for std::sync::Arc<T> {
    fn list_all(&self) -> Result<Vec<SourceItem>> {
        (**self).list_all()
    }

    fn search_substring(&self, query: &str) -> Result<Vec<SourceItem>> {
        (**self).search_substring(query)
    }
}
