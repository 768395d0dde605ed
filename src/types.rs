// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the search engine.
//!
//! These types define how indexed documents, query options, and result
//! pages fit together.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **SearchDocument**: `search_text` is a pure function of
//!   `(title, description, plain_text)`. Regenerating it from unchanged
//!   inputs must be byte-identical — caching and the determinism tests
//!   depend on it.
//!
//! - **SearchIndex**: replaced wholesale on rebuild, never patched in
//!   place. A reader holding an `Arc<SearchIndex>` sees one complete
//!   generation of the corpus, so `docs.len()` is always a count of a
//!   fully-built index.
//!
//! - **Pagination**: `total_pages = ceil(total / limit)` and
//!   `has_next == (page < total_pages)`. Out-of-range pages yield empty
//!   slices, not errors.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// One indexed document, keyed by its stable `id` (the source slug/path).
///
/// `plain_text` keeps the original casing for snippet display; `search_text`
/// is the lowercase, punctuation-free concatenation of title, description,
/// and plain text used only for scoring and suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocument {
    pub id: String,
    pub title: String,
    pub description: String,
    pub plain_text: String,
    pub search_text: String,
    /// ISO date string for recency filtering/sorting, when the source has one.
    pub date: Option<String>,
    /// Optional filter dimension, e.g. `"template"`.
    pub category: Option<String>,
    /// Timestamp used for newest-first ordering when `date` is absent.
    pub last_modified: Option<DateTime<Utc>>,
    /// Opaque pass-through map returned to callers unmodified.
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

/// The complete in-memory index: one [`SearchDocument`] per source item.
///
/// An index is immutable once built. Rebuilds construct a new `SearchIndex`
/// and swap it in atomically; "never built" is represented by the engine
/// holding no index at all, not by an empty one.
#[derive(Debug)]
pub struct SearchIndex {
    pub docs: HashMap<String, SearchDocument>,
    /// Monotonic build instant, for TTL age checks.
    pub built_at: Instant,
    /// Wall-clock build time, for `lastIndexed` reporting.
    pub built_on: DateTime<Utc>,
}

impl SearchIndex {
    /// Build an index from an already-indexed document map, stamping it now.
    pub fn new(docs: HashMap<String, SearchDocument>) -> Self {
        Self {
            docs,
            built_at: Instant::now(),
            built_on: Utc::now(),
        }
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// True when the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Age of this index relative to `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.built_at)
    }
}

// =============================================================================
// QUERY TYPES
// =============================================================================

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Descending by score.
    #[default]
    Relevance,
    /// Most recent first; documents without a usable date sort oldest.
    Date,
    /// Ascending by title, case-insensitive.
    Title,
}

/// Optional result filters, applied only to documents that already matched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Exact-match category filter.
    pub category: Option<String>,
    /// Inclusive lower bound (ISO date, `YYYY-MM-DD`).
    pub date_from: Option<String>,
    /// Inclusive upper bound (ISO date, `YYYY-MM-DD`).
    pub date_to: Option<String>,
}

impl SearchFilters {
    /// True when no filter dimension is set.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.date_from.is_none() && self.date_to.is_none()
    }
}

/// Per-query options. Out-of-range values are clamped, never rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOptions {
    pub page: usize,
    pub limit: usize,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub filters: SearchFilters,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            sort_by: SortBy::Relevance,
            filters: SearchFilters::default(),
        }
    }
}

impl QueryOptions {
    /// Clamp `page` and `limit` into safe bounds.
    ///
    /// `limit` is floored at 1 and capped at `max_limit`; `page` is floored
    /// at 1. Graceful degradation over hard failure for a read-only call.
    pub fn clamped(mut self, max_limit: usize) -> Self {
        self.page = self.page.max(1);
        self.limit = self.limit.clamp(1, max_limit.max(1));
        self
    }
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// What users see when they get a search result. Derived per query, never
/// stored in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub description: String,
    pub snippet: String,
    pub score: u32,
    pub date: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    /// Derived from `id`: `/` + slug.
    pub url: String,
}

/// Page metadata accompanying a slice of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// An empty page, used for empty-query and error responses.
    pub fn zeroed(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            total: 0,
            total_pages: 0,
            has_next: false,
            has_prev: false,
        }
    }
}

/// The terminal shape of every `search` call: a failed search is a
/// well-formed empty response with `error` set, never a panic or an `Err`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub pagination: Pagination,
    pub query: String,
    /// Wall-clock duration of scoring and ranking in milliseconds.
    /// Excludes any rebuild triggered by the same call.
    #[serde(rename = "searchTime")]
    pub search_time_ms: f64,
    pub index_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_indexed: Option<DateTime<Utc>>,
    /// Set when the fallback path answered this query.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Read-only introspection of the engine, no side effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub enabled: bool,
    pub index_size: usize,
    pub last_indexed: Option<DateTime<Utc>>,
    /// Seconds since the last rebuild, if any.
    pub index_age_secs: Option<u64>,
    pub ttl_secs: u64,
    pub needs_reindex: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_clamp_floors() {
        let opts = QueryOptions {
            page: 0,
            limit: 0,
            ..Default::default()
        }
        .clamped(100);
        assert_eq!(opts.page, 1);
        assert_eq!(opts.limit, 1);
    }

    #[test]
    fn test_options_clamp_caps_limit() {
        let opts = QueryOptions {
            page: 3,
            limit: 9999,
            ..Default::default()
        }
        .clamped(100);
        assert_eq!(opts.page, 3);
        assert_eq!(opts.limit, 100);
    }

    #[test]
    fn test_sort_by_serde_names() {
        assert_eq!(
            serde_json::to_string(&SortBy::Relevance).unwrap(),
            "\"relevance\""
        );
        assert_eq!(serde_json::to_string(&SortBy::Date).unwrap(), "\"date\"");
        assert_eq!(serde_json::to_string(&SortBy::Title).unwrap(), "\"title\"");
    }

    #[test]
    fn test_index_stamps_build_time() {
        let index = SearchIndex::new(HashMap::new());
        assert!(index.is_empty());
        assert!(index.age(Instant::now()) < Duration::from_secs(1));
    }

    #[test]
    fn test_zeroed_pagination_is_safe() {
        let p = Pagination::zeroed(0, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 1);
        assert_eq!(p.total, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = SearchResponse {
            results: vec![],
            pagination: Pagination::zeroed(1, 10),
            query: "q".to_string(),
            search_time_ms: 0.5,
            index_size: 0,
            last_indexed: None,
            fallback: false,
            error: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"searchTime\""));
        assert!(json.contains("\"indexSize\""));
        assert!(json.contains("\"totalPages\""));
        assert!(!json.contains("\"fallback\""));
        assert!(!json.contains("\"error\""));
    }
}
