// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query engine facade.
//!
//! [`SearchEngine`] owns the index and orchestrates every query:
//! ensure the index is fresh → normalize the query → score every document
//! → filter → rank → paginate → attach snippets. When indexing is
//! disabled it bypasses the index entirely and delegates to the document
//! source's native substring search.
//!
//! # Concurrency
//!
//! The index lives behind `RwLock<Option<Arc<SearchIndex>>>`. Rebuilds
//! construct a complete new index and swap the `Arc`, so a concurrent
//! reader sees either the fully-old or fully-new generation, never a
//! mixture. A dedicated rebuild mutex with a double-check after
//! acquisition makes rebuilds single-flight: under concurrent cold-cache
//! load the corpus is fetched once, not once per waiting query.
//!
//! Scoring and snippet generation are pure reads over an `Arc` snapshot.
//! No background tasks run; staleness is checked lazily per query.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::freshness::{FreshnessPolicy, DEFAULT_TTL};
use crate::indexer::{build_documents, index_item};
use crate::rank::{self, Match};
use crate::scoring;
use crate::snippet::{self, DEFAULT_SNIPPET_LENGTH};
use crate::source::DocumentSource;
use crate::text::normalize;
use crate::types::{
    IndexStats, Pagination, QueryOptions, SearchDocument, SearchIndex, SearchResponse,
    SearchResult,
};

/// Engine tuning knobs. The defaults match the systems this engine is
/// meant to slot into: a few thousand documents at most, 5-minute TTL.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// When false, every query takes the fallback path and the index is
    /// never built or consulted.
    pub enabled: bool,
    /// Maximum index age before a query forces a rebuild.
    pub ttl: Duration,
    /// Upper bound for the per-page `limit` option.
    pub max_limit: usize,
    /// Snippet window length, in characters.
    pub snippet_length: usize,
    /// Corpus fetch bound: items past this count are not indexed.
    pub max_corpus: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: DEFAULT_TTL,
            max_limit: 100,
            snippet_length: DEFAULT_SNIPPET_LENGTH,
            max_corpus: 1000,
        }
    }
}

/// The in-process full-text search engine.
///
/// One engine instance owns one index over one document source. Callers
/// hold a reference (typically inside an `Arc`) instead of relying on
/// global state, so multiple independent indexes can coexist and tests
/// get clean teardown.
pub struct SearchEngine<S> {
    source: S,
    config: EngineConfig,
    index: RwLock<Option<Arc<SearchIndex>>>,
    rebuild_lock: Mutex<()>,
}

impl<S: DocumentSource> SearchEngine<S> {
    /// Create an engine with default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, EngineConfig::default())
    }

    /// Create an engine with explicit configuration.
    pub fn with_config(source: S, config: EngineConfig) -> Self {
        Self {
            source,
            config,
            index: RwLock::new(None),
            rebuild_lock: Mutex::new(()),
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Execute a ranked search.
    ///
    /// This never fails: any internal error is converted into a
    /// well-formed empty response carrying an `error` string. A failure
    /// on one query never corrupts the index for subsequent queries.
    pub fn search(&self, query: &str, options: QueryOptions) -> SearchResponse {
        let options = options.clamped(self.config.max_limit);

        if !self.config.enabled {
            debug!("indexing disabled, delegating to fallback search");
            return self.fallback_search(query, &options);
        }

        match self.search_indexed(query, &options) {
            Ok(response) => response,
            Err(err) => {
                warn!(query, error = %err, "search failed");
                error_response(query, &options, false, &err)
            }
        }
    }

    /// Prefix suggestions from indexed titles and words.
    ///
    /// Case-insensitive, deduplicated, shortest-first, capped at `limit`.
    /// Prefixes shorter than two characters yield nothing.
    pub fn suggestions(&self, prefix: &str, limit: usize) -> Vec<String> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.chars().count() < 2 || limit == 0 || !self.config.enabled {
            return Vec::new();
        }
        if self.ensure_fresh().is_err() {
            return Vec::new();
        }
        let Some(index) = self.snapshot() else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for doc in index.docs.values() {
            let title = doc.title.to_lowercase();
            if title.starts_with(&prefix) && seen.insert(title.clone()) {
                out.push(title);
            }
            for word in doc.search_text.split(' ') {
                if word.starts_with(&prefix) && seen.insert(word.to_string()) {
                    out.push(word.to_string());
                }
            }
        }

        out.sort_by(|a, b| {
            a.chars()
                .count()
                .cmp(&b.chars().count())
                .then_with(|| a.cmp(b))
        });
        out.truncate(limit);
        out
    }

    /// Force a rebuild now, regardless of freshness. Operator action.
    pub fn rebuild(&self) -> Result<()> {
        let _guard = self.rebuild_lock.lock();
        self.rebuild_locked()
    }

    /// Drop the index and reset freshness to "never built".
    pub fn clear(&self) {
        *self.index.write() = None;
        info!("search index cleared");
    }

    /// Read-only engine introspection. No side effects.
    pub fn stats(&self) -> IndexStats {
        let snapshot = self.snapshot();
        let now = Instant::now();
        IndexStats {
            enabled: self.config.enabled,
            index_size: snapshot.as_ref().map_or(0, |i| i.len()),
            last_indexed: snapshot.as_ref().map(|i| i.built_on),
            index_age_secs: snapshot.as_ref().map(|i| i.age(now).as_secs()),
            ttl_secs: self.config.ttl.as_secs(),
            needs_reindex: self
                .policy()
                .needs_rebuild(snapshot.as_ref().map(|i| i.built_at), now),
        }
    }

    // -------------------------------------------------------------------------
    // Indexed path
    // -------------------------------------------------------------------------

    fn search_indexed(&self, query: &str, options: &QueryOptions) -> Result<SearchResponse> {
        self.ensure_fresh()?;
        let index = self
            .snapshot()
            .ok_or_else(|| Error::internal("index missing after rebuild"))?;

        let trimmed = query.trim();
        if trimmed.is_empty() {
            // Empty query short-circuits before any scoring pass.
            return Ok(SearchResponse {
                results: Vec::new(),
                pagination: Pagination::zeroed(options.page, options.limit),
                query: String::new(),
                search_time_ms: 0.0,
                index_size: index.len(),
                last_indexed: Some(index.built_on),
                fallback: false,
                error: None,
            });
        }

        // searchTime covers scoring and ranking only, not any rebuild above.
        let started = Instant::now();

        let phrase = normalize(trimmed);
        let terms: Vec<String> = phrase
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let mut matches = score_all(&index, &terms, &phrase);
        rank::apply_filters(&mut matches, &options.filters);
        rank::sort_matches(&mut matches, options.sort_by);
        let (page, pagination) = rank::paginate(matches, options.page, options.limit);

        let results: Vec<SearchResult> = page
            .iter()
            .map(|m| to_result(m, &terms, self.config.snippet_length))
            .collect();

        Ok(SearchResponse {
            results,
            pagination,
            query: trimmed.to_string(),
            search_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            index_size: index.len(),
            last_indexed: Some(index.built_on),
            fallback: false,
            error: None,
        })
    }

    // -------------------------------------------------------------------------
    // Fallback path
    // -------------------------------------------------------------------------

    /// Degraded search: the source's native substring filter, no index.
    fn fallback_search(&self, query: &str, options: &QueryOptions) -> SearchResponse {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return SearchResponse {
                results: Vec::new(),
                pagination: Pagination::zeroed(options.page, options.limit),
                query: String::new(),
                search_time_ms: 0.0,
                index_size: 0,
                last_indexed: None,
                fallback: true,
                error: None,
            };
        }

        let started = Instant::now();
        match self.source.search_substring(trimmed) {
            Ok(items) => {
                let results: Vec<SearchResult> = items
                    .iter()
                    .filter_map(|item| match index_item(item) {
                        Ok(doc) => Some(doc),
                        Err(err) => {
                            warn!(id = %item.id, error = %err, "skipping unindexable fallback result");
                            None
                        }
                    })
                    .map(|doc| {
                        let snippet =
                            snippet::generate(&doc.plain_text, &[], self.config.snippet_length);
                        let url = url_for(&doc.id);
                        SearchResult {
                            id: doc.id,
                            title: doc.title,
                            description: doc.description,
                            snippet,
                            score: 1,
                            date: doc.date,
                            category: doc.category,
                            metadata: doc.metadata,
                            url,
                        }
                    })
                    .collect();
                let (page, pagination) = rank::paginate(results, options.page, options.limit);
                SearchResponse {
                    results: page,
                    pagination,
                    query: trimmed.to_string(),
                    search_time_ms: started.elapsed().as_secs_f64() * 1000.0,
                    index_size: 0,
                    last_indexed: None,
                    fallback: true,
                    error: None,
                }
            }
            Err(err) => {
                warn!(query = trimmed, error = %err, "fallback search failed");
                error_response(trimmed, options, true, &err)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Freshness and rebuild
    // -------------------------------------------------------------------------

    fn policy(&self) -> FreshnessPolicy {
        FreshnessPolicy {
            enabled: self.config.enabled,
            ttl: self.config.ttl,
        }
    }

    fn snapshot(&self) -> Option<Arc<SearchIndex>> {
        self.index.read().clone()
    }

    fn built_at(&self) -> Option<Instant> {
        self.index.read().as_ref().map(|i| i.built_at)
    }

    /// Rebuild if the index is missing or past its TTL. Single-flight.
    fn ensure_fresh(&self) -> Result<()> {
        let policy = self.policy();
        if !policy.needs_rebuild(self.built_at(), Instant::now()) {
            return Ok(());
        }
        let _guard = self.rebuild_lock.lock();
        // Double-check: another caller may have rebuilt while we waited.
        if !policy.needs_rebuild(self.built_at(), Instant::now()) {
            return Ok(());
        }
        self.rebuild_locked()
    }

    /// Fetch the corpus, index it, and swap the new index in atomically.
    /// Caller must hold `rebuild_lock`.
    fn rebuild_locked(&self) -> Result<()> {
        let started = Instant::now();
        let mut items = self.source.list_all()?;
        if items.len() > self.config.max_corpus {
            warn!(
                count = items.len(),
                bound = self.config.max_corpus,
                "corpus exceeds fetch bound, truncating"
            );
            items.truncate(self.config.max_corpus);
        }

        let docs = build_documents(items);
        let index = Arc::new(SearchIndex::new(docs));
        info!(
            documents = index.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search index rebuilt"
        );
        *self.index.write() = Some(index);
        Ok(())
    }
}

/// Score every indexed document and keep the non-zero matches.
///
/// Pure and read-only, which is what makes the parallel path safe.
fn score_all<'a>(index: &'a SearchIndex, terms: &[String], phrase: &str) -> Vec<Match<'a>> {
    #[cfg(feature = "parallel")]
    {
        index
            .docs
            .par_iter()
            .map(|(_, doc)| Match {
                doc,
                score: scoring::score(doc, terms, phrase),
            })
            .filter(|m| m.score > 0)
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        index
            .docs
            .values()
            .map(|doc| Match {
                doc,
                score: scoring::score(doc, terms, phrase),
            })
            .filter(|m| m.score > 0)
            .collect()
    }
}

fn to_result(m: &Match<'_>, terms: &[String], snippet_length: usize) -> SearchResult {
    let doc: &SearchDocument = m.doc;
    SearchResult {
        id: doc.id.clone(),
        title: doc.title.clone(),
        description: doc.description.clone(),
        snippet: snippet::generate(&doc.plain_text, terms, snippet_length),
        score: m.score,
        date: doc.date.clone(),
        category: doc.category.clone(),
        metadata: doc.metadata.clone(),
        url: url_for(&doc.id),
    }
}

fn url_for(id: &str) -> String {
    format!("/{}", id.trim_start_matches('/'))
}

fn error_response(
    query: &str,
    options: &QueryOptions,
    fallback: bool,
    err: &Error,
) -> SearchResponse {
    SearchResponse {
        results: Vec::new(),
        pagination: Pagination::zeroed(options.page, options.limit),
        query: query.trim().to_string(),
        search_time_ms: 0.0,
        index_size: 0,
        last_indexed: None,
        fallback,
        error: Some(err.to_string()),
    }
}
