//! In-process full-text search with TTL freshness and highlighted snippets.
//!
//! This crate indexes a corpus of text documents supplied by a
//! [`DocumentSource`], answers ranked free-text queries with highlighted
//! snippets, and keeps itself fresh as the corpus changes — no separate
//! search server. The index is a plain map rescored linearly per query, a
//! deliberate tradeoff at the target corpus size (a few thousand
//! documents); see `DESIGN.md` before reaching for an inverted index.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  text.rs   │────▶│ indexer.rs  │────▶│  engine.rs  │
//! │ (markdown  │     │ (SourceItem │     │  (facade,   │
//! │  → plain,  │     │  → Search-  │     │  freshness, │
//! │ normalize) │     │  Document)  │     │  fallback)  │
//! └────────────┘     └─────────────┘     └──────┬──────┘
//!                                               │
//!                    ┌──────────────────────────┼──────────────┐
//!                    ▼                          ▼              ▼
//!             ┌────────────┐            ┌────────────┐  ┌────────────┐
//!             │ scoring.rs │            │ snippet.rs │  │  rank.rs   │
//!             │ (weighted  │            │ (window +  │  │ (sort,     │
//!             │  matching) │            │ highlight) │  │  paginate) │
//!             └────────────┘            └────────────┘  └────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use wikisearch::{QueryOptions, SearchEngine};
//!
//! let engine = SearchEngine::new(my_page_store);
//! let response = engine.search("installation guide", QueryOptions::default());
//! for result in &response.results {
//!     println!("{} ({}): {}", result.title, result.score, result.snippet);
//! }
//! ```
//!
//! Every query first checks index freshness and rebuilds synchronously if
//! the TTL has lapsed; rebuilds are single-flight and swap the whole index
//! atomically. Disabling the engine routes queries to the document
//! source's own substring search instead.

// Module declarations
mod engine;
mod error;
mod freshness;
mod indexer;
mod rank;
mod scoring;
mod snippet;
mod source;
mod text;
mod types;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use engine::{EngineConfig, SearchEngine};
pub use error::{Error, Result};
pub use freshness::{FreshnessPolicy, DEFAULT_TTL};
pub use indexer::{build_documents, compose_search_text, index_item};
pub use rank::{paginate, parse_date, Match};
pub use scoring::{
    occurrence_count, score, BODY_WEIGHT, DESCRIPTION_WEIGHT, PHRASE_BONUS, TITLE_WEIGHT,
};
pub use snippet::{generate as generate_snippet, DEFAULT_SNIPPET_LENGTH, MARK_CLOSE, MARK_OPEN};
pub use source::{DocumentSource, SourceItem};
pub use text::{extract_plain_text, normalize};
pub use types::{
    IndexStats, Pagination, QueryOptions, SearchDocument, SearchFilters, SearchIndex,
    SearchResponse, SearchResult, SortBy,
};
