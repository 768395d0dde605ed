// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for search operations.
//!
//! The taxonomy mirrors the failure modes of the engine: the document
//! source can be unreachable, a single corpus item can be malformed, or
//! an internal step can fail. None of these escape the facade as
//! errors — [`SearchEngine::search`](crate::SearchEngine::search) converts
//! them into an error-carrying response. The `Error` type exists for the
//! internal plumbing and for callers of the lower-level building blocks.

use thiserror::Error;

/// Errors that can occur while indexing or searching.
#[derive(Error, Debug)]
pub enum Error {
    /// The document source failed during a rebuild or fallback search.
    #[error("document source unavailable: {0}")]
    Source(String),

    /// A single corpus item could not be indexed. Rebuilds log and skip
    /// these instead of aborting.
    #[error("malformed document '{id}': {reason}")]
    MalformedDocument { id: String, reason: String },

    /// Internal failure during scoring or snippet generation.
    #[error("search failed: {0}")]
    Internal(String),
}

impl Error {
    /// Create a source-unavailable error.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Create a malformed-document error.
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
