// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Weighted relevance scoring.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! ## FIELD_WEIGHT_HIERARCHY
//! Title matches outrank description matches, which outrank a single body
//! occurrence:
//!
//! ```text
//! Title (3) > Description (2) > Body (1 per occurrence)
//! ```
//!
//! ## PHRASE_DOMINANCE
//! An exact-phrase match adds more than any single per-term field bonus,
//! so a document containing the whole query always beats an
//! otherwise-identical document matching the same terms separately:
//!
//! ```text
//! Phrase (10) > Title (3) + Description (2) + Body (1)
//! ```
//!
//! ## ZERO_MEANS_NO_MATCH
//! A score of 0 excludes the document from results entirely. Zero is
//! "no match", not "ranked last".
//!
//! The constants are heuristic and preserved exactly for behavioral
//! compatibility with the systems this engine replaces. Flag before tuning.

use crate::text::fold_for_match;
use crate::types::SearchDocument;

/// Bonus when `search_text` contains the full normalized query as a
/// contiguous substring.
pub const PHRASE_BONUS: u32 = 10;

/// Per-term bonus when the title contains the term.
pub const TITLE_WEIGHT: u32 = 3;

/// Per-term bonus when the description contains the term.
pub const DESCRIPTION_WEIGHT: u32 = 2;

/// Per body occurrence of the term.
pub const BODY_WEIGHT: u32 = 1;

/// Count non-overlapping occurrences of `needle` in `haystack`.
///
/// Both arguments are expected to be already case-folded.
pub fn occurrence_count(haystack: &str, needle: &str) -> u32 {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count() as u32
}

/// Score one document against a query.
///
/// `terms` are the normalized, non-empty query terms; `phrase` is the
/// normalized query string as a whole. Returns 0 when the document does
/// not match at all.
pub fn score(doc: &SearchDocument, terms: &[String], phrase: &str) -> u32 {
    let mut total = 0u32;

    if !phrase.is_empty() && doc.search_text.contains(phrase) {
        total += PHRASE_BONUS;
    }

    // Same folding as query normalization, so "cafe" finds "Café".
    let title = fold_for_match(&doc.title);
    let description = fold_for_match(&doc.description);
    let body = fold_for_match(&doc.plain_text);

    for term in terms {
        if term.is_empty() {
            continue;
        }
        if title.contains(term.as_str()) {
            total += TITLE_WEIGHT;
        }
        if description.contains(term.as_str()) {
            total += DESCRIPTION_WEIGHT;
        }
        total += BODY_WEIGHT * occurrence_count(&body, term);
    }

    total
}
