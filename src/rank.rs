// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sorting, filtering, and pagination of matched documents.
//!
//! Everything here operates on borrowed index snapshots: ranking never
//! mutates the index, only the per-query match list.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::types::{Pagination, SearchDocument, SearchFilters, SortBy};

/// One matched document with its relevance score. Zero-score documents are
/// filtered out before ranking; zero means "no match", not "ranked last".
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub doc: &'a SearchDocument,
    pub score: u32,
}

/// Parse a document date: bare ISO date first, RFC 3339 as fallback.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Drop matches excluded by the active filters.
///
/// Category is exact-match. Date bounds are inclusive on both ends and
/// compare against the document's `date` field; documents without a
/// parsable date are excluded whenever a date bound is active.
pub fn apply_filters(matches: &mut Vec<Match<'_>>, filters: &SearchFilters) {
    if filters.is_empty() {
        return;
    }

    let from = filters.date_from.as_deref().and_then(parse_date);
    let to = filters.date_to.as_deref().and_then(parse_date);
    let date_filter_active = filters.date_from.is_some() || filters.date_to.is_some();

    matches.retain(|m| {
        if let Some(category) = &filters.category {
            if m.doc.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if date_filter_active {
            let Some(date) = m.doc.date.as_deref().and_then(parse_date) else {
                return false;
            };
            if from.is_some_and(|f| date < f) {
                return false;
            }
            if to.is_some_and(|t| date > t) {
                return false;
            }
        }
        true
    });
}

/// Sort matches in place according to `sort_by`.
///
/// Ties break on document id. The scoring scan iterates a hash map (and
/// may run in parallel), so without an explicit tie-break equal-keyed
/// results would shuffle between identical queries.
pub fn sort_matches(matches: &mut [Match<'_>], sort_by: SortBy) {
    match sort_by {
        SortBy::Relevance => {
            matches.sort_by(|a, b| {
                b.score
                    .cmp(&a.score)
                    .then_with(|| a.doc.id.cmp(&b.doc.id))
            });
        }
        SortBy::Title => {
            matches.sort_by(|a, b| {
                a.doc
                    .title
                    .to_lowercase()
                    .cmp(&b.doc.title.to_lowercase())
                    .then_with(|| a.doc.id.cmp(&b.doc.id))
            });
        }
        SortBy::Date => {
            // Newest first. `None` sorts before `Some`, so descending order
            // pushes documents without a usable date to the end (oldest).
            matches.sort_by(|a, b| {
                date_key(b.doc)
                    .cmp(&date_key(a.doc))
                    .then_with(|| a.doc.id.cmp(&b.doc.id))
            });
        }
    }
}

/// Sort key for newest-first ordering: the parsed `date` field, falling
/// back to `last_modified` when the source gave no date.
fn date_key(doc: &SearchDocument) -> Option<DateTime<Utc>> {
    doc.date
        .as_deref()
        .and_then(parse_date)
        .and_then(|d| d.and_time(NaiveTime::MIN).and_local_timezone(Utc).single())
        .or(doc.last_modified)
}

/// Slice one page out of the full result list.
///
/// An out-of-range `page` yields an empty slice without error; the
/// metadata still reflects the full result count.
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> (Vec<T>, Pagination) {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(limit);

    let start = (page - 1).saturating_mul(limit);
    let slice: Vec<T> = items.into_iter().skip(start).take(limit).collect();

    let pagination = Pagination {
        page,
        limit,
        total,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1,
    };
    (slice, pagination)
}
