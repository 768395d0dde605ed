// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snippet extraction and highlighting.
//!
//! The generator slides a fixed-length window across the plain text and
//! keeps the window containing the most query-term occurrences, then wraps
//! every term occurrence inside it with `<mark>` tags. Ellipses mark
//! clipped edges.
//!
//! All window arithmetic is in characters, not bytes: byte-based windows
//! would split multi-byte UTF-8 sequences and panic on slicing. Markers
//! are inserted only after the window is chosen, so they never affect
//! window length or offsets.

use crate::text::fold_char;

/// Default window length, in characters.
pub const DEFAULT_SNIPPET_LENGTH: usize = 200;

/// Highlight markers wrapped around matched terms.
pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

/// Extract the most query-term-dense window of `plain_text` and highlight
/// matched terms.
///
/// With no query terms the text is simply truncated to `max_length`
/// characters, with a trailing `...` only when something was cut off.
/// Otherwise the window scan is ascending and replacement requires a
/// strictly higher score, so the earliest best-scoring window is chosen
/// deterministically.
pub fn generate(plain_text: &str, terms: &[String], max_length: usize) -> String {
    let max_length = max_length.max(1);
    let chars: Vec<char> = plain_text.chars().collect();

    // Terms are folded with the same 1:1 fold as the text, so an already
    // normalized query term still lines up with accented body text.
    let terms: Vec<Vec<char>> = terms
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| t.chars().map(fold_char).collect())
        .collect();

    if terms.is_empty() {
        return truncate(&chars, max_length);
    }

    // Case-fold once; fold_char is 1:1 so offsets line up with `chars`.
    let folded: Vec<char> = chars.iter().map(|&c| fold_char(c)).collect();
    let positions: Vec<Vec<usize>> = terms.iter().map(|t| find_positions(&folded, t)).collect();

    if chars.len() <= max_length {
        // No windowing: the whole text is the snippet, still highlighted.
        return highlight(&chars, &terms, &positions, 0, chars.len(), false, false);
    }

    let (start, end) = best_window(chars.len(), max_length, &terms, &positions);
    highlight(&chars, &terms, &positions, start, end, start > 0, end < chars.len())
}

/// Find the char offsets of every occurrence of `term` in `folded`.
fn find_positions(folded: &[char], term: &[char]) -> Vec<usize> {
    if term.is_empty() || term.len() > folded.len() {
        return Vec::new();
    }
    (0..=folded.len() - term.len())
        .filter(|&i| folded[i..i + term.len()] == *term)
        .collect()
}

/// Scan every window start and keep the first highest-scoring one.
fn best_window(
    text_len: usize,
    max_length: usize,
    terms: &[Vec<char>],
    positions: &[Vec<usize>],
) -> (usize, usize) {
    let mut best_start = 0usize;
    let mut best_score = 0usize;

    for start in 0..=text_len - max_length {
        let end = start + max_length;
        let mut score = 0usize;
        for (term, pos) in terms.iter().zip(positions) {
            // Occurrences fully inside [start, end).
            let lo = pos.partition_point(|&p| p < start);
            let hi = pos.partition_point(|&p| p + term.len() <= end);
            score += hi.saturating_sub(lo);
        }
        // Strictly greater: the earliest best window wins ties.
        if score > best_score {
            best_score = score;
            best_start = start;
        }
    }

    (best_start, best_start + max_length)
}

/// Wrap every term occurrence inside `[start, end)` with mark tags.
///
/// Overlapping match ranges are merged before insertion so a term that is
/// a substring of another (or of the marker text itself) cannot produce
/// nested or torn tags.
fn highlight(
    chars: &[char],
    terms: &[Vec<char>],
    positions: &[Vec<usize>],
    start: usize,
    end: usize,
    leading_ellipsis: bool,
    trailing_ellipsis: bool,
) -> String {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for (term, pos) in terms.iter().zip(positions) {
        for &p in pos {
            if p >= start && p + term.len() <= end {
                ranges.push((p, p + term.len()));
            }
        }
    }
    ranges.sort_unstable();

    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (lo, hi) in ranges {
        match merged.last_mut() {
            Some(last) if lo < last.1 => last.1 = last.1.max(hi),
            _ => merged.push((lo, hi)),
        }
    }

    let mut out = String::new();
    if leading_ellipsis {
        out.push_str("...");
    }
    let mut cursor = start;
    for (lo, hi) in merged {
        out.extend(&chars[cursor..lo]);
        out.push_str(MARK_OPEN);
        out.extend(&chars[lo..hi]);
        out.push_str(MARK_CLOSE);
        cursor = hi;
    }
    out.extend(&chars[cursor..end]);
    if trailing_ellipsis {
        out.push_str("...");
    }
    out
}

/// Prefix truncation for the no-terms case.
fn truncate(chars: &[char], max_length: usize) -> String {
    if chars.len() <= max_length {
        return chars.iter().collect();
    }
    let mut out: String = chars[..max_length].iter().collect();
    out.push_str("...");
    out
}
