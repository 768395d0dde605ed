// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text normalization: markdown stripping and search-text folding.
//!
//! Two deterministic functions feed the indexer:
//!
//! - [`extract_plain_text`] turns a raw markdown body into displayable
//!   plain text. Fenced code blocks and inline code are removed entirely,
//!   links and images collapse to their visible text, embedded HTML is
//!   dropped, whitespace is collapsed. Best-effort: malformed markup never
//!   fails, it just strips less.
//! - [`normalize`] folds text for matching: lowercase, every
//!   non-word/non-space character replaced with a space, whitespace
//!   collapsed. Idempotent — `normalize(normalize(s)) == normalize(s)`.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Strip markdown/markup from a raw document body into indexable plain text.
///
/// Walks the markdown event stream and keeps only visible text: code blocks
/// and inline code spans are dropped (code is noise for prose search),
/// link and image markup collapses to the text the reader would see, and
/// raw HTML tags are skipped. The result has single-space-collapsed
/// whitespace and no leading/trailing space. Empty input yields `""`.
pub fn extract_plain_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let parser = Parser::new_ext(raw, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
    let mut out = String::new();
    let mut code_depth = 0usize;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_)) => code_depth += 1,
            Event::Text(text) => {
                if code_depth == 0 {
                    out.push_str(&text);
                }
            }
            // Inline code spans are removed entirely, not unwrapped.
            Event::Code(_) => {}
            // Raw HTML tags are markup, not content.
            Event::Html(_) | Event::InlineHtml(_) => {}
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::End(end) => match end {
                TagEnd::CodeBlock => code_depth = code_depth.saturating_sub(1),
                // Inline containers: their text joins the surrounding run.
                TagEnd::Emphasis
                | TagEnd::Strong
                | TagEnd::Strikethrough
                | TagEnd::Link
                | TagEnd::Image => {}
                // Block boundaries separate text runs.
                _ => out.push(' '),
            },
            _ => {}
        }
    }

    collapse_whitespace(&out)
}

/// Normalize a string for search: lowercase, strip punctuation, collapse
/// whitespace.
///
/// Word characters (alphanumerics and `_`) survive; everything else
/// becomes a space. With the `unicode-normalization` feature, combining
/// marks are folded first so "café" matches "cafe".
pub fn normalize(value: &str) -> String {
    let folded = fold_marks(value);
    let spaced: String = folded
        .to_lowercase()
        .chars()
        .map(|c| if is_word_char(c) { c } else { ' ' })
        .collect();
    collapse_whitespace(&spaced)
}

/// Fold a string for matching against normalized query terms: combining
/// marks stripped (when the feature is on), then lowercased. Punctuation
/// survives, unlike [`normalize`].
pub(crate) fn fold_for_match(value: &str) -> String {
    fold_marks(value).to_lowercase()
}

/// Fold a single character without changing the character count: strip
/// its combining mark, then lowercase.
///
/// Snippet windowing works on character offsets into the original text, so
/// folding there must be 1:1. The rare multi-char lowercasings (e.g. 'İ')
/// fall back to the first resulting character.
pub(crate) fn fold_char(c: char) -> char {
    let base = strip_mark(c);
    base.to_lowercase().next().unwrap_or(base)
}

/// Replace a precomposed character with its base character ('é' -> 'e').
#[cfg(feature = "unicode-normalization")]
fn strip_mark(c: char) -> char {
    std::iter::once(c)
        .nfd()
        .find(|d| !is_combining_mark(*d))
        .unwrap_or(c)
}

#[cfg(not(feature = "unicode-normalization"))]
fn strip_mark(c: char) -> char {
    c
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip combining marks via NFD decomposition.
#[cfg(feature = "unicode-normalization")]
fn fold_marks(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(not(feature = "unicode-normalization"))]
fn fold_marks(value: &str) -> String {
    value.to_string()
}

/// Check if a character is a combining mark (diacritic).
///
/// Combining marks have Unicode category "Mn" (Mark, Nonspacing).
/// Examples: ́ (acute), ̄ (macron), ̣ (dot below)
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_strips_fenced_code() {
        let raw = "Intro text.\n\n```rust\nlet x = 1;\n```\n\nAfter code.";
        let plain = extract_plain_text(raw);
        assert_eq!(plain, "Intro text. After code.");
    }

    #[test]
    fn test_plain_text_strips_inline_code() {
        let plain = extract_plain_text("Use the `search` function here.");
        assert!(!plain.contains("search"));
        assert!(plain.contains("Use the"));
        assert!(plain.contains("function here."));
    }

    #[test]
    fn test_plain_text_keeps_link_text() {
        let plain = extract_plain_text("See [the manual](https://example.com/manual) for details.");
        assert_eq!(plain, "See the manual for details.");
    }

    #[test]
    fn test_plain_text_keeps_image_alt_text() {
        let plain = extract_plain_text("Diagram: ![system overview](diagram.png)");
        assert_eq!(plain, "Diagram: system overview");
    }

    #[test]
    fn test_plain_text_drops_html_tags() {
        let plain = extract_plain_text("before <div class=\"x\">inside</div> after");
        assert!(!plain.contains("<div"));
        assert!(plain.contains("inside"));
    }

    #[test]
    fn test_plain_text_strips_heading_markup() {
        let plain = extract_plain_text("# Title\n\nBody **bold** text.");
        assert_eq!(plain, "Title Body bold text.");
    }

    #[test]
    fn test_plain_text_empty_input() {
        assert_eq!(extract_plain_text(""), "");
    }

    #[test]
    fn test_plain_text_survives_malformed_markup() {
        // Unclosed fence and stray brackets: best-effort stripping, no panic.
        let plain = extract_plain_text("broken [link(no close ```\nstill in code?");
        assert!(plain.starts_with("broken"));
    }

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("Hello, World!"), "hello world");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  a\t\tb \n c  "), "a b c");
    }

    #[test]
    fn test_normalize_keeps_underscores() {
        assert_eq!(normalize("snake_case word"), "snake_case word");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = ["Hello, World!", "  a -- b  ", "Ünïcode: Café!", ""];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[cfg(feature = "unicode-normalization")]
    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize("Café naïve"), "cafe naive");
    }

    #[test]
    fn test_fold_char_preserves_count() {
        for c in ['A', 'ß', 'İ', 'x', '7'] {
            let _ = fold_char(c); // one char in, one char out by construction
        }
        assert_eq!(fold_char('A'), 'a');
    }

    #[cfg(feature = "unicode-normalization")]
    #[test]
    fn test_fold_char_strips_diacritics() {
        assert_eq!(fold_char('é'), 'e');
        assert_eq!(fold_char('Ö'), 'o');
        assert_eq!(fold_char('ē'), 'e');
    }

    #[cfg(feature = "unicode-normalization")]
    #[test]
    fn test_fold_for_match_keeps_punctuation() {
        assert_eq!(fold_for_match("Café, open!"), "cafe, open!");
    }
}
