//! Benchmarks over realistic wiki corpus sizes.
//!
//! Simulates the deployments this engine targets:
//! - Small wiki:  ~20 pages, ~500 words each  (personal wiki)
//! - Medium wiki: ~100 pages, ~1000 words each (team wiki)
//! - Large wiki:  ~500 pages, ~1500 words each (documentation site)
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wikisearch::{
    extract_plain_text, generate_snippet, normalize, QueryOptions, SearchEngine, SourceItem,
};

// ============================================================================
// WIKI CORPUS SIMULATION
// ============================================================================

/// Corpus size configurations matching real-world deployments
struct WikiSize {
    name: &'static str,
    pages: usize,
    words_per_page: usize,
}

const WIKI_SIZES: &[WikiSize] = &[
    WikiSize {
        name: "small",
        pages: 20,
        words_per_page: 500,
    },
    WikiSize {
        name: "medium",
        pages: 100,
        words_per_page: 1000,
    },
    WikiSize {
        name: "large",
        pages: 500,
        words_per_page: 1500,
    },
];

/// Technical vocabulary for realistic page content
const TECHNICAL_WORDS: &[&str] = &[
    "rust",
    "programming",
    "kubernetes",
    "docker",
    "serverless",
    "microservices",
    "api",
    "database",
    "postgresql",
    "redis",
    "graphql",
    "rest",
    "websocket",
    "authentication",
    "encryption",
    "security",
    "performance",
    "optimization",
    "caching",
    "indexing",
    "algorithm",
    "structure",
    "binary",
    "tree",
    "hash",
    "vector",
    "queue",
    "concurrency",
    "parallelism",
    "async",
    "memory",
    "allocation",
    "ownership",
    "borrowing",
    "lifetime",
    "trait",
    "generic",
    "compiler",
    "runtime",
    "wasm",
];

const GENERAL_WORDS: &[&str] = &[
    "the",
    "a",
    "is",
    "are",
    "was",
    "be",
    "have",
    "will",
    "would",
    "could",
    "should",
    "can",
    "application",
    "system",
    "solution",
    "approach",
    "method",
    "implementation",
    "development",
    "architecture",
    "design",
    "pattern",
    "practice",
    "concept",
];

fn generate_content(word_count: usize, seed: usize) -> String {
    let all_words: Vec<&str> = TECHNICAL_WORDS
        .iter()
        .chain(GENERAL_WORDS.iter())
        .copied()
        .collect();

    (0..word_count)
        .map(|i| all_words[(seed * 7 + i * 3) % all_words.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate a markdown page: heading, prose paragraphs, one code fence.
fn generate_page(id: usize, words_per_page: usize) -> SourceItem {
    let title = format!(
        "How to Build a {} {}",
        TECHNICAL_WORDS[id % TECHNICAL_WORDS.len()],
        TECHNICAL_WORDS[(id + 1) % TECHNICAL_WORDS.len()]
    );
    let body = format!(
        "# {}\n\n{}\n\n```\nlet x = {};\n```\n\n{}",
        title,
        generate_content(words_per_page / 2, id),
        id,
        generate_content(words_per_page / 2, id + 1),
    );
    SourceItem {
        id: format!("pages/{:02}/page-{}", (id % 12) + 1, id),
        title: Some(title),
        description: Some(generate_content(30, id)),
        body,
        date: Some(format!("2024-{:02}-{:02}", (id % 12) + 1, (id % 28) + 1)),
        category: Some(if id % 5 == 0 { "template" } else { "page" }.to_string()),
        ..Default::default()
    }
}

fn generate_corpus(size: &WikiSize) -> Vec<SourceItem> {
    (0..size.pages)
        .map(|id| generate_page(id, size.words_per_page))
        .collect()
}

fn engine_over(items: Vec<SourceItem>) -> SearchEngine<wikisearch::testing::StaticSource> {
    SearchEngine::new(wikisearch::testing::StaticSource::new(items))
}

// ============================================================================
// INDEX BUILD
// ============================================================================

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_rebuild");

    for size in WIKI_SIZES {
        let corpus = generate_corpus(size);
        let total_words: usize = corpus
            .iter()
            .map(|p| p.body.split_whitespace().count())
            .sum();

        group.throughput(Throughput::Elements(total_words as u64));
        group.bench_with_input(BenchmarkId::new("rebuild", size.name), &corpus, |b, corpus| {
            let engine = engine_over(corpus.clone());
            b.iter(|| engine.rebuild().unwrap());
        });
    }

    group.finish();
}

// ============================================================================
// QUERIES
// ============================================================================

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_query");

    // Medium wiki for consistent comparison across query shapes
    let corpus = generate_corpus(&WIKI_SIZES[1]);
    let engine = engine_over(corpus);
    engine.rebuild().unwrap();

    let queries = [
        ("single_term", "rust"),
        ("multi_term", "rust async programming"),
        ("phrase", "memory allocation"),
        ("rare_term", "wasm"),
        ("no_match", "xyznonexistent"),
    ];

    for (name, query) in queries {
        group.bench_with_input(BenchmarkId::new("warm", name), &query, |b, query| {
            b.iter(|| engine.search(black_box(query), QueryOptions::default()));
        });
    }

    group.finish();
}

fn bench_suggestions(c: &mut Criterion) {
    let corpus = generate_corpus(&WIKI_SIZES[1]);
    let engine = engine_over(corpus);
    engine.rebuild().unwrap();

    c.bench_function("suggestions_prefix", |b| {
        b.iter(|| engine.suggestions(black_box("pro"), 10));
    });
}

// ============================================================================
// PIPELINE PIECES
// ============================================================================

fn bench_text_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_pipeline");

    let page = generate_page(3, 1000);
    group.bench_function("extract_plain_text", |b| {
        b.iter(|| extract_plain_text(black_box(&page.body)));
    });

    let plain = extract_plain_text(&page.body);
    group.bench_function("normalize", |b| {
        b.iter(|| normalize(black_box(&plain)));
    });

    let terms = vec!["rust".to_string(), "performance".to_string()];
    group.bench_function("snippet", |b| {
        b.iter(|| generate_snippet(black_box(&plain), black_box(&terms), 200));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_rebuild,
    bench_search,
    bench_suggestions,
    bench_text_pipeline
);
criterion_main!(benches);
