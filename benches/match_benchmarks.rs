#![allow(missing_docs)]
//! Benchmarks for parsing and duplicate matching.
//!
//! Inputs are generated in memory so the suite runs without fixture files.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use refmatch::{read_records, DuplicateMatcher, Format, Record};

/// Build a RIS export with `count` journal articles.
fn ris_export(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                "TY  - JOUR\nTI  - Study number {i} of surgical outcomes\nAU  - Zoidberg, J.\nAU  - Leela T\nSN  - 9919-991X\nVL  - {}\nIS  - {}\nSP  - {}\nEP  - {}\nER  - \n\n",
                i / 100,
                i % 12,
                i * 10,
                i * 10 + 9
            )
        })
        .collect()
}

/// Build a Medline export where every other record duplicates the RIS one.
fn medline_export(count: usize) -> String {
    (0..count)
        .map(|i| {
            let title = if i % 2 == 0 {
                format!("Study number {i} of surgical\n      outcomes.")
            } else {
                format!("Unrelated paper {i}")
            };
            format!(
                "PMID- {i}\nTI  - {title}\nFAU - Zoidberg, J\nFAU - Leela, T\nIS  - 9919-991X (Print)\nPG  - {}-9\n\n",
                i * 10
            )
        })
        .collect()
}

fn parse(format: Format, data: &str) -> Vec<Record> {
    read_records(format, data.as_bytes())
        .collect::<refmatch::Result<_>>()
        .expect("generated input is valid")
}

fn benchmark_parse_ris_1k(c: &mut Criterion) {
    let data = ris_export(1000);
    c.bench_function("parse_ris_1k", |b| {
        b.iter(|| parse(Format::Ris, black_box(&data)).len());
    });
}

fn benchmark_parse_medline_1k(c: &mut Criterion) {
    let data = medline_export(1000);
    c.bench_function("parse_medline_1k", |b| {
        b.iter(|| parse(Format::Medline, black_box(&data)).len());
    });
}

/// Fingerprints are cached per record, so fresh records are parsed for every
/// iteration to measure the full cost.
fn benchmark_parse_and_match_1k(c: &mut Criterion) {
    let a_data = ris_export(1000);
    let b_data = medline_export(1000);

    c.bench_function("parse_and_match_1k", |bench| {
        bench.iter(|| {
            let a = parse(Format::Ris, black_box(&a_data));
            let b = parse(Format::Medline, black_box(&b_data));
            DuplicateMatcher::new(&a).find_matches(&b).count()
        });
    });
}

criterion_group!(
    benches,
    benchmark_parse_ris_1k,
    benchmark_parse_medline_1k,
    benchmark_parse_and_match_1k
);
criterion_main!(benches);
