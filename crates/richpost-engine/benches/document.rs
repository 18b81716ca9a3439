use criterion::{Criterion, criterion_group, criterion_main};
use richpost_engine::Document;
mod common;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");
    group.sample_size(20);

    let markup = common::generate_post(50);
    group.bench_function("parse", |b| {
        b.iter(|| Document::from_markup(std::hint::black_box(&markup)));
    });

    let doc = Document::from_markup(&markup);
    group.bench_function("unparse", |b| {
        b.iter(|| std::hint::black_box(&doc).to_markup());
    });

    group.finish();
}

fn bench_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("edits");
    group.sample_size(20);

    let doc = Document::from_markup(&common::generate_post(50));
    group.bench_function("replace", |b| {
        b.iter(|| std::hint::black_box(&doc).replace("Rust", "Rustacean"));
    });
    group.bench_function("clear", |b| {
        b.iter(|| std::hint::black_box(&doc).clear());
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_edits);
criterion_main!(benches);
