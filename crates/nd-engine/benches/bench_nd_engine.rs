use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nd_core::{DedupConfig, TextItem};
use nd_engine::normalize::normalize;
use nd_engine::{DedupEngine, DedupOptions};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const PHRASES: &[&str] = &[
    "God loves you deeply",
    "the Lord is my shepherd",
    "joy comes in the morning",
    "be still and know",
    "his mercy endures forever",
    "walk by faith not by sight",
    "peace be with you always",
    "cast your cares on him",
];

const ENDINGS: &[&str] = &["", " Type Amen", " Share this if you believe.", " Amen!"];

fn generate_batch(n: usize, seed: u64) -> Vec<TextItem> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let words: Vec<&str> = PHRASES.choose_multiple(&mut rng, 3).copied().collect();
            let ending = ENDINGS.choose(&mut rng).copied().unwrap_or("");
            TextItem::new(format!("item-{i}"), format!("{}.{ending}", words.join(". ")))
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let text = "THE MOST POWERFUL PRAYER. God loves you deeply. Type Amen! Share this if you agree.";
    c.bench_function("normalize", |b| b.iter(|| black_box(normalize(black_box(text)))));
}

fn bench_dedup(c: &mut Criterion) {
    let engine = DedupEngine::new(DedupConfig::default()).unwrap();
    for &n in &[100usize, 1_000] {
        let batch = generate_batch(n, 42);
        c.bench_function(&format!("dedup_batch_{n}"), |b| {
            b.iter(|| black_box(engine.dedup(black_box(&batch), DedupOptions::default())))
        });
    }
}

fn bench_dedup_with_library(c: &mut Criterion) {
    let mut engine = DedupEngine::new(DedupConfig::default()).unwrap();
    engine.add_to_library(&generate_batch(2_000, 7));
    let batch = generate_batch(500, 42);
    c.bench_function("dedup_500_against_library_2000", |b| {
        b.iter(|| black_box(engine.dedup(black_box(&batch), DedupOptions::default())))
    });
}

criterion_group!(benches, bench_normalize, bench_dedup, bench_dedup_with_library);
criterion_main!(benches);
