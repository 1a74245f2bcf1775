use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nd_core::{DedupConfig, DedupResult, DedupStats, DuplicateGroup, ScoredItem, TextItem};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const WORDS: &[&str] = &[
    "grace", "mercy", "peace", "faith", "hope", "love", "light", "shepherd", "blessing", "strength",
];

fn random_text(rng: &mut StdRng) -> String {
    let len = rng.gen_range(5..20);
    (0..len)
        .filter_map(|_| WORDS.choose(&mut *rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_items(n: usize, seed: u64) -> Vec<TextItem> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| TextItem::new(format!("item-{i}"), random_text(&mut rng)))
        .collect()
}

fn generate_result(n: usize) -> DedupResult {
    let items = generate_items(n, 42);
    let duplicate_groups: Vec<DuplicateGroup> = items
        .chunks(4)
        .map(|chunk| DuplicateGroup {
            representative: chunk[0].clone(),
            duplicates: chunk[1..]
                .iter()
                .map(|item| ScoredItem {
                    item: item.clone(),
                    similarity: 0.8,
                })
                .collect(),
        })
        .collect();
    DedupResult {
        unique_items: duplicate_groups.iter().map(|g| g.representative.clone()).collect(),
        stats: DedupStats {
            total_input: n,
            unique_count: duplicate_groups.len(),
            duplicate_count: n - duplicate_groups.len(),
            ..Default::default()
        },
        duplicate_groups,
        library_matches: Vec::new(),
    }
}

fn bench_config(c: &mut Criterion) {
    let json = r#"{"numHashFunctions":256,"numBands":32,"similarityThreshold":0.8}"#;
    c.bench_function("config_from_json", |b| {
        b.iter(|| black_box(DedupConfig::from_json(black_box(json))))
    });
}

fn bench_items_json(c: &mut Criterion) {
    let json = serde_json::to_string(&generate_items(1_000, 7)).unwrap();
    c.bench_function("items_deserialize_1000", |b| {
        b.iter(|| black_box(serde_json::from_str::<Vec<TextItem>>(black_box(&json))))
    });
}

fn bench_result_serialize(c: &mut Criterion) {
    let result = generate_result(1_000);
    c.bench_function("dedup_result_serialize_1000", |b| {
        b.iter(|| black_box(serde_json::to_string(black_box(&result))))
    });
}

criterion_group!(benches, bench_config, bench_items_json, bench_result_serialize);
criterion_main!(benches);
