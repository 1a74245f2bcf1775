use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nd_judge::{extract_json_object, parse_judge_response};

fn generate_response(groups: usize) -> String {
    let unique: Vec<String> = (0..groups).map(|i| (i * 3).to_string()).collect();
    let dups: Vec<String> = (0..groups)
        .map(|i| {
            format!(
                r#"{{"keepIndex":{keep},"removeIndices":[{a},{b}],"reason":"same blessing, {{reworded}}"}}"#,
                keep = i * 3,
                a = i * 3 + 1,
                b = i * 3 + 2
            )
        })
        .collect();
    format!(
        "Sure! Here is the grouping:\n```json\n{{\"uniqueIndices\":[{}],\"duplicateGroups\":[{}],\"totalProcessed\":{}}}\n```\nHope this helps.",
        unique.join(","),
        dups.join(","),
        groups * 3
    )
}

fn bench_parse(c: &mut Criterion) {
    let raw = generate_response(20);
    c.bench_function("parse_fenced_response_20_groups", |b| {
        b.iter(|| black_box(parse_judge_response(black_box(&raw))))
    });
}

fn bench_extract(c: &mut Criterion) {
    let raw = generate_response(200);
    c.bench_function("extract_json_object_200_groups", |b| {
        b.iter(|| black_box(extract_json_object(black_box(&raw))))
    });
}

criterion_group!(benches, bench_parse, bench_extract);
criterion_main!(benches);
