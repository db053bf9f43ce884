// Criterion benchmarks for EcoScan

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ecoscan::core::{DisposalCatalog, storage_name};
use ecoscan::services::classifier::parse_prediction;

fn bench_catalog_resolve(c: &mut Criterion) {
    let catalog = DisposalCatalog::default();

    let mut group = c.benchmark_group("catalog_resolve");
    for label in ["plastic", "Biological", "unknownlabel"] {
        group.bench_function(label, |b| {
            b.iter(|| catalog.resolve(black_box(label)));
        });
    }
    group.finish();
}

fn bench_storage_name(c: &mut Criterion) {
    c.bench_function("storage_name", |b| {
        b.iter(|| storage_name(black_box(Some("IMG_2024_0001.jpeg")), black_box(".jpg")));
    });
}

fn bench_parse_prediction(c: &mut Criterion) {
    let body = r#"{"prediction": "glass", "probabilities": {"glass": 0.72, "plastic": 0.2, "metal": 0.08}}"#;

    c.bench_function("parse_prediction", |b| {
        b.iter(|| parse_prediction(black_box(body)));
    });
}

criterion_group!(
    benches,
    bench_catalog_resolve,
    bench_storage_name,
    bench_parse_prediction
);
criterion_main!(benches);
