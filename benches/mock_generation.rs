//! Benchmarks for mock payload synthesis
//!
//! This benchmark measures:
//! - Fresh and deterministic niche-scout generation
//! - Blueprint generation
//! - Stamping and serializing a mock envelope

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use social_intel_proxy::mock::{self, BlueprintHints, MockSeed};
use social_intel_proxy::normalize;

fn bench_niche_scout(c: &mut Criterion) {
    let mut group = c.benchmark_group("niche_scout");

    group.bench_function("fresh", |b| {
        b.iter(|| mock::niche_scout_result(black_box(&MockSeed::fresh())))
    });

    for id in ["mock-niche-scout-12345", "mock-niche-scout-1746057600000"] {
        let seed = MockSeed::for_id(id);
        group.bench_with_input(BenchmarkId::new("deterministic", id), &seed, |b, seed| {
            b.iter(|| mock::niche_scout_result(black_box(seed)))
        });
    }

    group.finish();
}

fn bench_blueprint(c: &mut Criterion) {
    let hints = BlueprintHints {
        niche: Some("fitness".into()),
        seed_url: None,
    };
    let seed = MockSeed::for_id("mock-blueprint-1746057600000");

    c.bench_function("blueprint_deterministic", |b| {
        b.iter(|| mock::blueprint_result(black_box(&seed), black_box(&hints)))
    });
}

fn bench_envelope(c: &mut Criterion) {
    let payload = mock::niche_scout_result(&MockSeed::for_id("mock-niche-scout-12345"));

    c.bench_function("mock_envelope_to_json", |b| {
        b.iter(|| {
            let envelope = normalize::mock(
                "mock-niche-scout-12345",
                black_box(&payload),
                "API call failed: connection refused",
            )
            .unwrap();
            serde_json::to_vec(&envelope).unwrap()
        })
    });
}

criterion_group!(benches, bench_niche_scout, bench_blueprint, bench_envelope);
criterion_main!(benches);
