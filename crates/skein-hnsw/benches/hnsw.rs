//! HNSW benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use skein_hnsw::{HnswConfig, HnswIndex};

fn generate_vectors(n: usize, dims: usize) -> Vec<Vec<f32>> {
    (0..n)
        .map(|i| (0..dims).map(|j| ((i * j) % 100) as f32 / 100.0).collect())
        .collect()
}

fn bench_config() -> HnswConfig {
    HnswConfig::new().with_m(16).with_ef_construction(32).with_seed(42)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("hnsw_insert");

    for n in [100, 1000].iter() {
        let vectors = generate_vectors(*n, 128);

        group.bench_with_input(BenchmarkId::from_parameter(n), n, |bencher, _| {
            bencher.iter(|| {
                let mut index = HnswIndex::new(128, bench_config()).unwrap();
                for vec in &vectors {
                    index.insert(black_box(vec)).unwrap();
                }
            })
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("hnsw_search");

    for n in [1000, 5000].iter() {
        let vectors = generate_vectors(*n, 128);
        let mut index = HnswIndex::new(128, bench_config()).unwrap();
        for vec in &vectors {
            index.insert(vec).unwrap();
        }

        let query: Vec<f32> = (0..128).map(|i| i as f32 / 128.0).collect();

        group.bench_with_input(BenchmarkId::from_parameter(n), n, |bencher, _| {
            bencher.iter(|| index.k_nearest(black_box(&query), None, 10).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_search);
criterion_main!(benches);
