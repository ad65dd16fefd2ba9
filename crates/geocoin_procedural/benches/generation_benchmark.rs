//! Benchmark for cache generation performance.
//!
//! TARGET: a full 17x17 visibility window decided well under a frame
//!
//! Run with: cargo bench --package geocoin_procedural --bench generation_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use geocoin_grid::Cell;
use geocoin_procedural::{hash_to_unit, CacheGenerator, GeneratorConfig};

fn benchmark_hash_to_unit(c: &mut Criterion) {
    c.bench_function("hash_to_unit", |b| {
        let mut i = 0i64;
        b.iter(|| {
            i = i.wrapping_add(1);
            black_box(hash_to_unit(black_box(&Cell::new(i, -i).key())))
        });
    });
}

fn benchmark_visibility_window(c: &mut Criterion) {
    let gen = CacheGenerator::new(GeneratorConfig::default());

    let mut group = c.benchmark_group("visibility_window");

    // Radius 8 = 17x17 cells
    group.throughput(Throughput::Elements(17 * 17));
    group.bench_function("spawn_decisions_17x17", |b| {
        b.iter(|| {
            for i in -8..=8 {
                for j in -8..=8 {
                    black_box(gen.should_spawn(Cell::new(369_894 + i, -1_220_628 + j)));
                }
            }
        });
    });

    group.finish();
}

fn benchmark_materialize(c: &mut Criterion) {
    let gen = CacheGenerator::new(GeneratorConfig {
        spawn_threshold: 1.0,
        ..GeneratorConfig::default()
    });

    c.bench_function("materialize_cache", |b| {
        let mut i = 0i64;
        b.iter(|| {
            i = i.wrapping_add(1);
            black_box(gen.materialize(Cell::new(i, i / 2)))
        });
    });
}

criterion_group!(
    benches,
    benchmark_hash_to_unit,
    benchmark_visibility_window,
    benchmark_materialize
);
criterion_main!(benches);
