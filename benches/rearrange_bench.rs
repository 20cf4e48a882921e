//! End-to-end benchmarks for the rearrangement and packing engines.
//!
//! Covers the two hot paths: map-based gather (random and contiguous maps)
//! and the contiguous-split packing pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use slate_core::{contiguous_split, gather, Column, DataType, ExecContext, Table};

fn build_table(rows: usize) -> Table {
    let ints: Vec<i64> = (0..rows as i64).collect();
    let floats: Vec<f64> = (0..rows).map(|i| i as f64 * 0.5).collect();
    let opts: Vec<Option<i32>> = (0..rows as i32)
        .map(|i| if i % 7 == 0 { None } else { Some(i) })
        .collect();
    Table::new(vec![
        Column::from_slice(DataType::Int64, &ints).unwrap(),
        Column::from_slice(DataType::Float64, &floats).unwrap(),
        Column::from_options(DataType::Int32, &opts).unwrap(),
    ])
    .unwrap()
}

fn bench_gather(c: &mut Criterion) {
    let mut group = c.benchmark_group("gather");
    let ctx = ExecContext::default();

    for &rows in &[1_000usize, 100_000] {
        let table = build_table(rows);
        let mut rng = StdRng::seed_from_u64(42);
        let random: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..rows as i64)).collect();
        let random_map = Column::from_slice(DataType::Int64, &random).unwrap();
        let sequential: Vec<i64> = (0..rows as i64).collect();
        let sequential_map = Column::from_slice(DataType::Int64, &sequential).unwrap();

        group.bench_with_input(BenchmarkId::new("random", rows), &rows, |b, _| {
            b.iter(|| {
                let out = gather(
                    &table.view(),
                    &random_map.view(),
                    black_box(true),
                    &ctx,
                )
                .unwrap();
                black_box(out)
            })
        });
        group.bench_with_input(BenchmarkId::new("sequential", rows), &rows, |b, _| {
            b.iter(|| {
                let out = gather(
                    &table.view(),
                    &sequential_map.view(),
                    black_box(true),
                    &ctx,
                )
                .unwrap();
                black_box(out)
            })
        });
    }
    group.finish();
}

fn bench_contiguous_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("contiguous_split");
    let ctx = ExecContext::default();

    for &rows in &[1_000usize, 100_000] {
        let table = build_table(rows);
        let splits: Vec<usize> = (1..8).map(|i| i * rows / 8).collect();

        group.bench_with_input(BenchmarkId::new("eight_way", rows), &rows, |b, _| {
            b.iter(|| {
                let packed = contiguous_split(&table.view(), &splits, &ctx).unwrap();
                black_box(packed)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_gather, bench_contiguous_split);
criterion_main!(benches);
