//! Criterion benchmarks for section construction.
//! Focus sizes: rows per tier in {5, 20, 50, 200}, three chained tiers.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p stadium

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use stadium::prelude::*;

fn random_tier(rows: usize, rng: &mut StdRng, chained: bool) -> TierCfg {
    let row_widths = (0..rows).map(|_| rng.gen_range(750.0..1_000.0)).collect();
    TierCfg {
        start_pt: pt2(rng.gen_range(4_000.0..12_000.0), rng.gen_range(500.0..3_000.0)),
        row_count: rows,
        row_widths,
        round_to: 10.0,
        build_from_previous_tier: chained,
        ..TierCfg::default()
    }
}

fn random_section(rows: usize, seed: u64) -> Vec<TierCfg> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..3).map(|i| random_tier(rows, &mut rng, i > 0)).collect()
}

fn with_super_riser(mut tiers: Vec<TierCfg>) -> Vec<TierCfg> {
    for t in &mut tiers {
        t.super_riser = Some(SuperRiser {
            row: t.row_count / 2,
            curb_width: 150.0,
            curb_height: 100.0,
            guardrail_width: 250.0,
            ..SuperRiser::default()
        });
    }
    tiers
}

fn bench_section(c: &mut Criterion) {
    let mut group = c.benchmark_group("section");
    for &rows in &[5usize, 20, 50, 200] {
        group.bench_with_input(BenchmarkId::new("build", rows), &rows, |b, &rows| {
            b.iter_batched(
                || random_section(rows, 41),
                |tiers| {
                    let _s = Section::with_xy_plane(tiers).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(
            BenchmarkId::new("build_super_riser", rows),
            &rows,
            |b, &rows| {
                b.iter_batched(
                    || with_super_riser(random_section(rows, 42)),
                    |tiers| {
                        let _s = Section::with_xy_plane(tiers).unwrap();
                    },
                    BatchSize::SmallInput,
                )
            },
        );

        group.bench_with_input(BenchmarkId::new("rows", rows), &rows, |b, &rows| {
            let s = Section::with_xy_plane(random_section(rows, 43)).unwrap();
            b.iter(|| s.rows().map(|r| r.cvalue).sum::<f64>())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_section);
criterion_main!(benches);
