//! Per-operation benchmarks for the SLRU replacement engine.
//!
//! Run with: `cargo bench --bench slru`
//!
//! Candidate sets model one associativity set, so `victim` cost scales with
//! the number of ways and `touch` cost with the protected capacity.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use seglru::ds::SlotId;
use seglru::policy::slru::{SlruEntry, SlruPolicy};

const SLOTS: usize = 4_096;

fn warmed(protected: usize) -> (SlruPolicy, Vec<SlruEntry>) {
    let mut policy = SlruPolicy::new(protected, SLOTS - protected);
    let mut table = vec![policy.instantiate_entry(); SLOTS];
    for i in 0..SLOTS {
        policy.reset(&mut table, SlotId::from_index(i));
    }
    for i in (0..SLOTS).step_by(2) {
        policy.touch(&mut table, SlotId::from_index(i));
    }
    (policy, table)
}

fn bench_touch(c: &mut Criterion) {
    let mut group = c.benchmark_group("slru_touch");
    for &protected in &[8usize, 64, 512] {
        group.bench_with_input(
            BenchmarkId::from_parameter(protected),
            &protected,
            |b, &protected| {
                let (mut policy, mut table) = warmed(protected);
                let mut rng = StdRng::seed_from_u64(7);
                b.iter(|| {
                    let slot = SlotId::from_index(rng.gen_range(0..SLOTS));
                    policy.touch(&mut table, black_box(slot));
                });
            },
        );
    }
    group.finish();
}

fn bench_victim(c: &mut Criterion) {
    let mut group = c.benchmark_group("slru_victim");
    for &ways in &[4usize, 8, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(ways), &ways, |b, &ways| {
            let (mut policy, mut table) = warmed(SLOTS / 4);
            let sets = SLOTS / ways;
            let mut set = 0;
            b.iter(|| {
                let candidates: Vec<SlotId> = (0..ways)
                    .map(|w| SlotId::from_index(set * ways + w))
                    .collect();
                let victim = policy.victim(&mut table, black_box(&candidates));
                policy.reset(&mut table, victim);
                set = (set + 1) % sets;
            });
        });
    }
    group.finish();
}

fn bench_reset_invalidate(c: &mut Criterion) {
    c.bench_function("slru_reset_invalidate", |b| {
        b.iter_batched(
            || warmed(256),
            |(mut policy, mut table)| {
                for i in 0..256 {
                    let slot = SlotId::from_index(i * 2);
                    policy.invalidate(&mut table, slot);
                    policy.reset(&mut table, slot);
                }
                black_box(policy.protected_len())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_touch, bench_victim, bench_reset_invalidate);
criterion_main!(benches);
