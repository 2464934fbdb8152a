//! Criterion micro-benchmarks for raw arena allocation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strand_arena::{ArenaConfig, ArenaStorage, StackStorage};
use strand_core::AllocStrategy;

const N: usize = 10_000;

fn bench_bump_8b_10k(c: &mut Criterion) {
    c.bench_function("arena_bump_8b_10k", |b| {
        b.iter_batched_ref(
            || ArenaStorage::new(ArenaConfig::new(N * 8)).unwrap(),
            |storage| {
                let arena = storage.arena();
                for _ in 0..N {
                    black_box(arena.allocate(8, 8).unwrap());
                }
                arena.used()
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_mixed_alignment(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let requests: Vec<(usize, usize)> = (0..N)
        .map(|_| {
            let roll = rng.next_u64();
            let size = 1 + (roll % 64) as usize;
            let align = 1usize << ((roll >> 8) % 5);
            (size, align)
        })
        .collect();
    let capacity: usize = requests.iter().map(|&(size, align)| size + align).sum();

    c.bench_function("arena_mixed_alignment_10k", |b| {
        b.iter_batched_ref(
            || ArenaStorage::new(ArenaConfig::new(capacity)).unwrap(),
            |storage| {
                let arena = storage.arena();
                for &(size, align) in &requests {
                    black_box(arena.allocate(size, align).unwrap());
                }
                arena.used()
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_handle_allocate(c: &mut Criterion) {
    c.bench_function("arena_handle_u64_1k", |b| {
        b.iter(|| {
            let mut storage = StackStorage::<8192>::new();
            let arena = storage.arena();
            let handle = arena.handle::<u64>();
            for _ in 0..1_000 {
                black_box(handle.allocate(1).unwrap());
            }
            arena.allocation_count()
        });
    });
}

fn bench_exhaustion(c: &mut Criterion) {
    c.bench_function("arena_out_of_space", |b| {
        let mut storage = StackStorage::<64>::new();
        let arena = storage.arena();
        arena.allocate(64, 1).unwrap();
        b.iter(|| black_box(arena.allocate(black_box(8), 8).is_err()));
    });
}

criterion_group!(
    benches,
    bench_bump_8b_10k,
    bench_mixed_alignment,
    bench_handle_allocate,
    bench_exhaustion
);
criterion_main!(benches);
