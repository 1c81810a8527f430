use std::collections::BTreeMap;
use std::hint::black_box;
use std::ops::Bound::{Excluded, Included};

use compactmap::{CompactHashMap, CompactMap};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// Deterministic pseudo-random keys so every run sees the same layout.
fn keys(count: usize) -> Vec<u64> {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");

    for size in [1_000, 10_000, 100_000] {
        let input = keys(size);
        group.bench_with_input(BenchmarkId::new("CompactMap", size), &input, |b, input| {
            b.iter(|| {
                let mut map = CompactMap::new();
                for &key in input {
                    map.insert(key, key);
                }
                black_box(map.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("CompactHashMap", size), &input, |b, input| {
            b.iter(|| {
                let mut map = CompactHashMap::new();
                for &key in input {
                    map.insert(key, key);
                }
                black_box(map.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &input, |b, input| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &key in input {
                    map.insert(key, key);
                }
                black_box(map.len())
            });
        });
    }

    group.finish();
}

fn bench_front_and_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_edges");

    for size in [10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("descending", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = CompactMap::new();
                for key in (0..size as u64).rev() {
                    map.insert(key, ());
                }
                black_box(map.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("ascending", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = CompactMap::new();
                for key in 0..size as u64 {
                    map.insert(key, ());
                }
                black_box(map.len())
            });
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let input = keys(100_000);
    let map: CompactMap<u64, u64> = input.iter().map(|&key| (key, key)).collect();
    let hashed: CompactHashMap<u64, u64> = input.iter().map(|&key| (key, key)).collect();
    let btree: BTreeMap<u64, u64> = input.iter().map(|&key| (key, key)).collect();

    group.bench_function("CompactMap::get", |b| {
        b.iter(|| input.iter().filter(|key| map.get(*key).is_some()).count())
    });
    group.bench_function("CompactMap::floor", |b| {
        b.iter(|| input.iter().filter_map(|key| map.floor(&(key / 2))).count())
    });
    group.bench_function("CompactHashMap::get", |b| {
        b.iter(|| input.iter().filter(|key| hashed.get(*key).is_some()).count())
    });
    group.bench_function("BTreeMap::get", |b| {
        b.iter(|| input.iter().filter(|key| btree.get(*key).is_some()).count())
    });

    group.finish();
}

fn bench_range(c: &mut Criterion) {
    let map: CompactMap<u64, u64> = (0..100_000).map(|key| (key, key)).collect();

    c.bench_function("range_sum_1000", |b| {
        b.iter(|| {
            let view = map.range(Included(40_000), Excluded(41_000)).unwrap();
            black_box(view.values().sum::<u64>())
        })
    });
    c.bench_function("descending_sum_1000", |b| {
        b.iter(|| {
            let view = map.range(Included(40_000), Excluded(41_000)).unwrap().descending();
            black_box(view.values().sum::<u64>())
        })
    });
}

criterion_group!(benches, bench_insert, bench_front_and_back, bench_lookup, bench_range);
criterion_main!(benches);
