use chained_collections::{Allocator, Global, HashMap, HashSet};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize) -> (HashMap<'static, String, u64>, Vec<String>) {
    let mut m = HashMap::new(&Global).unwrap();
    let keys: Vec<String> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        let _ = m.put(k.clone(), i as u64).unwrap();
    }
    (m, keys)
}

fn bench_put_fresh_100k(c: &mut Criterion) {
    c.bench_function("map::put_fresh_100k", |b| {
        b.iter_batched(
            || HashMap::<String, u64>::new(&Global).unwrap(),
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    let _ = m.put(key(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_put_presized_100k(c: &mut Criterion) {
    c.bench_function("map::put_presized_100k", |b| {
        b.iter_batched(
            || HashMap::<String, u64>::with_capacity(&Global, 262_144).unwrap(),
            |mut m| {
                for (i, x) in lcg(3).take(100_000).enumerate() {
                    let _ = m.put(key(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove_random_10k(c: &mut Criterion) {
    c.bench_function("map::remove_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let (m, keys) = filled(5, 110_000);
                // Precompute 10k unique indices via LCG
                let n = keys.len();
                let mut sel = std::collections::HashSet::with_capacity(10_000);
                let mut s = 0x9e3779b97f4a7c15u64;
                while sel.len() < 10_000 {
                    s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                    sel.insert((s as usize) % n);
                }
                let to_remove: Vec<String> = sel.into_iter().map(|i| keys[i].clone()).collect();
                (m, to_remove)
            },
            |(mut m, to_remove)| {
                for k in &to_remove { let _ = m.remove(k); }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_10k(c: &mut Criterion) {
    c.bench_function("map::get_hit_10k_on_100k", |b| {
        let (m, keys) = filled(7, 100_000);
        let n = keys.len();
        let mut s = 0x9e3779b97f4a7c15u64;
        let queries: Vec<String> = (0..10_000)
            .map(|_| {
                s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                keys[(s as usize) % n].clone()
            })
            .collect();
        b.iter(|| {
            for k in &queries { black_box(m.get(k)); }
        })
    });
}

fn bench_get_miss_10k(c: &mut Criterion) {
    c.bench_function("map::get_miss_10k_on_100k", |b| {
        let (m, _) = filled(11, 100_000);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for _ in 0..10_000 {
                let k = key(miss.next().unwrap());
                black_box(m.get(&k));
            }
        })
    });
}

fn bench_iter_and_for_each_mut(c: &mut Criterion) {
    c.bench_function("map::iter_all_100k", |b| {
        let (m, _) = filled(999, 100_000);
        b.iter(|| {
            let mut sum = 0u64;
            for (_k, v) in m.iter() {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });

    c.bench_function("map::for_each_mut_increment_all_100k", |b| {
        b.iter_batched(
            || filled(1001, 100_000).0,
            |mut m| {
                m.for_each_mut(|_, v| *v = v.wrapping_add(1));
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_copy_100k(c: &mut Criterion) {
    c.bench_function("map::copy_100k", |b| {
        let (m, _) = filled(2024, 100_000);
        b.iter(|| black_box(m.copy().unwrap()))
    });
}

fn bench_set_algebra(c: &mut Criterion) {
    c.bench_function("set::intersection_50k_x_50k", |b| {
        let alloc = Allocator::<u64>::global();
        let mut l = HashSet::new(&alloc).unwrap();
        let mut r = HashSet::new(&alloc).unwrap();
        for x in lcg(77).take(50_000) {
            l.add(x % 80_000).unwrap();
        }
        for x in lcg(78).take(50_000) {
            r.add(x % 80_000).unwrap();
        }
        b.iter(|| black_box(l.intersection(&r).unwrap().len()))
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_insert;
    config = bench_config();
    targets = bench_put_fresh_100k, bench_put_presized_100k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_remove_random_10k,
              bench_get_hit_10k,
              bench_get_miss_10k,
              bench_iter_and_for_each_mut,
              bench_copy_100k,
              bench_set_algebra
}
criterion_main!(benches_insert, benches_ops);
