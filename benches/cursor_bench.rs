use chained_collections::cursor::{chain, range, repeat, SliceCursor};
use chained_collections::{Allocator, CursorExt, Global, HashMap};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

fn bench_pipeline_1m(c: &mut Criterion) {
    c.bench_function("cursor::range_filter_transform_1m", |b| {
        b.iter(|| {
            let mut p = range(0, 1_000_000, 1)
                .unwrap()
                .filter(|v| v % 3 != 0)
                .transform(|v| v.wrapping_mul(7));
            let mut sum = 0i64;
            p.for_each(|v| sum = sum.wrapping_add(v)).unwrap();
            black_box(sum)
        })
    });

    c.bench_function("cursor::std_bridge_same_pipeline_1m", |b| {
        b.iter(|| {
            let sum: i64 = range(0, 1_000_000, 1)
                .unwrap()
                .filter(|v| v % 3 != 0)
                .transform(|v| v.wrapping_mul(7))
                .into_iter()
                .fold(0i64, |a, v| a.wrapping_add(v));
            black_box(sum)
        })
    });
}

fn bench_zip_enumerate_skip_take(c: &mut Criterion) {
    c.bench_function("cursor::zip_enumerate_skip_take_500k", |b| {
        b.iter(|| {
            let n = range(0, 1_000_000, 1)
                .unwrap()
                .zip(repeat(1u8, None))
                .enumerate()
                .skip(250_000)
                .take(500_000)
                .count_remaining()
                .unwrap();
            black_box(n)
        })
    });

    c.bench_function("cursor::chain_100_members_of_10k", |b| {
        b.iter(|| {
            let members = (0..100)
                .map(|i| {
                    Box::new(range(i * 10_000, (i + 1) * 10_000, 1).unwrap())
                        as Box<dyn chained_collections::Cursor<Item = i64>>
                })
                .collect();
            black_box(chain(members).count_remaining().unwrap())
        })
    });
}

fn bench_copy_slice(c: &mut Criterion) {
    c.bench_function("cursor::copy_strings_100k", |b| {
        let src: Vec<String> = (0..100_000).map(|i| format!("s{i}")).collect();
        let alloc = Allocator::<String>::global().with_clone();
        b.iter(|| {
            let out = SliceCursor::new(&src)
                .copied(&alloc)
                .unwrap()
                .collect_vec()
                .unwrap();
            black_box(out)
        })
    });
}

fn bench_drain_into_map(c: &mut Criterion) {
    c.bench_function("cursor::zip_into_map_100k", |b| {
        b.iter(|| {
            let m: HashMap<i64, i64> = HashMap::from_cursor(
                &Global,
                Default::default(),
                Default::default(),
                16,
                range(0, 100_000, 1).unwrap().zip(range_squares()),
            )
            .unwrap();
            black_box(m.len())
        })
    });
}

fn range_squares() -> impl chained_collections::Cursor<Item = i64> {
    range(0, 100_000, 1).unwrap().transform(|v| v * v)
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_cursor;
    config = bench_config();
    targets = bench_pipeline_1m,
              bench_zip_enumerate_skip_take,
              bench_copy_slice,
              bench_drain_into_map
}
criterion_main!(benches_cursor);
