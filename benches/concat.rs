use std::{hint::black_box, time::Duration};

use criterion::{Criterion, criterion_group, criterion_main};
use rand::{RngExt, SeedableRng, rngs::StdRng};
use resource_iter::prelude::*;

fn concat(criterion: &mut Criterion) {
    let seed = 0;
    let mut rng = StdRng::seed_from_u64(seed);

    macro_rules! bench_fn {
        ($group:ident.$fn_name:ident($parts:expr)) => {
            $group.bench_function(stringify!($fn_name), |bencher| {
                bencher.iter(|| $fn_name(black_box($parts)));
            });
        };
    }

    // Many short sources, so that switching between them dominates.
    let parts: Box<[Vec<u32>]> = std::iter::repeat_with(|| {
        let len = rng.random_range(0..8);
        std::iter::repeat_with(|| rng.random_range(0..100)).take(len).collect()
    })
    .take(50_000)
    .collect();
    println!("Seed: {seed}");
    println!("First 3 parts: {:?}", &parts[..3]);

    let mut group = criterion.benchmark_group("flatten_sum");
    bench_fn!(group.iter_flatten_sum(&parts));
    bench_fn!(group.ri_concat_sum(&parts));
    bench_fn!(group.ri_flat_map_sum(&parts));
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(5))
        .measurement_time(Duration::from_secs(30))
        .sample_size(100);
    targets = concat
}
criterion_main!(benches);

fn iter_flatten_sum(parts: &[Vec<u32>]) -> u64 {
    parts.iter().flatten().map(|&num| u64::from(num)).sum()
}

fn ri_concat_sum(parts: &[Vec<u32>]) -> u64 {
    let mut iter = parts
        .iter()
        .fold(resource_iter::empty::<&u32>().concat(resource_iter::empty()), |iter, part| {
            iter + resource_iter::from_iter(part)
        });
    iter.fold(0, |sum, &num| sum + u64::from(num))
        .unwrap_or_default()
}

fn ri_flat_map_sum(parts: &[Vec<u32>]) -> u64 {
    resource_iter::from_iter(parts)
        .flat_map_iter(|part| part)
        .fold(0, |sum, &num| sum + u64::from(num))
        .unwrap_or_default()
}
