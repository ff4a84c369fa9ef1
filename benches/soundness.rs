//! Evaluating the FRI soundness bound, one-off and in batches
//! `cargo bench --bench soundness`

#[macro_use]
extern crate criterion;

use ark_std::rand::{rngs::StdRng, Rng, SeedableRng};
use criterion::{black_box, Criterion};
use fri_soundness::{estimate, estimate_batch, FriSoundnessParams};

fn rand_params(rng: &mut StdRng) -> FriSoundnessParams {
    let num_rounds = rng.gen_range(1..=8);
    FriSoundnessParams::new(
        1,
        rng.gen_range(1..=4),
        rng.gen_range(16..=32),
        rng.gen_range(3.0..=16.0),
        (0..num_rounds).map(|_| rng.gen_range(1..=4)).collect(),
        num_rounds,
        rng.gen_range(128..=256),
        rng.gen_range(20..=200),
    )
}

fn single(c: &mut Criterion) {
    let params = FriSoundnessParams::new(1, 1, 20, 4.0, vec![2, 2, 2], 3, 128, 80);
    let mut group = c.benchmark_group("soundness::single");
    group.bench_function("estimate", |b| b.iter(|| estimate(black_box(&params))));
    group.bench_function("log2_estimate", |b| {
        b.iter(|| black_box(&params).log2_estimate())
    });
    group.finish();
}

fn batch(c: &mut Criterion) {
    let rng = &mut StdRng::from_seed([42; 32]);
    for size in [1 << 10, 1 << 14] {
        let batch: Vec<_> = (0..size).map(|_| rand_params(rng)).collect();
        let mut group = c.benchmark_group(format!("soundness::batch={}", size));
        group.sample_size(10);
        group.bench_function("estimate_batch", |b| {
            b.iter(|| estimate_batch(black_box(&batch)))
        });
        group.bench_function("sequential", |b| {
            b.iter(|| black_box(&batch).iter().map(estimate).collect::<Vec<_>>())
        });
        group.finish();
    }
}

criterion_group!(benches, single, batch);

criterion_main!(benches);
