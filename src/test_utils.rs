//! testing utilities

use ark_std::rand::{rngs::StdRng, Rng, SeedableRng};

use crate::FriSoundnessParams;

/// a deterministic rng
pub fn test_rng() -> StdRng {
    // arbitrary seed
    let seed = [
        1, 0, 0, 0, 23, 0, 0, 0, 200, 1, 0, 0, 210, 30, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0,
    ];
    StdRng::from_seed(seed)
}

/// Sample a well-formed parameter set (passes `validate`) of realistic size
pub fn rand_params<R: Rng>(rng: &mut R) -> FriSoundnessParams {
    let num_rounds = rng.gen_range(0..=6);
    let arity_bits = (0..num_rounds).map(|_| rng.gen_range(1..=4)).collect();
    FriSoundnessParams::new(
        rng.gen_range(1..=16),
        rng.gen_range(1..=8),
        rng.gen_range(1..=40),
        rng.gen_range(1.0..=16.0),
        arity_bits,
        num_rounds,
        rng.gen_range(64..=512),
        rng.gen_range(1..=200),
    )
}

/// assert |actual - expected| <= tol * |expected|
#[track_caller]
pub fn assert_rel_eq(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol * expected.abs(),
        "{} differs from {} by more than {} (relative)",
        actual,
        expected,
        tol
    );
}
