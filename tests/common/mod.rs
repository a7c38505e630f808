//! Shared helpers for the end-to-end tests

#![allow(dead_code)]

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Deterministic jitter in [-0.1, 0.1), golden-ratio spaced
pub fn jitter(i: usize) -> f64 {
    (i as f64 * 0.618_033_988_749_894_9).fract() * 0.2 - 0.1
}

/// `len` jittered points around `c`, indexed from `start`
pub fn level(c: f64, start: usize, len: usize) -> Vec<f64> {
    (start..start + len).map(|i| c + jitter(i)).collect()
}

/// Consecutive jittered levels with continuous jitter indices
pub fn levels(parts: &[(f64, usize)]) -> Vec<f64> {
    let mut out = Vec::new();
    for &(c, len) in parts {
        let start = out.len();
        out.extend(level(c, start, len));
    }
    out
}

/// Gaussian noise around piecewise-constant levels
pub fn gaussian_levels(seed: u64, parts: &[(f64, usize)], sigma: f64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, sigma).unwrap();
    parts
        .iter()
        .flat_map(|&(c, len)| std::iter::repeat(c).take(len))
        .map(|c| c + noise.sample(&mut rng))
        .collect()
}

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
