//! Direct `O(n²)` DCT-II / DCT-III.
//!
//! Same conventions as [`crate::dct`], usable for any length. Only meant as a
//! baseline for benchmarks and as a test oracle.

use alloc::vec::Vec;

use crate::num::Float;

fn basis(n: usize, j: usize, k: usize) -> f64 {
    libm::cos(core::f64::consts::PI * ((2 * j + 1) * k) as f64 / (2 * n) as f64)
}

/// `X[k] = Σ_j x[j]·cos(π(2j+1)k / 2n)`.
pub fn dct2<T: Float>(input: &[T]) -> Vec<T> {
    let n = input.len();
    (0..n)
        .map(|k| {
            let sum: f64 = input
                .iter()
                .enumerate()
                .map(|(j, &x)| x.to_f64() * basis(n, j, k))
                .sum();
            T::from_f64(sum)
        })
        .collect()
}

/// `x[j] = (4/n)·(X[0]/2 + Σ_{k≥1} X[k]·cos(π(2j+1)k / 2n))`.
pub fn dct3<T: Float>(input: &[T]) -> Vec<T> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }
    let scale = 4.0 / n as f64;
    (0..n)
        .map(|j| {
            let tail: f64 = input
                .iter()
                .enumerate()
                .skip(1)
                .map(|(k, &x)| x.to_f64() * basis(n, j, k))
                .sum();
            T::from_f64(scale * (0.5 * input[0].to_f64() + tail))
        })
        .collect()
}
