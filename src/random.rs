//! Sampling helpers over an injected [`rand::Rng`].
//!
//! Every stochastic function in the crate takes `&mut R` where
//! `R: Rng + ?Sized`. Production callers pass [`rand::rng()`]; tests pass a
//! seeded `StdRng` for reproducibility.

use core::f64::consts::PI;

#[allow(unused_imports)]
use num_traits::Float;
use rand::Rng;

/// Uniform sample in `[min, max)`. Returns `min` when the range is empty.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if !(max > min) {
        return min;
    }
    min + rng.random::<f64>() * (max - min)
}

/// Sample from the standard normal distribution (Box-Muller).
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // random() is in [0, 1); keep u1 away from zero so ln stays finite.
    let u1: f64 = rng.random::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Uniform angle in `[0, 2π)`.
pub fn angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random::<f64>() * 2.0 * PI
}

/// Uniform index in `0..len`. `len` must be non-zero.
pub fn index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0);
    ((rng.random::<f64>() * len as f64) as usize).min(len.saturating_sub(1))
}
