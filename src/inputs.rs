use std::ops::Range;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Fills two vectors of `size` elements with uniform values from `range`.
///
/// Elements are drawn pair-wise (`a[i]` then `b[i]`) from the same generator, so a
/// seeded `rng` always yields the same inputs.
///
/// # Panics
///
/// Panics if `range` is empty.
pub fn generate_inputs<R: Rng + ?Sized>(
    rng: &mut R,
    size: usize,
    range: Range<f32>,
) -> (Vec<f32>, Vec<f32>) {
    let dist = Uniform::from(range);
    let mut a = Vec::with_capacity(size);
    let mut b = Vec::with_capacity(size);
    for _ in 0..size {
        a.push(dist.sample(rng));
        b.push(dist.sample(rng));
    }
    (a, b)
}
