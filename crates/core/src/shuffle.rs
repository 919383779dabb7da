//! Play-order generation.

use rand::Rng;

/// In-place Fisher–Yates shuffle.
///
/// Walks from the last index down to 1 and swaps each slot with a uniformly
/// drawn slot in `[0, i]`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// A uniformly random permutation of `0..len`.
#[must_use]
pub fn shuffled_indices<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    fisher_yates(&mut order, rng);
    order
}
