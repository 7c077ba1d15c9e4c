//! Uniform random permutation used to blend provider results

use rand::Rng;

/// Shuffle `items` in place with the Fisher–Yates algorithm.
///
/// Every permutation is equally likely given a uniform `rng`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
