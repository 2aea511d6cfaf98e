use rand::Rng;

/// Shuffles `items` in place with Fisher–Yates.
///
/// Every permutation is equally likely given an unbiased `rng`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
