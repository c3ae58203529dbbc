use rand::Rng;
use rand::seq::SliceRandom;

/// Uniformly random permutation of `items` (Fisher-Yates).
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Up to `n` distinct elements drawn without replacement. Returns fewer when
/// `items` is shorter than `n`.
pub fn sample_unique<T: Clone, R: Rng + ?Sized>(items: &[T], n: usize, rng: &mut R) -> Vec<T> {
    let mut out = shuffled(items, rng);
    out.truncate(n);
    out
}
