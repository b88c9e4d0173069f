//! Seeded random sources.
//!
//! Every engine owns its own [`StdRng`]; there is no process-wide generator.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a deterministic random source from a seed.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_tspga::random::create_rng;
///
/// let a: u64 = create_rng(42).random();
/// let b: u64 = create_rng(42).random();
/// assert_eq!(a, b);
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a random source from `seed`, or from fresh entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Shuffles a slice in place (Fisher-Yates).
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Returns a uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    shuffle(&mut perm, rng);
    perm
}
