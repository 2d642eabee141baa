//! Seeded, reproducible permutation.
//!
//! The seed string is folded into a numeric accumulator by summing its
//! UTF-16 code units. A Fisher–Yates pass then walks from the last index
//! down to 1, advancing a linear congruential generator
//! (`seed = (seed * 9301 + 49297) mod 233280`) at each step and swapping
//! index `i` with `floor(seed / 233280 * (i + 1))`.
//!
//! The output depends only on the items and the seed, so a stored seed is
//! enough to rebuild the exact question order a client saw. The generator
//! is weak and must never be used where unpredictability matters.

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233280;

/// Fold a seed string into the generator's starting state.
pub fn seed_value(seed: &str) -> u64 {
    seed.encode_utf16().map(u64::from).sum()
}

/// Return `items` permuted deterministically by `seed`.
pub fn seeded_shuffle<T>(mut items: Vec<T>, seed: &str) -> Vec<T> {
    let mut state = seed_value(seed);
    for i in (1..items.len()).rev() {
        state = (state * MULTIPLIER + INCREMENT) % MODULUS;
        let j = ((state as f64 / MODULUS as f64) * (i + 1) as f64).floor() as usize;
        items.swap(i, j);
    }
    items
}
