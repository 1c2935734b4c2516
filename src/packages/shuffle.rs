//! Deterministic shuffling for practice packages
//!
//! Package order must be reproducible from the seed stored in the package
//! config, so the generator cannot use process randomness. The RNG here is
//! mulberry32: a tiny 32-bit mixer whose output depends only on the seed,
//! on every platform. Changing its constants would silently reorder every
//! package generated by an earlier version, so they are part of the stored
//! data contract.

use chrono::Utc;
use rand::Rng;

/// Alphabet for the random part of generated seed strings
const SEED_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix in generated seed strings
const SEED_SUFFIX_LEN: usize = 13;

/// Deterministic 32-bit PRNG (mulberry32)
///
/// Produces an f64 stream in `[0, 1)`. Same seed, same sequence, forever.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Create a generator from a 32-bit seed
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }
}

/// Hash a seed string down to the 32-bit value that feeds [`Mulberry32`]
///
/// Rolling `hash * 31 + unit` over the string's UTF-16 code units with
/// 32-bit signed wraparound, then the absolute value. Collisions are fine;
/// stability across versions is what matters.
pub fn hash_seed(seed: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in seed.encode_utf16() {
        hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

/// Shuffle a copy of `items` using a generator seeded from `seed`
///
/// Fisher-Yates from the top index down, with a fresh RNG per call so two
/// shuffles with the same seed never influence each other. The input slice
/// is left untouched.
pub fn seeded_shuffle<T: Clone>(items: &[T], seed: &str) -> Vec<T> {
    let mut shuffled = items.to_vec();
    let mut rng = Mulberry32::new(hash_seed(seed));

    for i in (1..shuffled.len()).rev() {
        // next_f64() < 1.0, so j <= i always
        let j = (rng.next_f64() * (i + 1) as f64) as usize;
        shuffled.swap(i, j);
    }

    shuffled
}

/// Mint a fresh seed string: epoch milliseconds plus a random base-36 suffix
///
/// The millisecond prefix keeps seeds roughly sortable by creation time;
/// the suffix separates configs generated within the same millisecond.
pub fn generate_seed() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SEED_SUFFIX_LEN)
        .map(|_| SEED_ALPHABET[rng.random_range(0..SEED_ALPHABET.len())] as char)
        .collect();

    format!("{}{}", Utc::now().timestamp_millis(), suffix)
}
