//! Word shingling for lexical fingerprinting.
//!
//! A shingle is a window of `k` consecutive stopword-filtered tokens. Each
//! shingle is hashed with a polynomial rolling hash over per-token xxh3
//! hashes, then folded to 32 bits. The rolling form computes every window in
//! O(n); [`hash_shingle`] computes a single window directly and yields the
//! same value.

use xxhash_rust::xxh3::xxh3_64_with_seed;

/// A large prime used as the base for the polynomial hash. It is XORed with
/// a seed-derived value so the base differs between seeds.
const BASE: u64 = 1_000_003;

/// Produce all contiguous `k`-token windows.
///
/// When fewer than `k` tokens are available the whole token sequence is a
/// single shingle; an empty input has no shingles.
pub fn generate_shingles<S: AsRef<str>>(tokens: &[S], k: usize) -> Vec<&[S]> {
    if tokens.is_empty() || k == 0 {
        return Vec::new();
    }
    if tokens.len() < k {
        return vec![tokens];
    }
    tokens.windows(k).collect()
}

/// Hash one shingle to 32 bits.
pub fn hash_shingle<S: AsRef<str>>(shingle: &[S], seed: u64) -> u32 {
    let base = rolling_base(seed);
    let h = shingle.iter().fold(0u64, |h, token| {
        h.wrapping_mul(base).wrapping_add(token_hash(token.as_ref(), seed))
    });
    fold32(h)
}

/// Compute rolling-hash shingle fingerprints deterministically in O(n).
///
/// Yields one hash per window of [`generate_shingles`], in the same order.
/// The caller must provide canonical, stopword-filtered tokens in order.
pub fn make_shingles_rolling<S: AsRef<str>>(tokens: &[S], k: usize, seed: u64) -> Vec<u32> {
    let n = tokens.len();
    if k == 0 || n == 0 {
        return Vec::new();
    }
    if n < k {
        return vec![hash_shingle(tokens, seed)];
    }

    let mut th: Vec<u64> = Vec::with_capacity(n);
    th.extend(tokens.iter().map(|t| token_hash(t.as_ref(), seed)));

    let base = rolling_base(seed);

    // base^(k-1), used to remove the oldest token from the window.
    let mut base_km1 = 1u64;
    for _ in 1..k {
        base_km1 = base_km1.wrapping_mul(base);
    }

    let mut out = Vec::with_capacity(n - k + 1);
    let mut h = 0u64;
    for &val in th.iter().take(k) {
        h = h.wrapping_mul(base).wrapping_add(val);
    }
    out.push(fold32(h));

    for (&old, &new) in th.iter().zip(th.iter().skip(k)) {
        h = h.wrapping_sub(old.wrapping_mul(base_km1));
        h = h.wrapping_mul(base).wrapping_add(new);
        out.push(fold32(h));
    }
    out
}

#[inline]
fn token_hash(token: &str, seed: u64) -> u64 {
    xxh3_64_with_seed(token.as_bytes(), seed)
}

#[inline]
fn rolling_base(seed: u64) -> u64 {
    BASE ^ splitmix64(seed)
}

/// Fold a 64-bit hash into 32 bits, keeping entropy from both halves.
#[inline]
fn fold32(h: u64) -> u32 {
    ((h >> 32) ^ (h & 0xFFFF_FFFF)) as u32
}

/// A 64-bit mixer with good distribution.
#[inline]
pub(crate) fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
