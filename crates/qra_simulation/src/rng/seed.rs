//! Per-risk seed derivation.

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Derives the seed of stream `index` from `base`.
///
/// Uses the SplitMix64 finaliser on `base + (index + 1) * gamma`, so
/// neighbouring indices give unrelated seeds and stream 0 differs from
/// `base` itself.
///
/// # Examples
///
/// ```rust
/// use qra_simulation::rng::derive_stream_seed;
///
/// assert_eq!(derive_stream_seed(7, 3), derive_stream_seed(7, 3));
/// assert_ne!(derive_stream_seed(7, 3), derive_stream_seed(7, 4));
/// ```
#[inline]
pub fn derive_stream_seed(base: u64, index: usize) -> u64 {
    let mut z = base.wrapping_add((index as u64).wrapping_add(1).wrapping_mul(GOLDEN_GAMMA));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
