//! Hash strategies injected into the maps

/// Maps a string key to a non-negative integer.
///
/// Implementations must be deterministic. Uniformity only matters for performance; the maps stay
/// correct even if every key hashes to the same value. Any `Fn(&str) -> usize` is a
/// `KeyHasher`, so closures and plain functions can be passed directly.
pub trait KeyHasher {
    /// Hashes `key`
    fn hash_key(&self, key: &str) -> usize;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> usize,
{
    fn hash_key(&self, key: &str) -> usize {
        self(key)
    }
}

/// Function-pointer hash strategy used by the default map types
pub type HashFn = fn(&str) -> usize;

/// Sums the code points of `key`.
///
/// Anagrams collide, which makes this handy for exercising collision handling.
#[must_use]
pub fn hash_function_1(key: &str) -> usize {
    key.chars().fold(0usize, |hash, letter| hash.wrapping_add(u32::from(letter) as usize))
}

/// Sums each code point weighted by its one-based position in `key`.
#[must_use]
pub fn hash_function_2(key: &str) -> usize {
    key.chars().zip(1usize..).fold(0usize, |hash, (letter, position)| {
        hash.wrapping_add(position.wrapping_mul(u32::from(letter) as usize))
    })
}
