#[cfg(test)]
mod tests;

/// Number of components in an embedding vector unless configured otherwise.
pub const DEFAULT_DIMENSION: usize = 100;

const HASH_MULTIPLIER: i32 = 31;

/// Strategy interface for turning text into a fixed-dimension vector.
///
/// Implementations must be deterministic: the same text always produces the
/// same vector for the lifetime of the index. Swapping the implementation
/// (e.g. for a learned embedding model) requires a full reindex.
pub trait Vectorizer: Send + Sync {
    /// Number of components in every vector produced by [`Vectorizer::embed`].
    fn dimension(&self) -> usize;

    /// Embed `text` into a unit-length vector of [`Vectorizer::dimension`]
    /// components. Input with no word tokens yields the all-zero vector.
    fn embed(&self, text: &str) -> Vec<f32>;
}

/// Hashed bag-of-words vectorizer.
///
/// Tokens are lowercased words (runs of alphanumerics and underscores). Each
/// token is hashed with a rolling polynomial hash over its UTF-16 code units
/// and counted into one of `dimension` buckets; the bucket counts are then
/// normalized to unit Euclidean length. Token order never affects the result.
#[derive(Debug, Clone)]
pub struct HashingVectorizer {
    dimension: usize,
}

impl HashingVectorizer {
    #[inline]
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Default for HashingVectorizer {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl Vectorizer for HashingVectorizer {
    #[inline]
    fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut accumulator = vec![0.0f32; self.dimension];

        let lowered = text.to_lowercase();
        let tokens = lowered
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|token| !token.is_empty());

        for token in tokens {
            let mut hash: i32 = 0;
            for unit in token.encode_utf16() {
                hash = hash
                    .wrapping_mul(HASH_MULTIPLIER)
                    .wrapping_add(i32::from(unit));
            }
            let bucket = hash.unsigned_abs() as usize % self.dimension;
            accumulator[bucket] += 1.0;
        }

        let norm = accumulator
            .iter()
            .map(|value| value * value)
            .sum::<f32>()
            .sqrt();

        // Degenerate input (no tokens) stays at all zeros rather than
        // dividing by a zero norm.
        if norm > 0.0 {
            for value in &mut accumulator {
                *value /= norm;
            }
        }

        accumulator
    }
}
