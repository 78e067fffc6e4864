//! Deterministic pure-Rust embedder based on signed feature hashing.
//!
//! Not a semantic model — lexical overlap drives the cosine similarity.
//! It is the default backend because it needs no network, no model files,
//! and produces the same vector for the same text on every build, which
//! keeps offline runs and tests reproducible.

use async_trait::async_trait;

use crate::embedding::{EmbedError, Embedder};

const DEFAULT_DIMENSIONS: usize = 384;

/// Hashes lowercase word unigrams and character trigrams into a signed
/// fixed-dimension vector, L2-normalized.
pub struct HashedEmbedder {
    dimensions: usize,
}

impl Default for HashedEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

impl HashedEmbedder {
    pub fn new(dimensions: usize) -> Self {
        assert!(dimensions > 0, "embedding dimension must be positive");
        Self { dimensions }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimensions()];
        let lowered = text.to_lowercase();

        for word in lowered.split(|c: char| !c.is_alphanumeric()) {
            if word.is_empty() {
                continue;
            }
            self.add_feature(&mut vector, word.as_bytes());

            // Character trigrams give partial credit for morphological
            // variants (method/methodology, result/results).
            let chars: Vec<char> = word.chars().collect();
            for gram in chars.windows(3) {
                let gram: String = gram.iter().collect();
                self.add_feature(&mut vector, gram.as_bytes());
            }
        }

        l2_normalize(&mut vector);
        vector
    }

    fn add_feature(&self, vector: &mut [f32], feature: &[u8]) {
        let hash = fnv1a64(feature);
        let index = (hash % self.dimensions as u64) as usize;
        // Top bit decides sign so colliding features tend to cancel
        // rather than pile up.
        let sign = if hash & (1 << 63) == 0 { 1.0 } else { -1.0 };
        vector[index] += sign;
    }
}

#[async_trait]
impl Embedder for HashedEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

/// FNV-1a, written out rather than `DefaultHasher` so vectors are stable
/// across Rust releases.
fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let mut hash = OFFSET;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}
