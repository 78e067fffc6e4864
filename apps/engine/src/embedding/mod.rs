//! Embedding providers — the single seam between the pipeline and the
//! model that turns text into vectors.
//!
//! ARCHITECTURAL RULE: no other module may talk to an embedding backend
//! directly. Scoring and ranking only ever see `Arc<dyn Embedder>`.

use async_trait::async_trait;
use thiserror::Error;

pub mod hashed;
pub mod http;

// Re-export the backends consumed by main and the pipeline tests.
pub use hashed::HashedEmbedder;
pub use http::HttpEmbedder;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Backend returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },
}

/// Maps text to fixed-length vectors.
///
/// Contract: deterministic for identical text and backend, and
/// order-preserving — the i-th output vector corresponds to the i-th
/// input text.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let texts = [text.to_string()];
        let mut vectors = self.embed_batch(&texts).await?;
        vectors.pop().ok_or(EmbedError::CountMismatch {
            expected: 1,
            got: 0,
        })
    }
}
