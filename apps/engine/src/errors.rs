use thiserror::Error;

/// Engine-level error type.
///
/// Only run-fatal conditions live here. Per-document and per-section
/// failures (unreadable PDFs, a failed embedding batch) are recovered
/// locally inside the pipeline and recorded in the run metadata instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Persona and job-to-be-done are both empty, nothing to rank against")]
    EmptyQuery,

    #[error("Failed to embed persona query: {0}")]
    QueryEmbedding(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
