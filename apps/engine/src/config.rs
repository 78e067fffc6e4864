use anyhow::{Context, Result};

use crate::ranking::scoring::TypeWeights;

/// Application configuration loaded from environment variables.
/// Every variable has a code default, so a bare invocation works.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: String,
    pub output_path: String,
    pub pdf_dir: String,
    /// Optional OpenAI-compatible embeddings endpoint. When unset the
    /// deterministic hashed embedder is used instead.
    pub embedding_endpoint: Option<String>,
    pub embedding_api_key: Option<String>,
    pub embedding_model: String,
    pub pipeline: PipelineConfig,
    pub rust_log: String,
}

/// Tunables for one ranking run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of sections returned in the final output.
    pub top_k: usize,
    /// Maximum sections a single document may contribute to the top-K.
    pub per_document_cap: usize,
    /// Character budget for refined excerpts.
    pub excerpt_max_chars: usize,
    /// Sections per embedding batch.
    pub embed_batch_size: usize,
    pub weights: TypeWeights,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            per_document_cap: 3,
            excerpt_max_chars: 500,
            embed_batch_size: 32,
            weights: TypeWeights::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = PipelineConfig::default();
        Ok(Config {
            input_path: optional_env("INPUT_JSON", "input.json"),
            output_path: optional_env("OUTPUT_JSON", "output.json"),
            pdf_dir: optional_env("PDF_DIR", "pdfs"),
            embedding_endpoint: std::env::var("EMBEDDING_ENDPOINT").ok(),
            embedding_api_key: std::env::var("EMBEDDING_API_KEY").ok(),
            embedding_model: optional_env("EMBEDDING_MODEL", "text-embedding-3-small"),
            pipeline: PipelineConfig {
                top_k: parse_env("TOP_K", defaults.top_k)?,
                per_document_cap: parse_env("PER_DOCUMENT_CAP", defaults.per_document_cap)?,
                excerpt_max_chars: parse_env("EXCERPT_MAX_CHARS", defaults.excerpt_max_chars)?,
                embed_batch_size: parse_env("EMBED_BATCH_SIZE", defaults.embed_batch_size)?,
                weights: TypeWeights::default(),
            },
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("Environment variable '{key}' must be a positive integer")),
        Err(_) => Ok(default),
    }
}
