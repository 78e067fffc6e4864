mod config;
mod embedding;
mod errors;
mod extract;
mod models;
mod pipeline;
mod query;
mod ranking;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::{Embedder, HashedEmbedder, HttpEmbedder};
use crate::extract::headings::LayoutHeadingDetector;
use crate::extract::source::PdfDirectorySource;
use crate::models::request::RunRequest;
use crate::pipeline::InsightEngine;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting insight engine v{}", env!("CARGO_PKG_VERSION"));

    let request = read_request(&config.input_path)?;
    info!(
        "Loaded request: {} documents, persona '{}'",
        request.documents.len(),
        request.persona.role
    );

    let embedder = build_embedder(&config);
    let engine = InsightEngine::new(
        Arc::new(PdfDirectorySource::new(&config.pdf_dir)),
        Arc::new(LayoutHeadingDetector::new()),
        embedder,
        config.pipeline.clone(),
    );

    let output = engine.run(&request).await?;

    let json = serde_json::to_string_pretty(&output)?;
    std::fs::write(&config.output_path, json)
        .with_context(|| format!("failed to write output to {}", config.output_path))?;
    info!(
        "Wrote {} ranked sections to {}",
        output.extracted_sections.len(),
        config.output_path
    );

    Ok(())
}

fn read_request(path: &str) -> Result<RunRequest, errors::EngineError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| {
        errors::EngineError::InvalidInput(format!("failed to parse request {path}: {e}"))
    })
}

/// Selects the embedding backend: remote HTTP when EMBEDDING_ENDPOINT is
/// set, the deterministic hashed embedder otherwise.
fn build_embedder(config: &Config) -> Arc<dyn Embedder> {
    match &config.embedding_endpoint {
        Some(endpoint) => {
            info!(
                "Using HTTP embedder at {endpoint} (model: {})",
                config.embedding_model
            );
            Arc::new(HttpEmbedder::new(
                endpoint.clone(),
                config.embedding_model.clone(),
                config.embedding_api_key.clone(),
            ))
        }
        None => {
            info!("Using deterministic hashed embedder");
            Arc::new(HashedEmbedder::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_request_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "documents": ["a.pdf"],
                "persona": {{"role": "Analyst"}},
                "job_to_be_done": {{"task": "Review filings"}}
            }}"#
        )
        .unwrap();

        let request = read_request(path.to_str().unwrap()).unwrap();
        assert_eq!(request.documents.len(), 1);
        assert_eq!(request.persona.role, "Analyst");
    }

    #[test]
    fn test_read_request_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = read_request(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, errors::EngineError::InvalidInput(_)));
    }
}
