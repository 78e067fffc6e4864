//! Pipeline orchestration — extraction, embedding, scoring, selection,
//! and output assembly for one run.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::embedding::Embedder;
use crate::errors::EngineError;
use crate::extract::headings::HeadingDetector;
use crate::extract::sections::{extract_sections, Section};
use crate::extract::source::DocumentSource;
use crate::models::output::{ExtractedSection, RunMetadata, RunOutput, SubsectionAnalysis};
use crate::models::request::RunRequest;
use crate::query::build_persona_query;
use crate::ranking::excerpt::refine_excerpt;
use crate::ranking::scoring::score_sections;
use crate::ranking::selection::select_top;

/// The insight engine: holds the pluggable collaborators and runs the
/// whole pipeline to completion. One invocation, one output object.
pub struct InsightEngine {
    source: Arc<dyn DocumentSource>,
    detector: Arc<dyn HeadingDetector>,
    embedder: Arc<dyn Embedder>,
    config: PipelineConfig,
}

impl InsightEngine {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        detector: Arc<dyn HeadingDetector>,
        embedder: Arc<dyn Embedder>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source,
            detector,
            embedder,
            config,
        }
    }

    pub async fn run(&self, request: &RunRequest) -> Result<RunOutput, EngineError> {
        let started_at = Utc::now();

        let query = build_persona_query(&request.persona, &request.job_to_be_done)?;
        info!("Persona query: {query}");

        let (sections, input_documents, unreadable_documents) =
            self.extract_all(request).await?;
        info!(
            "Extracted {} sections from {} documents ({} unreadable)",
            sections.len(),
            input_documents.len(),
            unreadable_documents.len()
        );

        // A failed query embedding is fatal: every score depends on it.
        let query_vector = self
            .embedder
            .embed(&query)
            .await
            .map_err(|e| EngineError::QueryEmbedding(e.to_string()))?;

        let vectors = self.embed_sections(&sections).await;
        let scored = score_sections(&query_vector, sections, &vectors, &self.config.weights);
        let ranked = select_top(scored, self.config.top_k, self.config.per_document_cap);
        info!("Selected {} of top-{} requested sections", ranked.len(), self.config.top_k);

        let mut extracted_sections = Vec::with_capacity(ranked.len());
        let mut subsection_analysis = Vec::with_capacity(ranked.len());
        for item in &ranked {
            let section = &item.scored.section;
            extracted_sections.push(ExtractedSection {
                document: section.document.clone(),
                section_title: section.title.clone(),
                importance_rank: item.rank,
                page_number: section.page_number,
                relevance_score: item.scored.score,
            });
            subsection_analysis.push(SubsectionAnalysis {
                document: section.document.clone(),
                refined_text: refine_excerpt(&section.body, self.config.excerpt_max_chars),
                page_number: section.page_number,
            });
        }

        Ok(RunOutput {
            metadata: RunMetadata {
                input_documents,
                unreadable_documents,
                persona: request.persona.role.clone(),
                job_to_be_done: request.job_to_be_done.task.clone(),
                processing_timestamp: started_at.to_rfc3339(),
            },
            extracted_sections,
            subsection_analysis,
        })
    }

    /// Extracts every document concurrently on blocking tasks, joined in
    /// input order so section ordering (and therefore tie-breaking) never
    /// depends on completion order.
    async fn extract_all(
        &self,
        request: &RunRequest,
    ) -> Result<(Vec<Section>, Vec<String>, Vec<String>), EngineError> {
        let mut handles = Vec::with_capacity(request.documents.len());
        for (doc_index, doc) in request.documents.iter().enumerate() {
            let filename = doc.filename().to_string();
            let source = Arc::clone(&self.source);
            let detector = Arc::clone(&self.detector);
            handles.push(tokio::task::spawn_blocking(move || {
                let pages = match source.load(&filename) {
                    Ok(pages) => pages,
                    Err(e) => {
                        warn!("Skipping unreadable document {filename}: {e:#}");
                        return (filename, None);
                    }
                };
                let sections = extract_sections(&filename, doc_index, &pages, detector.as_ref());
                (filename, Some(sections))
            }));
        }

        let mut all_sections = Vec::new();
        let mut input_documents = Vec::new();
        let mut unreadable_documents = Vec::new();
        for handle in handles {
            let (filename, result) = handle
                .await
                .map_err(|e| EngineError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?;
            match result {
                Some(sections) => {
                    input_documents.push(filename);
                    all_sections.extend(sections);
                }
                None => unreadable_documents.push(filename),
            }
        }

        Ok((all_sections, input_documents, unreadable_documents))
    }

    /// Embeds all sections in fixed-size batches. A failed batch is
    /// recovered by assigning zero vectors — those sections score 0.0
    /// instead of aborting the run.
    async fn embed_sections(&self, sections: &[Section]) -> Vec<Vec<f32>> {
        let texts: Vec<String> = sections.iter().map(|s| s.embedding_text()).collect();
        let mut vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.config.embed_batch_size.max(1)) {
            match self.embedder.embed_batch(chunk).await {
                Ok(batch) => vectors.extend(batch),
                Err(e) => {
                    warn!(
                        "Embedding batch of {} sections failed ({e}); assigning zero scores",
                        chunk.len()
                    );
                    vectors.extend(std::iter::repeat(Vec::new()).take(chunk.len()));
                }
            }
        }
        vectors
    }
}
