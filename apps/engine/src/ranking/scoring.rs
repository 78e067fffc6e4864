//! Relevance scoring — cosine similarity shaped by content-type weights.

use serde::{Deserialize, Serialize};

use crate::extract::content_type::ContentType;
use crate::extract::sections::Section;

/// Static multipliers encoding the prior that summary-bearing sections
/// matter more than raw body text for a persona-oriented query.
/// Lookup is total: every content type has a weight, `other` is the 1.0
/// baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeWeights {
    #[serde(rename = "abstract")]
    pub abstract_: f32,
    pub introduction: f32,
    pub methodology: f32,
    pub results: f32,
    pub conclusion: f32,
    pub references: f32,
    pub other: f32,
}

impl Default for TypeWeights {
    fn default() -> Self {
        Self {
            abstract_: 1.2,
            introduction: 1.1,
            methodology: 1.3,
            results: 1.3,
            conclusion: 1.2,
            references: 0.5,
            other: 1.0,
        }
    }
}

impl TypeWeights {
    pub fn weight_for(&self, content_type: ContentType) -> f32 {
        match content_type {
            ContentType::Abstract => self.abstract_,
            ContentType::Introduction => self.introduction,
            ContentType::Methodology => self.methodology,
            ContentType::Results => self.results,
            ContentType::Conclusion => self.conclusion,
            ContentType::References => self.references,
            ContentType::Other => self.other,
        }
    }
}

/// A section plus its scores. Transient, recomputed each run.
#[derive(Debug, Clone)]
pub struct ScoredSection {
    pub section: Section,
    /// Raw cosine similarity against the persona query.
    pub similarity: f32,
    /// Content-type weight applied to the similarity.
    pub weight: f32,
    /// similarity × weight; the ranking key. Always finite.
    pub score: f32,
}

/// Cosine similarity in [-1, 1]. Zero for mismatched or zero-length
/// vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Scores sections against the query vector.
///
/// `vectors[i]` must correspond to `sections[i]`. Non-finite products
/// (a NaN vector from a failed backend, say) clamp to 0.0 so the ranking
/// key is always a finite real.
pub fn score_sections(
    query_vector: &[f32],
    sections: Vec<Section>,
    vectors: &[Vec<f32>],
    weights: &TypeWeights,
) -> Vec<ScoredSection> {
    debug_assert_eq!(sections.len(), vectors.len());
    sections
        .into_iter()
        .zip(vectors)
        .map(|(section, vector)| {
            let similarity = cosine_similarity(query_vector, vector);
            let weight = weights.weight_for(section.content_type);
            let raw = similarity * weight;
            let score = if raw.is_finite() { raw } else { 0.0 };
            ScoredSection {
                section,
                similarity,
                weight,
                score,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_section(content_type: ContentType) -> Section {
        Section {
            document: "doc.pdf".to_string(),
            doc_index: 0,
            page_number: 1,
            order: 0,
            title: "Title".to_string(),
            body: "body".to_string(),
            content_type,
        }
    }

    #[test]
    fn test_cosine_identical_vectors_is_one() {
        let v = vec![0.6, 0.8];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_mismatched_lengths_is_zero() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_weight_lookup_is_total() {
        let weights = TypeWeights::default();
        for ct in [
            ContentType::Abstract,
            ContentType::Introduction,
            ContentType::Methodology,
            ContentType::Results,
            ContentType::Conclusion,
            ContentType::References,
            ContentType::Other,
        ] {
            assert!(weights.weight_for(ct) >= 0.0);
        }
        assert_eq!(weights.weight_for(ContentType::Other), 1.0);
    }

    #[test]
    fn test_references_weighted_below_baseline() {
        let weights = TypeWeights::default();
        assert!(weights.weight_for(ContentType::References) < weights.weight_for(ContentType::Other));
        assert!(weights.weight_for(ContentType::Abstract) > weights.weight_for(ContentType::Other));
    }

    #[test]
    fn test_score_is_similarity_times_weight() {
        let query = vec![1.0, 0.0];
        let sections = vec![make_section(ContentType::Abstract)];
        let vectors = vec![vec![1.0, 0.0]];
        let scored = score_sections(&query, sections, &vectors, &TypeWeights::default());
        assert!((scored[0].similarity - 1.0).abs() < 1e-6);
        assert!((scored[0].score - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_nan_vector_scores_zero() {
        let query = vec![1.0, 0.0];
        let sections = vec![make_section(ContentType::Other)];
        let vectors = vec![vec![f32::NAN, 0.0]];
        let scored = score_sections(&query, sections, &vectors, &TypeWeights::default());
        assert_eq!(scored[0].score, 0.0);
        assert!(scored[0].score.is_finite());
    }
}
