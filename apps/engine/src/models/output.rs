//! Output models — the single structured result object emitted per run.
//!
//! Field presence is exhaustive and stable across runs with identical
//! input; `processing_timestamp` is the only non-deterministic field.

use serde::{Deserialize, Serialize};

/// Run metadata echoed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Documents that produced at least an attempt at extraction.
    pub input_documents: Vec<String>,
    /// Documents with no extractable text (missing, corrupt, or image-only).
    pub unreadable_documents: Vec<String>,
    /// Persona rendered as its role.
    pub persona: String,
    /// Job-to-be-done rendered as its task.
    pub job_to_be_done: String,
    /// ISO-8601 timestamp captured at run start.
    pub processing_timestamp: String,
}

/// One ranked section in the final output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    /// 1-based rank in final sorted order.
    pub importance_rank: u32,
    pub page_number: u32,
    /// Weighted relevance score, surfaced for diagnostics.
    pub relevance_score: f32,
}

/// Refined excerpt for one ranked section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// The full result object: metadata plus ranked sections and excerpts,
/// in rank order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    pub metadata: RunMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_serializes_all_fields() {
        let output = RunOutput {
            metadata: RunMetadata {
                input_documents: vec!["a.pdf".to_string()],
                unreadable_documents: vec![],
                persona: "Researcher".to_string(),
                job_to_be_done: "Survey the field".to_string(),
                processing_timestamp: "2025-01-01T00:00:00+00:00".to_string(),
            },
            extracted_sections: vec![ExtractedSection {
                document: "a.pdf".to_string(),
                section_title: "Abstract".to_string(),
                importance_rank: 1,
                page_number: 1,
                relevance_score: 0.9,
            }],
            subsection_analysis: vec![SubsectionAnalysis {
                document: "a.pdf".to_string(),
                refined_text: "Short excerpt.".to_string(),
                page_number: 1,
            }],
        };

        let json = serde_json::to_value(&output).unwrap();
        assert!(json["metadata"]["unreadable_documents"].is_array());
        assert_eq!(json["extracted_sections"][0]["importance_rank"], 1);
        assert_eq!(json["subsection_analysis"][0]["page_number"], 1);
    }
}
