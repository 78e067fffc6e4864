//! Input request models — the persona, job-to-be-done, and document list.

use serde::{Deserialize, Serialize};

/// A single input document reference. Input JSON may list documents either
/// as plain filename strings or as `{filename, title}` objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentRef {
    Named { filename: String, title: Option<String> },
    Bare(String),
}

impl DocumentRef {
    pub fn filename(&self) -> &str {
        match self {
            DocumentRef::Named { filename, .. } => filename,
            DocumentRef::Bare(filename) => filename,
        }
    }
}

/// Structured description of the intended reader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub expertise_areas: Vec<String>,
    #[serde(default)]
    pub focus_areas: Vec<String>,
}

/// Structured description of the task the persona is trying to accomplish.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobToBeDone {
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// One full ranking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    pub documents: Vec<DocumentRef>,
    #[serde(default)]
    pub persona: Persona,
    #[serde(default)]
    pub job_to_be_done: JobToBeDone,
}
