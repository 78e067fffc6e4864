//! Persona query builder — one deterministic string per persona + job.

use crate::errors::EngineError;
use crate::models::request::{JobToBeDone, Persona};

/// Field delimiter. Stable so identical inputs always produce
/// byte-identical queries (required for reproducibility and caching).
const DELIMITER: &str = " | ";

/// Builds the semantic query string for a run.
///
/// Field order is fixed: task, expertise, focus, requirements, role.
/// Empty fields are skipped entirely rather than rendered as empty
/// placeholders. Returns `EmptyQuery` when every field is empty.
pub fn build_persona_query(
    persona: &Persona,
    job: &JobToBeDone,
) -> Result<String, EngineError> {
    let mut parts: Vec<String> = Vec::new();

    if !job.task.trim().is_empty() {
        parts.push(job.task.trim().to_string());
    }
    if let Some(joined) = join_nonempty(&persona.expertise_areas) {
        parts.push(format!("Expertise in: {joined}"));
    }
    if let Some(joined) = join_nonempty(&persona.focus_areas) {
        parts.push(format!("Focus on: {joined}"));
    }
    if let Some(joined) = join_nonempty(&job.requirements) {
        parts.push(format!("Requirements: {joined}"));
    }
    if !persona.role.trim().is_empty() {
        parts.push(format!("Role: {}", persona.role.trim()));
    }

    if parts.is_empty() {
        return Err(EngineError::EmptyQuery);
    }
    Ok(parts.join(DELIMITER))
}

fn join_nonempty(items: &[String]) -> Option<String> {
    let kept: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join(", "))
    }
}
