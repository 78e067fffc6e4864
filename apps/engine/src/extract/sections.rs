//! Section assembly — turns detected page segments into ranked-ready
//! sections, filtering noise and inferring titles where headings were
//! absent.

use crate::extract::content_type::{classify_content_type, ContentType};
use crate::extract::headings::HeadingDetector;
use crate::extract::source::Page;

/// A contiguous span of document text with an inferred title and
/// content-type label. Immutable once extracted.
#[derive(Debug, Clone)]
pub struct Section {
    pub document: String,
    /// Position of the document in the input list, for tie-breaking.
    pub doc_index: usize,
    pub page_number: u32,
    /// Position of the section within its document, for tie-breaking.
    pub order: usize,
    pub title: String,
    pub body: String,
    pub content_type: ContentType,
}

impl Section {
    /// Text submitted to the embedding model. The title is prepended so
    /// heading semantics bias the vector.
    pub fn embedding_text(&self) -> String {
        if self.title.is_empty() {
            self.body.clone()
        } else {
            format!("{}\n{}", self.title, self.body)
        }
    }
}

/// Minimum words for a segment to survive the noise filter.
const MIN_SECTION_WORDS: usize = 10;
/// Segments above this digit density are tables/figures, not prose.
const MAX_DIGIT_DENSITY: f64 = 0.3;

/// Extracts ordered sections from one document's pages.
///
/// Pages with no text yield nothing; noise segments (too short, mostly
/// numeric) are dropped. Section order follows page order.
pub fn extract_sections(
    document: &str,
    doc_index: usize,
    pages: &[Page],
    detector: &dyn HeadingDetector,
) -> Vec<Section> {
    let mut sections = Vec::new();
    for page in pages {
        if page.is_empty() {
            continue;
        }
        for segment in detector.detect(page) {
            if !is_meaningful(&segment.body) {
                continue;
            }
            let title = match segment.title {
                Some(t) => t,
                None => infer_title(&segment.body),
            };
            let content_type = classify_content_type(&title, &segment.body);
            sections.push(Section {
                document: document.to_string(),
                doc_index,
                page_number: page.number,
                order: sections.len(),
                title,
                body: segment.body,
                content_type,
            });
        }
    }
    sections
}

/// Noise filter: drops segments too short or too numeric to rank.
fn is_meaningful(body: &str) -> bool {
    if body.split_whitespace().count() < MIN_SECTION_WORDS {
        return false;
    }
    let len = body.chars().count();
    if len == 0 {
        return false;
    }
    let digits = body.chars().filter(|c| c.is_ascii_digit()).count();
    (digits as f64 / len as f64) <= MAX_DIGIT_DENSITY
}

/// Infers a title for a headingless span: the first mid-length sentence,
/// else the first ten words.
fn infer_title(body: &str) -> String {
    for sentence in body.split(['.', '!', '?']).take(3) {
        let sentence = sentence.trim();
        if (20..=100).contains(&sentence.len()) {
            return sentence.to_string();
        }
    }
    let words: Vec<&str> = body.split_whitespace().take(10).collect();
    let mut title = words.join(" ");
    if body.split_whitespace().count() > 10 {
        title.push_str("...");
    }
    title
}
