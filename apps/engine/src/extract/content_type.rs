//! Content-type classification — maps section text to a structural role.

use serde::{Deserialize, Serialize};

/// Structural role of a section, inferred from heading/body keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Abstract,
    Introduction,
    Methodology,
    Results,
    Conclusion,
    References,
    #[default]
    Other,
}

/// Keyword table, checked in order: first hit wins. Matching is over the
/// lowercased leading text (title plus the head of the body), so a late
/// mention of "references" in prose does not reclassify a section.
const KEYWORD_TABLE: &[(&[&str], ContentType)] = &[
    (&["abstract", "summary"], ContentType::Abstract),
    (&["introduction", "background"], ContentType::Introduction),
    (&["method", "approach"], ContentType::Methodology),
    (&["result", "finding"], ContentType::Results),
    (&["conclusion", "discussion"], ContentType::Conclusion),
    (&["reference", "bibliograph"], ContentType::References),
];

/// How much of the section text participates in classification.
const CLASSIFY_WINDOW_CHARS: usize = 200;

/// Classifies a section from its title and the head of its body.
pub fn classify_content_type(title: &str, body: &str) -> ContentType {
    let mut window = String::with_capacity(CLASSIFY_WINDOW_CHARS + title.len() + 1);
    window.push_str(title);
    window.push(' ');
    window.extend(body.chars().take(CLASSIFY_WINDOW_CHARS));
    let window = window.to_lowercase();

    for (keywords, content_type) in KEYWORD_TABLE {
        if keywords.iter().any(|kw| window.contains(kw)) {
            return *content_type;
        }
    }
    ContentType::Other
}
