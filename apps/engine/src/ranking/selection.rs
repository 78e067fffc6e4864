//! Top-K selection — deterministic ordering plus a per-document cap so
//! one document cannot monopolize the output.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::ranking::scoring::ScoredSection;

/// A selected section with its final 1-based rank.
#[derive(Debug, Clone)]
pub struct RankedSection {
    pub scored: ScoredSection,
    pub rank: u32,
}

/// Sorts scored sections and selects the top `top_k`, taking at most
/// `per_document_cap` from any single document.
///
/// Sort key: score descending, then content-type weight descending, then
/// original (document, page, position) order — a total order, so equal
/// scores still rank deterministically. Once a document hits its cap its
/// remaining sections are skipped in favor of the next-highest section
/// from another document. Fewer qualifying sections than `top_k` simply
/// yields fewer results.
pub fn select_top(
    mut scored: Vec<ScoredSection>,
    top_k: usize,
    per_document_cap: usize,
) -> Vec<RankedSection> {
    scored.sort_by(compare);

    let mut per_document: HashMap<usize, usize> = HashMap::new();
    let mut selected = Vec::with_capacity(top_k.min(scored.len()));

    for candidate in scored {
        if selected.len() == top_k {
            break;
        }
        let taken = per_document.entry(candidate.section.doc_index).or_insert(0);
        if *taken >= per_document_cap {
            continue;
        }
        *taken += 1;
        selected.push(RankedSection {
            rank: selected.len() as u32 + 1,
            scored: candidate,
        });
    }

    selected
}

fn compare(a: &ScoredSection, b: &ScoredSection) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal))
        .then_with(|| a.section.doc_index.cmp(&b.section.doc_index))
        .then_with(|| a.section.page_number.cmp(&b.section.page_number))
        .then_with(|| a.section.order.cmp(&b.section.order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::content_type::ContentType;
    use crate::extract::sections::Section;
    use crate::ranking::scoring::TypeWeights;

    fn make_scored(
        doc_index: usize,
        page: u32,
        order: usize,
        content_type: ContentType,
        score: f32,
    ) -> ScoredSection {
        let weights = TypeWeights::default();
        ScoredSection {
            section: Section {
                document: format!("doc{doc_index}.pdf"),
                doc_index,
                page_number: page,
                order,
                title: "Title".to_string(),
                body: "body".to_string(),
                content_type,
            },
            similarity: score,
            weight: weights.weight_for(content_type),
            score,
        }
    }

    #[test]
    fn test_sorted_by_score_descending() {
        let scored = vec![
            make_scored(0, 1, 0, ContentType::Other, 0.2),
            make_scored(0, 1, 1, ContentType::Other, 0.9),
            make_scored(1, 1, 0, ContentType::Other, 0.5),
        ];
        let ranked = select_top(scored, 10, 10);
        assert_eq!(ranked.len(), 3);
        assert!(ranked[0].scored.score >= ranked[1].scored.score);
        assert!(ranked[1].scored.score >= ranked[2].scored.score);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn test_equal_scores_break_on_weight_first() {
        let scored = vec![
            make_scored(0, 1, 0, ContentType::Other, 0.5),
            make_scored(0, 1, 1, ContentType::Abstract, 0.5),
        ];
        let ranked = select_top(scored, 10, 10);
        assert_eq!(ranked[0].scored.section.content_type, ContentType::Abstract);
    }

    #[test]
    fn test_equal_scores_and_weights_break_on_document_order() {
        let scored = vec![
            make_scored(1, 1, 0, ContentType::Other, 0.5),
            make_scored(0, 2, 3, ContentType::Other, 0.5),
        ];
        let ranked = select_top(scored, 10, 10);
        assert_eq!(ranked[0].scored.section.doc_index, 0);
        assert_eq!(ranked[1].scored.section.doc_index, 1);
    }

    #[test]
    fn test_equal_everything_breaks_on_page_then_position() {
        let scored = vec![
            make_scored(0, 3, 5, ContentType::Other, 0.5),
            make_scored(0, 3, 2, ContentType::Other, 0.5),
            make_scored(0, 1, 9, ContentType::Other, 0.5),
        ];
        let ranked = select_top(scored, 10, 10);
        assert_eq!(ranked[0].scored.section.page_number, 1);
        assert_eq!(ranked[1].scored.section.order, 2);
        assert_eq!(ranked[2].scored.section.order, 5);
    }

    #[test]
    fn test_per_document_cap_skips_to_other_documents() {
        let scored = vec![
            make_scored(0, 1, 0, ContentType::Other, 0.9),
            make_scored(0, 1, 1, ContentType::Other, 0.8),
            make_scored(0, 2, 2, ContentType::Other, 0.7),
            make_scored(1, 1, 0, ContentType::Other, 0.1),
        ];
        let ranked = select_top(scored, 3, 2);
        assert_eq!(ranked.len(), 3);
        let from_doc0 = ranked
            .iter()
            .filter(|r| r.scored.section.doc_index == 0)
            .count();
        assert_eq!(from_doc0, 2, "doc 0 capped at 2");
        assert_eq!(ranked[2].scored.section.doc_index, 1);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn test_requesting_more_than_available_returns_all() {
        let scored = vec![
            make_scored(0, 1, 0, ContentType::Other, 0.9),
            make_scored(1, 1, 0, ContentType::Other, 0.8),
        ];
        let ranked = select_top(scored, 5, 3);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(select_top(vec![], 5, 3).is_empty());
    }

    #[test]
    fn test_ranks_are_contiguous_after_cap_skips() {
        let scored = vec![
            make_scored(0, 1, 0, ContentType::Other, 0.9),
            make_scored(0, 1, 1, ContentType::Other, 0.8),
            make_scored(1, 1, 0, ContentType::Other, 0.7),
        ];
        let ranked = select_top(scored, 10, 1);
        let ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
    }
}
