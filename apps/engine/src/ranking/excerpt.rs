//! Excerpt refinement — boundary-respecting truncation for final output.

/// Sentence boundaries landing in the final stretch of the budget beat a
/// plain whitespace cut; below this fraction the sentence cut loses too
/// much text to be worth it.
const SENTENCE_CUT_MIN_FRACTION: f64 = 0.6;

/// Collapses whitespace and truncates to `max_chars`, cutting at a
/// sentence boundary when one lands late enough, otherwise at a
/// whitespace boundary. Never splits a word. Appends an ellipsis when
/// text was dropped.
pub fn refine_excerpt(body: &str, max_chars: usize) -> String {
    let collapsed = collapse_whitespace(body);
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    if max_chars == 0 {
        return String::new();
    }

    let window: String = collapsed.chars().take(max_chars).collect();

    // Prefer the last sentence end inside the window; no ellipsis needed
    // after a full stop. Punctuation only counts as a sentence end when
    // whitespace (or end of text) follows, so dotted tokens like URLs and
    // DOIs are not cut through. The fraction check counts chars, matching
    // the char-denominated budget. `window` is a byte-identical prefix of
    // `collapsed`, so its indices are valid in both.
    let sentence_cut = window
        .rmatch_indices(['.', '!', '?'])
        .map(|(i, _)| i + 1)
        .find(|&end| match collapsed[end..].chars().next() {
            Some(c) => c.is_whitespace(),
            None => true,
        })
        .filter(|&end| {
            window[..end].chars().count() as f64 >= max_chars as f64 * SENTENCE_CUT_MIN_FRACTION
        });

    if let Some(end) = sentence_cut {
        return window[..end].trim_end().to_string();
    }

    // Otherwise cut at the last whitespace so no word is split, leaving
    // room for the ellipsis inside the budget.
    let window: String = collapsed.chars().take(max_chars.saturating_sub(3)).collect();
    if let Some(cut) = window.rfind(char::is_whitespace) {
        let mut excerpt = window[..cut].trim_end().to_string();
        excerpt.push_str("...");
        return excerpt;
    }
    // A single token longer than the budget (a bare URL or DOI, say);
    // dropping it whole beats splitting it.
    if max_chars >= 3 {
        "...".to_string()
    } else {
        String::new()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
