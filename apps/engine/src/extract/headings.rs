//! Heading detection — pluggable strategy for splitting a page into
//! titled segments.
//!
//! Layout-based detection (font-size/boldness thresholds) is inherently
//! approximate, so it lives behind the `HeadingDetector` trait and can be
//! replaced without touching ranking.

use std::collections::HashMap;

use regex::Regex;

use crate::extract::source::{Page, PageLine};

/// A contiguous span of page text under one (possibly absent) heading.
#[derive(Debug, Clone)]
pub struct PageSegment {
    pub title: Option<String>,
    pub body: String,
}

/// Splits a page into segments. Implementations must preserve the order
/// in which text appears on the page.
pub trait HeadingDetector: Send + Sync {
    fn detect(&self, page: &Page) -> Vec<PageSegment>;
}

/// Font-size delta (pt) over the page's modal body size that promotes a
/// line to a heading when layout hints are available.
const FONT_SIZE_DELTA: f32 = 1.5;
/// Bold lines this short (in words) read as headings.
const BOLD_HEADING_MAX_WORDS: usize = 8;
const HEADING_MIN_CHARS: usize = 3;
const HEADING_MAX_CHARS: usize = 150;
const ALL_CAPS_MAX_CHARS: usize = 50;
const HEADING_MAX_DOTS: usize = 3;

/// Default detector: layout hints when present, structural text patterns
/// always.
pub struct LayoutHeadingDetector {
    title_line: Regex,
    numbered: Regex,
    roman: Regex,
    all_caps: Regex,
    title_case_pair: Regex,
}

impl Default for LayoutHeadingDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutHeadingDetector {
    pub fn new() -> Self {
        // Patterns are fixed; compilation cannot fail.
        Self {
            title_line: Regex::new(r"^[A-Z][A-Za-z\s&-]+$").unwrap(),
            numbered: Regex::new(r"^\d+\.\s*[A-Z]").unwrap(),
            roman: Regex::new(r"^[IVX]+\.\s*[A-Z]").unwrap(),
            all_caps: Regex::new(r"^[A-Z\s]+$").unwrap(),
            title_case_pair: Regex::new(r"^[A-Z][a-z]+\s+[A-Z][a-z]+").unwrap(),
        }
    }

    /// Modal font size across the page's hinted lines, if any carry hints.
    fn modal_font_size(page: &Page) -> Option<f32> {
        let mut counts: HashMap<i32, usize> = HashMap::new();
        for line in &page.lines {
            if let Some(size) = line.font_size {
                // Bucket to tenths of a point so float noise collapses.
                *counts.entry((size * 10.0).round() as i32).or_insert(0) += 1;
            }
        }
        counts
            .into_iter()
            .max_by_key(|&(bucket, count)| (count, bucket))
            .map(|(bucket, _)| bucket as f32 / 10.0)
    }

    fn is_heading(&self, line: &PageLine, modal_size: Option<f32>) -> bool {
        let text = line.text.trim();
        let chars = text.chars().count();
        if chars < HEADING_MIN_CHARS || chars > HEADING_MAX_CHARS {
            return false;
        }

        // Layout rules first: an oversized or short bold line is a heading
        // regardless of its wording.
        if let (Some(size), Some(modal)) = (line.font_size, modal_size) {
            if size > modal + FONT_SIZE_DELTA {
                return true;
            }
        }
        if line.bold && text.split_whitespace().count() <= BOLD_HEADING_MAX_WORDS {
            return true;
        }

        self.matches_structural_pattern(text)
    }

    fn matches_structural_pattern(&self, text: &str) -> bool {
        let matched = self.title_line.is_match(text)
            || self.numbered.is_match(text)
            || self.roman.is_match(text)
            || self.all_caps.is_match(text)
            || self.title_case_pair.is_match(text);
        if !matched {
            return false;
        }
        // Long shouting lines are usually tables or banners, not headings.
        if text == text.to_uppercase() && text.chars().count() > ALL_CAPS_MAX_CHARS {
            return false;
        }
        // Dotted lines are usually leaders in a table of contents.
        if text.matches('.').count() > HEADING_MAX_DOTS {
            return false;
        }
        true
    }
}

impl HeadingDetector for LayoutHeadingDetector {
    fn detect(&self, page: &Page) -> Vec<PageSegment> {
        let modal_size = Self::modal_font_size(page);

        let mut segments = Vec::new();
        let mut title: Option<String> = None;
        let mut body = String::new();

        for line in &page.lines {
            let text = line.text.trim();
            if text.is_empty() {
                continue;
            }
            if self.is_heading(line, modal_size) {
                if !body.trim().is_empty() {
                    // An untitled leading span borrows the heading that
                    // terminates it, truncated to a sane title length.
                    let fallback: String = text.chars().take(100).collect();
                    segments.push(PageSegment {
                        title: Some(title.take().unwrap_or(fallback)),
                        body: std::mem::take(&mut body).trim().to_string(),
                    });
                }
                title = Some(text.to_string());
                body.clear();
            } else {
                body.push_str(text);
                body.push(' ');
            }
        }

        if !body.trim().is_empty() {
            segments.push(PageSegment {
                title,
                body: body.trim().to_string(),
            });
        } else if let Some(title) = title {
            // Heading with no following body (e.g. last line of the page).
            segments.push(PageSegment {
                title: Some(title),
                body: String::new(),
            });
        }

        segments
    }
}
