// Relevance ranking: cosine scoring with content-type weights, top-K
// selection with per-document caps, and excerpt refinement.

pub mod excerpt;
pub mod scoring;
pub mod selection;
