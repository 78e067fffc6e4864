// Section extraction: page sources, heading detection, section assembly,
// content-type classification. PDF parsing is CPU-bound and must run
// inside tokio::task::spawn_blocking.

pub mod content_type;
pub mod headings;
pub mod sections;
pub mod source;
