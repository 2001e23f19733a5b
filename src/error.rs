//! Error types surfaced by the report builder.

use thiserror::Error;

/// Errors produced while validating a report payload or rendering it to PDF.
///
/// Every error is terminal for the build call that produced it: no partial
/// document bytes are handed back and nothing is retried.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A required narrative field was missing or blank.
    #[error("malformed report input: {0}")]
    MalformedInput(String),

    /// The report payload received from the analysis service could not be
    /// deserialized.
    #[error("failed to parse report payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// The PDF renderer rejected the document, including the defensive case
    /// where an element's measured extent disagrees with actual placement.
    #[error("failed to render report: {0}")]
    Render(#[from] genpdf::error::Error),

    /// Outline injection into the rendered bytes failed.
    #[cfg(feature = "bookmarks")]
    #[error("failed to embed section bookmarks: {0}")]
    Bookmarks(#[from] crate::bookmarks::BookmarkError),
}
