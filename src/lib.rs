//! Paginated PDF report generation for RV buyer planning tools.
//!
//! The crate turns the structured output of the lifestyle planner into a
//! downloadable multi-page report: a gradient cover, narrative summary and
//! budget sections, priority-sorted checklist cards, and a dealer question
//! list, with a footer stamped on every content page.

pub mod builder;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod model;
pub mod text;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use builder::{RenderedReport, ReportPdfBuilder, SectionPage, Theme};
pub use error::ReportError;
pub use model::{ChecklistItem, Priority, ReportInput};
