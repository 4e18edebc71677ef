//! Shared normalization core for the Clearance 510(k) submission workflow.
//!
//! The backend's submission records are loosely typed; every screen needs
//! the same reshaping into strongly typed view models. This crate is that
//! single normalizer: per-section checklist summaries, submission-level
//! readiness (the eSTAR export gate), and submissions-table rows, plus the
//! key-value seam the editor uses for audit trails and version history.
//!
//! The normalizer operations are pure and total: malformed fields degrade
//! to documented fallback values and are logged, never raised.

pub mod audit;
pub mod error;
pub mod list_row;
pub mod raw;
pub mod readiness;
pub mod section;
pub mod store;
pub mod timefmt;
pub mod versions;

pub use error::ClearanceError;
pub use list_row::{to_list_row, to_list_row_at, to_list_rows_at, SubmissionListRow, STATUS_CYCLE};
pub use raw::{RawSection, RawSubmission, RawSubsection};
pub use readiness::{summarize_submission, SubmissionReadiness};
pub use section::{
    section_row, section_rows, summarize_section, SectionRow, SectionStatus, SectionSummary,
};
pub use store::{KvStore, MemoryStore};
