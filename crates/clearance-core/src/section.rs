//! Per-section checklist summarization.
//!
//! A section's completion is derived from its subsections: `validated: true`
//! entries in `checklistValidation` count as completed, every other
//! validation entry counts as an open issue, and the checklist itself sets
//! the total. The two arrays are not guaranteed to be the same length, so
//! each count comes strictly from its own array.

use serde::{Deserialize, Serialize};

use crate::raw::{is_validated, RawSection, RawSubmission};
use crate::timefmt;

/// Checklist progress state of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionStatus {
    Pending,
    InProgress,
    Complete,
}

impl std::fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Aggregated checklist counts for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    /// Validation entries with `validated: true`, across all subsections.
    pub completed_count: u32,
    /// Checklist entries across all subsections.
    pub total_count: u32,
    /// Validation entries not affirmatively validated.
    pub issue_count: u32,
    pub status: SectionStatus,
}

/// Summarize one section's checklist state.
///
/// Status tie-break order: empty checklist is `pending`; a fully validated
/// non-empty checklist is `complete`; any progress at all is `in-progress`;
/// otherwise `pending`. With mismatched array lengths `completed_count` can
/// exceed `total_count`; that still reads as `in-progress`, never `complete`.
pub fn summarize_section(section: &RawSection) -> SectionSummary {
    let mut completed = 0u32;
    let mut total = 0u32;
    let mut issues = 0u32;

    for subsection in &section.subsections {
        total += subsection.checklist.len() as u32;
        for item in &subsection.checklist_validation {
            if is_validated(item) {
                completed += 1;
            } else {
                issues += 1;
            }
        }
    }

    let status = if total == 0 {
        SectionStatus::Pending
    } else if completed == total {
        SectionStatus::Complete
    } else if completed > 0 {
        SectionStatus::InProgress
    } else {
        SectionStatus::Pending
    };

    SectionSummary {
        completed_count: completed,
        total_count: total,
        issue_count: issues,
        status,
    }
}

/// Display row for the checklist screen's section table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRow {
    pub id: String,
    pub title: String,
    /// eSTAR form position, "F3.1", "F3.2", ...
    pub estar_id: String,
    /// 1-based eSTAR ordering for the alternate sort.
    pub estar_order: u32,
    pub status: SectionStatus,
    /// RTA-critical flag; sections without the flag are treated as critical.
    pub rta_required: bool,
    pub completed_count: u32,
    pub total_count: u32,
    pub issue_count: u32,
    /// Short date of the last section edit, falling back to the submission
    /// timestamp, then to an em dash placeholder.
    pub last_updated: String,
}

/// Build the display row for the section at `index`.
///
/// `submission_last_updated` is the parent record's timestamp, used when the
/// section has none of its own.
pub fn section_row(
    section: &RawSection,
    index: usize,
    submission_last_updated: Option<&str>,
) -> SectionRow {
    let summary = summarize_section(section);
    let position = index as u32 + 1;

    let last_updated = section
        .last_updated
        .as_deref()
        .and_then(timefmt::parse_datetime)
        .or_else(|| {
            submission_last_updated.and_then(|raw| {
                let parsed = timefmt::parse_datetime(raw);
                if parsed.is_none() {
                    tracing::debug!(raw, "unparseable submission last_updated");
                }
                parsed
            })
        })
        .map(timefmt::format_short_date)
        .unwrap_or_else(|| "—".to_string());

    SectionRow {
        id: section
            .id
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("section-{}", position)),
        title: section
            .title
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("Section {}", position)),
        estar_id: format!("F3.{}", position),
        estar_order: position,
        status: summary.status,
        rta_required: section.required.unwrap_or(true),
        completed_count: summary.completed_count,
        total_count: summary.total_count,
        issue_count: summary.issue_count,
        last_updated,
    }
}

/// Build display rows for every section of a submission, in payload order.
pub fn section_rows(submission: &RawSubmission) -> Vec<SectionRow> {
    submission
        .sections
        .iter()
        .enumerate()
        .map(|(index, section)| section_row(section, index, submission.last_updated.as_deref()))
        .collect()
}
