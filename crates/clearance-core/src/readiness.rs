//! Submission-level readiness aggregation.
//!
//! Rolls per-section summaries up into the header metrics of the checklist
//! screen and the eSTAR export gate. The backend sometimes ships its own
//! aggregates (`sectionStatus`, `rtaStatus`, `readinessScore`); when present
//! those are authoritative and the locally derived numbers are discarded,
//! field by field. The export gate itself is always recomputed from the
//! final values, never taken from the payload.

use serde::{Deserialize, Serialize};

use crate::raw::RawSubmission;
use crate::section::{summarize_section, SectionStatus, SectionSummary};

/// Aggregate readiness of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReadiness {
    /// Sections whose checklist is fully validated.
    pub completed_sections: u32,
    pub total_sections: u32,
    /// RTA-critical sections that are complete.
    pub rta_critical_complete: u32,
    pub rta_critical_total: u32,
    /// Open validation issues across all sections.
    pub total_issues: u32,
    /// 0–100 completeness metric.
    pub readiness_score: u32,
    /// True when every RTA-critical section is complete and no issues
    /// remain. Gates the eSTAR export action.
    pub estar_ready: bool,
}

/// Aggregate a submission's sections into its readiness metrics.
pub fn summarize_submission(submission: &RawSubmission) -> SubmissionReadiness {
    let summaries: Vec<SectionSummary> =
        submission.sections.iter().map(summarize_section).collect();

    let local_completed = summaries
        .iter()
        .filter(|s| s.status == SectionStatus::Complete)
        .count() as u32;
    let local_total = summaries.len() as u32;
    let local_issues: u32 = summaries.iter().map(|s| s.issue_count).sum();

    // Sections missing the `required` flag count as RTA-critical.
    let mut local_rta_total = 0u32;
    let mut local_rta_complete = 0u32;
    for (section, summary) in submission.sections.iter().zip(&summaries) {
        if section.required.unwrap_or(true) {
            local_rta_total += 1;
            if summary.status == SectionStatus::Complete {
                local_rta_complete += 1;
            }
        }
    }

    let section_status = submission.section_status.as_ref();
    let rta_status = submission.rta_status.as_ref();

    let completed_sections = section_status
        .and_then(|s| s.completed_count)
        .unwrap_or(local_completed);
    let total_sections = section_status
        .and_then(|s| s.total_sections)
        .unwrap_or(local_total);
    let total_issues = rta_status.and_then(|s| s.issues).unwrap_or(local_issues);
    let rta_critical_complete = rta_status
        .and_then(|s| s.completed_criticals)
        .unwrap_or(local_rta_complete);
    let rta_critical_total = rta_status
        .and_then(|s| s.total_criticals)
        .unwrap_or(local_rta_total);

    let readiness_score = submission
        .readiness_score
        .unwrap_or_else(|| ratio_percent(completed_sections, total_sections))
        .min(100);

    SubmissionReadiness {
        completed_sections,
        total_sections,
        rta_critical_complete,
        rta_critical_total,
        total_issues,
        readiness_score,
        estar_ready: rta_critical_complete == rta_critical_total && total_issues == 0,
    }
}

fn ratio_percent(numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        0
    } else {
        (f64::from(numerator) / f64::from(denominator) * 100.0).round() as u32
    }
}
