//! Submissions table row mapping.
//!
//! Turns one raw list record into the display strings the submissions table
//! and dashboard cards render. Every field has a documented fallback; no
//! malformed payload value escapes as an error. Fallbacks are logged so bad
//! backend data stays diagnosable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::raw::RawSubmission;
use crate::timefmt;

/// Display fallback cycle for records without a status. Not business state;
/// kept for parity with how incomplete seed data has always rendered.
pub const STATUS_CYCLE: [&str; 5] = ["draft", "in-review", "submitted", "approved", "rejected"];

/// One row of the submissions table. All fields are ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionListRow {
    pub id: Option<String>,
    pub device_name: String,
    /// Human label, e.g. "Traditional 510(k)".
    pub submission_type: String,
    pub status: String,
    /// Percentage string, e.g. "25%".
    pub progress: String,
    /// Long date or "Unknown".
    pub deadline: String,
    pub assignee: String,
    /// Relative time or "Unknown".
    pub last_updated: String,
}

/// Map a raw record to a table row, with `now` injected for the relative
/// timestamp. `index` is the record's position in the list response and
/// feeds the status display fallback.
pub fn to_list_row_at(raw: &RawSubmission, index: usize, now: DateTime<Utc>) -> SubmissionListRow {
    SubmissionListRow {
        id: raw.id.clone(),
        device_name: non_empty(&raw.submission_title)
            .or_else(|| non_empty(&raw.device_category))
            .unwrap_or("Untitled Submission")
            .to_string(),
        submission_type: type_label(non_empty(&raw.submission_type)),
        status: non_empty(&raw.status)
            .unwrap_or(STATUS_CYCLE[index % STATUS_CYCLE.len()])
            .to_string(),
        progress: progress_percent(raw.progress.as_ref()),
        deadline: format_deadline(non_empty(&raw.internal_deadline)),
        assignee: non_empty(&raw.reviewer_id).unwrap_or("Unassigned").to_string(),
        last_updated: format_last_updated(non_empty(&raw.last_updated), now),
    }
}

/// Convenience wrapper over [`to_list_row_at`] using the current time.
pub fn to_list_row(raw: &RawSubmission, index: usize) -> SubmissionListRow {
    to_list_row_at(raw, index, Utc::now())
}

/// Map a whole list response, preserving order.
pub fn to_list_rows_at(raws: &[RawSubmission], now: DateTime<Utc>) -> Vec<SubmissionListRow> {
    raws.iter()
        .enumerate()
        .map(|(index, raw)| to_list_row_at(raw, index, now))
        .collect()
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn type_label(submission_type: Option<&str>) -> String {
    match submission_type {
        Some("traditional") => "Traditional 510(k)".to_string(),
        Some("special") => "Special 510(k)".to_string(),
        Some("abbreviated") => "Abbreviated 510(k)".to_string(),
        Some(other) => other.to_string(),
        None => "Unknown".to_string(),
    }
}

/// Render the raw progress field as a percentage string.
///
/// Strings of the form `"<completed> of <total>"` become a rounded
/// percentage; a zero or unparseable total degrades to "0%". Bare numbers
/// pass through as `"{n}%"`. Anything else is "0%".
fn progress_percent(progress: Option<&Value>) -> String {
    match progress {
        Some(Value::String(s)) if !s.is_empty() => {
            let mut parts = s.splitn(2, " of ");
            let completed = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
            let total = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
            match (completed, total) {
                (Some(completed), Some(total)) if total != 0.0 => {
                    format!("{}%", (completed / total * 100.0).round())
                }
                _ => {
                    tracing::debug!(progress = %s, "unparseable progress ratio");
                    "0%".to_string()
                }
            }
        }
        Some(Value::Number(n)) => format!("{}%", n),
        Some(other) => {
            tracing::debug!(progress = %other, "unexpected progress type");
            "0%".to_string()
        }
        _ => "0%".to_string(),
    }
}

fn format_deadline(deadline: Option<&str>) -> String {
    match deadline {
        Some(raw) => match timefmt::parse_datetime(raw) {
            Some(ts) => timefmt::format_long_date(ts),
            None => {
                tracing::debug!(raw, "unparseable internal_deadline");
                "Unknown".to_string()
            }
        },
        None => "Unknown".to_string(),
    }
}

fn format_last_updated(last_updated: Option<&str>, now: DateTime<Utc>) -> String {
    match last_updated {
        Some(raw) => match timefmt::parse_datetime(raw) {
            Some(ts) => timefmt::format_time_ago(ts, now),
            None => {
                tracing::debug!(raw, "unparseable last_updated");
                "Unknown".to_string()
            }
        },
        None => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawSubmission {
        RawSubmission::from_value(value).unwrap()
    }

    fn now() -> DateTime<Utc> {
        timefmt::parse_datetime("2026-03-08T12:00:00Z").unwrap()
    }

    #[test]
    fn test_device_name_fallback_chain() {
        let row = to_list_row_at(&raw(json!({"submission_title": "Glucose Meter X"})), 0, now());
        assert_eq!(row.device_name, "Glucose Meter X");

        let row = to_list_row_at(
            &raw(json!({"submission_title": "", "device_category": "IVD"})),
            0,
            now(),
        );
        assert_eq!(row.device_name, "IVD");

        let row = to_list_row_at(&raw(json!({})), 0, now());
        assert_eq!(row.device_name, "Untitled Submission");
    }

    #[test]
    fn test_type_labels() {
        for (input, label) in [
            ("traditional", "Traditional 510(k)"),
            ("special", "Special 510(k)"),
            ("abbreviated", "Abbreviated 510(k)"),
            ("de-novo", "de-novo"),
        ] {
            let row = to_list_row_at(&raw(json!({"submission_type": input})), 0, now());
            assert_eq!(row.submission_type, label);
        }
        let row = to_list_row_at(&raw(json!({"submission_type": ""})), 0, now());
        assert_eq!(row.submission_type, "Unknown");
    }

    #[test]
    fn test_status_passthrough_and_cycle() {
        let row = to_list_row_at(&raw(json!({"status": "in-review"})), 3, now());
        assert_eq!(row.status, "in-review");

        // Absent status cycles deterministically by list position.
        let row = to_list_row_at(&raw(json!({})), 7, now());
        assert_eq!(row.status, "approved");
        let row = to_list_row_at(&raw(json!({"status": ""})), 0, now());
        assert_eq!(row.status, "draft");
    }

    #[test]
    fn test_progress_ratio_string() {
        let row = to_list_row_at(&raw(json!({"progress": "3 of 12"})), 0, now());
        assert_eq!(row.progress, "25%");
    }

    #[test]
    fn test_progress_divide_by_zero() {
        let row = to_list_row_at(&raw(json!({"progress": "0 of 0"})), 0, now());
        assert_eq!(row.progress, "0%");
    }

    #[test]
    fn test_progress_numeric_and_garbage() {
        let row = to_list_row_at(&raw(json!({"progress": 42})), 0, now());
        assert_eq!(row.progress, "42%");

        let row = to_list_row_at(&raw(json!({"progress": "almost done"})), 0, now());
        assert_eq!(row.progress, "0%");

        let row = to_list_row_at(&raw(json!({"progress": true})), 0, now());
        assert_eq!(row.progress, "0%");

        let row = to_list_row_at(&raw(json!({})), 0, now());
        assert_eq!(row.progress, "0%");
    }

    #[test]
    fn test_progress_rounding() {
        let row = to_list_row_at(&raw(json!({"progress": "1 of 3"})), 0, now());
        assert_eq!(row.progress, "33%");
        let row = to_list_row_at(&raw(json!({"progress": "2 of 3"})), 0, now());
        assert_eq!(row.progress, "67%");
    }

    #[test]
    fn test_deadline_formatting() {
        let row = to_list_row_at(
            &raw(json!({"internal_deadline": "2026-06-15T00:00:00Z"})),
            0,
            now(),
        );
        assert_eq!(row.deadline, "June 15, 2026");

        let row = to_list_row_at(&raw(json!({"internal_deadline": "not-a-date"})), 0, now());
        assert_eq!(row.deadline, "Unknown");

        let row = to_list_row_at(&raw(json!({})), 0, now());
        assert_eq!(row.deadline, "Unknown");
    }

    #[test]
    fn test_last_updated_relative() {
        let row = to_list_row_at(
            &raw(json!({"last_updated": "2026-03-05T12:00:00Z"})),
            0,
            now(),
        );
        assert_eq!(row.last_updated, "3 days ago");

        let row = to_list_row_at(&raw(json!({"last_updated": "???"})), 0, now());
        assert_eq!(row.last_updated, "Unknown");
    }

    #[test]
    fn test_assignee_fallback() {
        let row = to_list_row_at(&raw(json!({"reviewer_id": "rev-7"})), 0, now());
        assert_eq!(row.assignee, "rev-7");

        let row = to_list_row_at(&raw(json!({})), 0, now());
        assert_eq!(row.assignee, "Unassigned");
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let input = raw(json!({
            "id": "sub-1",
            "submission_title": "Pulse Oximeter",
            "progress": "5 of 8",
            "last_updated": "2026-03-01T00:00:00Z",
        }));
        let first = to_list_row_at(&input, 2, now());
        let second = to_list_row_at(&input, 2, now());
        assert_eq!(first, second);
    }

    #[test]
    fn test_list_mapping_indexes_rows() {
        let raws = vec![raw(json!({})), raw(json!({})), raw(json!({}))];
        let rows = to_list_rows_at(&raws, now());
        assert_eq!(rows[0].status, "draft");
        assert_eq!(rows[1].status, "in-review");
        assert_eq!(rows[2].status, "submitted");
    }
}
