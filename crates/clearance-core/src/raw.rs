//! Tolerant model of raw backend submission payloads.
//!
//! The submissions API is duck-typed: fields come and go between records,
//! and a handful (`progress`, `validated`) change JSON type depending on
//! which service last wrote them. Every field here is therefore optional,
//! and scalar fields decode leniently: a wrong-typed value becomes `None`
//! (reported via `tracing`) instead of failing the whole payload.
//!
//! Only the top-level entry points can fail, and only when the payload is
//! not a JSON object (or array of objects) at all.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClearanceError;

/// One submission record as returned by `GET /submissions` or
/// `GET /submissions/{id}`. List responses omit `sections`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSubmission {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub submission_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub device_category: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub submission_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    /// Either `"<completed> of <total>"` or a bare percentage number.
    /// Kept raw; interpretation lives in [`crate::list_row`].
    #[serde(default)]
    pub progress: Option<Value>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub internal_deadline: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_updated: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub reviewer_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub sections: Vec<RawSection>,
    /// Authoritative section aggregate, when the backend has computed one.
    #[serde(default, rename = "sectionStatus", deserialize_with = "lenient::record")]
    pub section_status: Option<RawSectionStatus>,
    /// Authoritative RTA aggregate, when the backend has computed one.
    #[serde(default, rename = "rtaStatus", deserialize_with = "lenient::record")]
    pub rta_status: Option<RawRtaStatus>,
    #[serde(default, rename = "readinessScore", deserialize_with = "lenient::count")]
    pub readiness_score: Option<u32>,
}

/// One checklist section of a submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSection {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    /// RTA-critical flag. Absent means critical (backend convention).
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub required: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_updated: Option<String>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub subsections: Vec<RawSubsection>,
}

/// One subsection carrying a checklist and its validation results.
///
/// The two arrays are correlated by position but the backend does not
/// guarantee equal lengths; counting code treats them independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSubsection {
    #[serde(default, deserialize_with = "lenient::values")]
    pub checklist: Vec<Value>,
    #[serde(default, rename = "checklistValidation", deserialize_with = "lenient::values")]
    pub checklist_validation: Vec<Value>,
}

/// Backend-computed section completion aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSectionStatus {
    #[serde(default, rename = "completedCount", deserialize_with = "lenient::count")]
    pub completed_count: Option<u32>,
    #[serde(default, rename = "totalSections", deserialize_with = "lenient::count")]
    pub total_sections: Option<u32>,
}

/// Backend-computed RTA-critical aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRtaStatus {
    #[serde(default, rename = "completedCriticals", deserialize_with = "lenient::count")]
    pub completed_criticals: Option<u32>,
    #[serde(default, rename = "totalCriticals", deserialize_with = "lenient::count")]
    pub total_criticals: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub issues: Option<u32>,
}

/// True when a validation element is affirmatively validated.
///
/// Anything other than an object with `"validated": true` counts as not
/// validated, including missing flags and wrong-typed values.
pub fn is_validated(item: &Value) -> bool {
    item.get("validated") == Some(&Value::Bool(true))
}

impl RawSubmission {
    /// Decode one submission from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, ClearanceError> {
        if !value.is_object() {
            return Err(ClearanceError::NotAnObject(type_name(&value).to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Decode one submission from raw response bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ClearanceError> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    /// Decode a `GET /submissions` list response.
    ///
    /// Non-object elements are skipped with a warning; the rest of the
    /// list survives.
    pub fn list_from_value(value: Value) -> Result<Vec<Self>, ClearanceError> {
        let Value::Array(items) = value else {
            return Err(ClearanceError::NotAnObject(type_name(&value).to_string()));
        };
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match Self::from_value(item) {
                Ok(raw) => out.push(raw),
                Err(err) => {
                    tracing::warn!(index, %err, "skipping malformed submission record");
                }
            }
        }
        Ok(out)
    }

    /// Decode a list response from raw bytes.
    pub fn list_from_slice(bytes: &[u8]) -> Result<Vec<Self>, ClearanceError> {
        Self::list_from_value(serde_json::from_slice(bytes)?)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Lenient field deserializers: wrong-typed data degrades to the empty
/// value for the field instead of failing the record.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// String, or a number rendered as one. Anything else is `None`.
    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Null => None,
            other => {
                tracing::debug!(value = %other, "ignoring non-string field");
                None
            }
        })
    }

    /// Bool or `None`; no truthiness coercion.
    pub fn boolean<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => Some(b),
            Value::Null => None,
            other => {
                tracing::debug!(value = %other, "ignoring non-boolean field");
                None
            }
        })
    }

    /// Non-negative integer count; floats are rounded. Anything else is `None`.
    pub fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    u32::try_from(u).ok()
                } else {
                    n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u32)
                }
            }
            Value::Null => None,
            other => {
                tracing::debug!(value = %other, "ignoring non-numeric count");
                None
            }
        })
    }

    /// Array elements kept verbatim; a non-array value becomes empty.
    pub fn values<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => {
                tracing::debug!(value = %other, "ignoring non-array field");
                Vec::new()
            }
        })
    }

    /// Array of typed records; malformed elements are skipped, not fatal.
    pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let items = values(deserializer)?;
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value(item) {
                Ok(record) => out.push(record),
                Err(err) => {
                    tracing::debug!(index, %err, "skipping malformed record");
                }
            }
        }
        Ok(out)
    }

    /// Optional typed record; a malformed or non-object value becomes `None`.
    pub fn record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            value => match serde_json::from_value(value) {
                Ok(record) => Ok(Some(record)),
                Err(err) => {
                    tracing::debug!(%err, "ignoring malformed nested record");
                    Ok(None)
                }
            },
        }
    }
}
