//! Issue decoding and normalization
//!
//! Turns a raw `/api/issues` response into [`Issue`]s and maps each one onto a
//! flat [`NormalizedIssue`] through a fixed table of custom field names.

use crate::{types::Issue, value::DecodedValue, Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use ytexport_core::models::{format_timestamp, is_outdated, NormalizedIssue};
use ytexport_core::sanitize;

pub const PRIORITY: &str = "Priority";
pub const USER_STORY: &str = "User Story";
pub const READY_IF: &str = "Ready if";
pub const ACCEPTANCE_CRITERIA: &str = "Acceptance Criteria (Done if)";
pub const STORY_POINTS: &str = "Story Points";
pub const SPRINTS: &str = "Sprints";

/// Every custom field the normalizer reads.
pub const CUSTOM_FIELDS: [&str; 6] = [
    USER_STORY,
    READY_IF,
    ACCEPTANCE_CRITERIA,
    STORY_POINTS,
    SPRINTS,
    PRIORITY,
];

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Reference time for the `outdated` flag.
    pub now: DateTime<Utc>,
    pub outdated_after: Duration,
}

impl NormalizeOptions {
    pub fn new(now: DateTime<Utc>, outdated_after_days: i64) -> Result<Self> {
        let outdated_after = Duration::try_days(outdated_after_days).ok_or_else(|| {
            ytexport_core::Error::Validation(format!(
                "Outdated threshold of {} days is out of range",
                outdated_after_days
            ))
        })?;

        Ok(Self {
            now,
            outdated_after,
        })
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            now: Utc::now(),
            outdated_after: Duration::days(180),
        }
    }
}

/// Why an issue was dropped from a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipKind {
    /// A custom field value was not an object, array, number or null.
    Decode,
    /// A custom field array held something other than objects.
    Shape,
    /// The issue itself did not match the expected layout, e.g. a string
    /// where a timestamp belongs.
    Structure,
}

/// An issue dropped from a batch because one of its values failed to decode.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedIssue {
    pub index: usize,
    pub id: Option<String>,
    /// Name of the custom field that failed, `None` for structural errors.
    pub field: Option<String>,
    pub kind: SkipKind,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct DecodeReport {
    pub issues: Vec<Issue>,
    pub skipped: Vec<SkippedIssue>,
}

/// Decode a JSON array of issues.
///
/// Each issue decodes on its own: a bad custom field value drops the whole
/// issue it belongs to and is recorded in [`DecodeReport::skipped`], while the
/// remaining issues are kept in their original order. Only a payload that is
/// not a JSON array fails the batch.
pub fn decode_issues(raw: &str) -> Result<DecodeReport> {
    let elements: Vec<Value> = serde_json::from_str(raw)
        .map_err(|e| Error::Decode(format!("issue list is not a JSON array: {}", e)))?;

    let mut report = DecodeReport::default();
    for (index, element) in elements.into_iter().enumerate() {
        let id = element
            .get("idReadable")
            .and_then(Value::as_str)
            .map(str::to_string);

        let decoded = match first_bad_field(&element) {
            Some((field, e)) => Err(SkippedIssue {
                index,
                id,
                kind: match e {
                    Error::Shape(_) => SkipKind::Shape,
                    _ => SkipKind::Decode,
                },
                reason: format!("custom field '{}': {}", field, e),
                field: Some(field),
            }),
            None => serde_json::from_value::<Issue>(element).map_err(|e| SkippedIssue {
                index,
                id,
                field: None,
                kind: SkipKind::Structure,
                reason: format!("malformed issue: {}", e),
            }),
        };

        match decoded {
            Ok(issue) => report.issues.push(issue),
            Err(skipped) => {
                tracing::warn!(
                    "Skipping issue #{} ({}): {}",
                    skipped.index,
                    skipped.id.as_deref().unwrap_or("unknown id"),
                    skipped.reason
                );
                report.skipped.push(skipped);
            }
        }
    }

    tracing::debug!(
        "Decoded {} issues, skipped {}",
        report.issues.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// The first custom field whose value fails to decode, with its name.
fn first_bad_field(element: &Value) -> Option<(String, Error)> {
    element
        .get("customFields")
        .and_then(Value::as_array)?
        .iter()
        .find_map(|entry| {
            let value = entry.get("value").unwrap_or(&Value::Null);
            DecodedValue::from_json(value).err().map(|e| {
                let name = entry
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                (name, e)
            })
        })
}

pub fn normalize(issue: &Issue, options: &NormalizeOptions) -> NormalizedIssue {
    NormalizedIssue {
        id: issue.id_readable.clone(),
        created: format_timestamp(issue.created),
        updated: format_timestamp(issue.updated),
        outdated: is_outdated(issue.updated, options.outdated_after, options.now),
        issue_type: issue.issue_type.clone(),
        priority: issue.string_by_name(PRIORITY),
        summary: sanitize(&issue.summary),
        description: sanitize(&issue.description),
        user_story: sanitize(&issue.string_by_name(USER_STORY)),
        ready_if: sanitize(&issue.string_by_name(READY_IF)),
        acceptance_criteria: sanitize(&issue.string_by_name(ACCEPTANCE_CRITERIA)),
        story_points: issue.number_by_name(STORY_POINTS),
        sprints: issue.list_by_name(SPRINTS),
    }
}

pub fn normalize_all(issues: &[Issue], options: &NormalizeOptions) -> Vec<NormalizedIssue> {
    issues.iter().map(|issue| normalize(issue, options)).collect()
}
