//! Normalized issue data model

use chrono::{DateTime, Duration, Local, Utc};
use serde::{Deserialize, Serialize};

/// Pattern used for every timestamp in exported records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Flat, sanitized issue record handed to reports and exports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NormalizedIssue {
    pub id: String,
    pub created: String,
    pub updated: String,
    pub outdated: bool,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub priority: String,
    pub summary: String,
    pub description: String,
    #[serde(rename = "userstory")]
    pub user_story: String,
    #[serde(rename = "ready-if")]
    pub ready_if: String,
    #[serde(rename = "acceptance-criteria")]
    pub acceptance_criteria: String,
    #[serde(rename = "storypoints")]
    pub story_points: f64,
    #[serde(default)]
    pub sprints: Vec<String>,
}

/// Format epoch milliseconds as a local `YYYY-MM-DD HH:MM:SS` string.
///
/// Values outside chrono's representable range yield an empty string.
pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|t| t.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// Whether an issue last updated at `updated_millis` has gone stale by `now`.
pub fn is_outdated(updated_millis: i64, outdated_after: Duration, now: DateTime<Utc>) -> bool {
    DateTime::from_timestamp_millis(updated_millis)
        .and_then(|updated| updated.checked_add_signed(outdated_after))
        .is_some_and(|stale_at| stale_at < now)
}

impl NormalizedIssue {
    /// Sprint names joined for single-cell outputs such as CSV.
    pub fn sprints_joined(&self) -> String {
        self.sprints.join(";")
    }
}
