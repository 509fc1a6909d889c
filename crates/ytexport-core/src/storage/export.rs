//! Export storage: raw API responses and normalized issues (JSON and CSV)

use crate::{models::NormalizedIssue, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

const RAW_FILE: &str = "raw-response.json";
const ISSUES_FILE: &str = "issues.json";
const CSV_FILE: &str = "issues.csv";

/// CSV-friendly representation of a NormalizedIssue
#[derive(Debug, Serialize)]
struct IssueCsv<'a> {
    id: &'a str,
    created: &'a str,
    updated: &'a str,
    outdated: bool,
    #[serde(rename = "type")]
    issue_type: &'a str,
    priority: &'a str,
    summary: &'a str,
    description: &'a str,
    #[serde(rename = "userstory")]
    user_story: &'a str,
    #[serde(rename = "ready-if")]
    ready_if: &'a str,
    #[serde(rename = "acceptance-criteria")]
    acceptance_criteria: &'a str,
    #[serde(rename = "storypoints")]
    story_points: f64,
    sprints: String,
}

impl<'a> From<&'a NormalizedIssue> for IssueCsv<'a> {
    fn from(issue: &'a NormalizedIssue) -> Self {
        Self {
            id: &issue.id,
            created: &issue.created,
            updated: &issue.updated,
            outdated: issue.outdated,
            issue_type: &issue.issue_type,
            priority: &issue.priority,
            summary: &issue.summary,
            description: &issue.description,
            user_story: &issue.user_story,
            ready_if: &issue.ready_if,
            acceptance_criteria: &issue.acceptance_criteria,
            story_points: issue.story_points,
            sprints: issue.sprints_joined(),
        }
    }
}

pub struct ExportStorage {
    output_dir: PathBuf,
}

impl ExportStorage {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn raw_path(&self) -> PathBuf {
        self.output_dir.join(RAW_FILE)
    }

    pub fn issues_path(&self) -> PathBuf {
        self.output_dir.join(ISSUES_FILE)
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(CSV_FILE)
    }

    /// Store the API response body exactly as received.
    pub fn save_raw(&self, body: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.raw_path();
        std::fs::write(&path, body)?;
        tracing::debug!("Wrote {} bytes to {}", body.len(), path.display());
        Ok(path)
    }

    pub fn load_raw(&self) -> Result<String> {
        Ok(std::fs::read_to_string(self.raw_path())?)
    }

    pub fn save_issues(&self, issues: &[NormalizedIssue]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.issues_path();
        let content = serde_json::to_string_pretty(issues)?;
        std::fs::write(&path, content)?;
        tracing::debug!("Wrote {} issues to {}", issues.len(), path.display());
        Ok(path)
    }

    pub fn load_issues(&self) -> Result<Vec<NormalizedIssue>> {
        let path = self.issues_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_csv(&self, issues: &[NormalizedIssue]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.csv_path();
        let mut writer = csv::Writer::from_path(&path)?;

        // serialize() only emits the header once a record is written
        if issues.is_empty() {
            writer.write_record([
                "id",
                "created",
                "updated",
                "outdated",
                "type",
                "priority",
                "summary",
                "description",
                "userstory",
                "ready-if",
                "acceptance-criteria",
                "storypoints",
                "sprints",
            ])?;
        }

        for issue in issues {
            writer.serialize(IssueCsv::from(issue))?;
        }

        writer.flush()?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_issue() -> NormalizedIssue {
        NormalizedIssue {
            id: "PRJ-7".to_string(),
            created: "2024-01-02 03:04:05".to_string(),
            updated: "2024-02-03 04:05:06".to_string(),
            issue_type: "Issue".to_string(),
            priority: "High".to_string(),
            summary: "Login, then logout".to_string(),
            story_points: 5.0,
            sprints: vec!["Sprint 1".to_string(), "Sprint 2".to_string()],
            ..NormalizedIssue::default()
        }
    }

    #[test]
    fn test_raw_body_kept_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ExportStorage::new(temp_dir.path().join("out"));

        let body = r#"[{"idReadable":"PRJ-1","unknown":true}]"#;
        let path = storage.save_raw(body).unwrap();

        assert_eq!(path, storage.raw_path());
        assert_eq!(storage.load_raw().unwrap(), body);
    }

    #[test]
    fn test_issues_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ExportStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.load_issues().unwrap().is_empty());

        let issues = vec![sample_issue()];
        storage.save_issues(&issues).unwrap();
        assert_eq!(storage.load_issues().unwrap(), issues);
    }

    #[test]
    fn test_csv_export() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ExportStorage::new(temp_dir.path().to_path_buf());

        storage.save_csv(&[sample_issue()]).unwrap();

        let mut reader = csv::Reader::from_path(storage.csv_path()).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "id");
        assert_eq!(&headers[4], "type");
        assert_eq!(&headers[12], "sprints");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "PRJ-7");
        assert_eq!(&rows[0][6], "Login, then logout");
        assert_eq!(&rows[0][12], "Sprint 1;Sprint 2");
    }

    #[test]
    fn test_csv_export_empty_has_header() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ExportStorage::new(temp_dir.path().to_path_buf());

        storage.save_csv(&[]).unwrap();

        let content = std::fs::read_to_string(storage.csv_path()).unwrap();
        assert!(content.starts_with("id,created,updated,outdated,type,"));
    }
}
