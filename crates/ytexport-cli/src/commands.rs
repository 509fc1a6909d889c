//! `fetch` and `convert` commands

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use ytexport_core::models::Config;
use ytexport_core::storage::ExportStorage;
use ytexport_youtrack::{
    decode_issues, normalize_all, NormalizeOptions, SkippedIssue, YouTrackAuth, YouTrackClient,
};

/// What an export run produced.
#[derive(Debug)]
pub struct ExportSummary {
    pub exported: usize,
    pub skipped: Vec<SkippedIssue>,
    pub issues_path: PathBuf,
    pub csv_path: Option<PathBuf>,
}

/// Fetch issues from YouTrack, keep the raw response and export the
/// normalized records.
pub async fn fetch(config: &Config, token: String, now: DateTime<Utc>) -> Result<ExportSummary> {
    let auth = YouTrackAuth::new(token).context("Invalid YouTrack credentials")?;
    let client = YouTrackClient::new(config.youtrack.clone(), auth);

    let body = client
        .fetch_raw_issues()
        .await
        .context("Failed to fetch issues")?;

    let storage = ExportStorage::new(config.export.output_dir.clone());
    let raw_path = storage
        .save_raw(&body)
        .context("Failed to save raw response")?;
    tracing::info!("Raw response saved to {}", raw_path.display());

    export(&body, &storage, config, now)
}

/// Re-run normalization over a raw response saved by an earlier `fetch`.
///
/// Reads `input` when given, otherwise `raw-response.json` in the output
/// directory.
pub fn convert(config: &Config, input: Option<&Path>, now: DateTime<Utc>) -> Result<ExportSummary> {
    let storage = ExportStorage::new(config.export.output_dir.clone());

    let body = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => storage.load_raw().with_context(|| {
            format!("Failed to read {}", storage.raw_path().display())
        })?,
    };

    export(&body, &storage, config, now)
}

fn export(
    body: &str,
    storage: &ExportStorage,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<ExportSummary> {
    let report = decode_issues(body).context("Failed to decode issue list")?;
    if !report.skipped.is_empty() {
        tracing::warn!(
            "{} issue(s) skipped because of undecodable values",
            report.skipped.len()
        );
    }

    let options = NormalizeOptions::new(now, config.export.outdated_after_days)
        .context("Invalid export settings")?;
    let issues = normalize_all(&report.issues, &options);
    tracing::debug!(
        "Writing {} issues under {}",
        issues.len(),
        storage.output_dir().display()
    );

    let issues_path = storage
        .save_issues(&issues)
        .context("Failed to save normalized issues")?;
    tracing::info!("Exported {} issues to {}", issues.len(), issues_path.display());

    let csv_path = if config.export.csv {
        let path = storage
            .save_csv(&issues)
            .context("Failed to save CSV export")?;
        tracing::info!("CSV export written to {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(ExportSummary {
        exported: issues.len(),
        skipped: report.skipped,
        issues_path,
        csv_path,
    })
}
