//! YouTrack REST client

use crate::auth::YouTrackAuth;
use crate::normalize::CUSTOM_FIELDS;
use crate::{Error, Result};
use ytexport_core::models::YouTrackConfig;

/// Issue properties requested from `/api/issues`.
pub const ISSUE_FIELDS: &str =
    "idReadable,created,updated,summary,description,customFields(name,value(text,name))";

pub struct YouTrackClient {
    client: reqwest::Client,
    config: YouTrackConfig,
    auth: YouTrackAuth,
}

impl YouTrackClient {
    pub fn new(config: YouTrackConfig, auth: YouTrackAuth) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            auth,
        }
    }

    pub fn issues_url(&self) -> String {
        format!("https://{}/api/issues", self.config.domain.trim())
    }

    /// Query pairs for the issue search. Encoding is left to reqwest.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("query", self.config.query.clone())];
        params.extend(
            CUSTOM_FIELDS
                .iter()
                .map(|name| ("customFields", name.to_string())),
        );
        params.push(("fields", ISSUE_FIELDS.to_string()));
        params.push(("$top", self.config.max_issues.to_string()));
        params
    }

    /// Run the configured search and return the response body untouched.
    pub async fn fetch_raw_issues(&self) -> Result<String> {
        let url = self.issues_url();
        tracing::info!("Fetching up to {} issues from {}", self.config.max_issues, url);

        let response = self
            .client
            .get(&url)
            .query(&self.query_params())
            .header(reqwest::header::AUTHORIZATION, self.auth.bearer_header())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("{}: {}", status, error_text)));
        }

        let body = response.text().await?;
        tracing::debug!("Received {} bytes", body.len());
        Ok(body)
    }
}
