//! YouTrack authentication

use crate::{Error, Result};

/// Permanent-token credentials for the YouTrack REST API.
pub struct YouTrackAuth {
    token: String,
}

impl YouTrackAuth {
    pub fn new(token: String) -> Result<Self> {
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(Error::Auth("API token cannot be empty".to_string()));
        }
        Ok(Self { token })
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for YouTrackAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTrackAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}
