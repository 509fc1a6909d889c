//! `.env` support
//!
//! Variables such as `YT_API_TOKEN` or `YT_SEARCH_QUERY` may be kept in a
//! `.env` file next to where the tool runs. Values already present in the
//! process environment take precedence over the file.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const DOTENV_FILE: &str = ".env";

/// Load `dir/.env` into the process environment.
///
/// Returns the loaded path, or `None` when the directory has no `.env`.
pub fn load_dotenv(dir: &Path) -> Result<Option<PathBuf>> {
    let path = dir.join(DOTENV_FILE);
    if !path.is_file() {
        return Ok(None);
    }

    dotenvy::from_path(&path).with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(Some(path))
}
