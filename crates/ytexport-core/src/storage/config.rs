//! `config.json` persistence

use crate::{models::Config, Result};
use std::io::ErrorKind;
use std::path::PathBuf;

const CONFIG_FILE: &str = "config.json";

/// Reads and writes the tool's settings file.
///
/// A missing or blank file is replaced by the defaults; keys absent from an
/// existing file take their default values. Settings are validated both when
/// read and before they are written.
pub struct ConfigStorage {
    config_dir: PathBuf,
}

impl ConfigStorage {
    pub fn new(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn load(&self) -> Result<Config> {
        let path = self.config_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            tracing::info!("Writing default settings to {}", path.display());
            let config = Config::default();
            self.save(&config)?;
            return Ok(config);
        }

        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::write(self.config_path(), serde_json::to_string_pretty(config)?)?;
        Ok(())
    }
}
