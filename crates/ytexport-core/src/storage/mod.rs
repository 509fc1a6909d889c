pub mod config;
pub mod export;

pub use config::ConfigStorage;
pub use export::ExportStorage;

use std::path::PathBuf;

pub fn get_config_dir() -> crate::Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("ytexport"))
        .ok_or_else(|| crate::Error::InvalidData("Could not find config directory".to_string()))
}

pub fn init_config_dir() -> crate::Result<PathBuf> {
    let config_dir = get_config_dir()?;
    std::fs::create_dir_all(&config_dir)?;
    Ok(config_dir)
}
