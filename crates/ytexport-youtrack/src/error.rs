//! Error types for YouTrack integration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unsupported value shape: {0}")]
    Shape(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("YouTrack API error: {0}")]
    Api(String),

    #[error(transparent)]
    Core(#[from] ytexport_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
