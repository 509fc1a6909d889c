pub mod config;
pub mod normalized;

pub use config::{Config, ExportConfig, YouTrackConfig};
pub use normalized::{format_timestamp, is_outdated, NormalizedIssue};
