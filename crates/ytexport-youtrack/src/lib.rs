//! ytexport YouTrack Integration
//!
//! Decodes YouTrack issue payloads, resolves custom fields by name and
//! normalizes issues into flat export records.

pub mod auth;
pub mod client;
pub mod error;
pub mod normalize;
pub mod types;
pub mod value;

pub use auth::YouTrackAuth;
pub use client::YouTrackClient;
pub use error::{Error, Result};
pub use normalize::{
    decode_issues, normalize, normalize_all, DecodeReport, NormalizeOptions, SkipKind,
    SkippedIssue,
};
pub use types::*;
pub use value::DecodedValue;
