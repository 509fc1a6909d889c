//! ytexport CLI Library
//!
//! Command implementations exposed as a library for testing.

pub mod commands;
pub mod env;

pub use commands::{convert, fetch, ExportSummary};
pub use env::load_dotenv;
