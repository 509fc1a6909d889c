pub mod error;
pub mod models;
pub mod sanitize;
pub mod storage;

pub use error::{Error, Result};
pub use sanitize::sanitize;
