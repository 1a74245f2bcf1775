//! Shared data model for near-duplicate copy detection.

pub mod config;
pub mod error;
pub mod types;

pub use config::DedupConfig;
pub use error::{NdError, Result};
pub use types::*;
