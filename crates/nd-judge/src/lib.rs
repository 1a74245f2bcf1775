//! Contract for the batched LLM judge, an optional semantic classifier that
//! runs alongside the MinHash engine.
//!
//! The model call itself lives behind [`JudgeClient`]; this crate owns the
//! batch schedule, response parsing and failure isolation.

pub mod error;
pub mod parse;
pub mod runner;
pub mod types;

pub use error::{JudgeError, Result};
pub use parse::{extract_json_object, parse_judge_response, ParseFailure};
pub use runner::{BatchFailure, JudgeClient, JudgeConfig, JudgeReport, JudgeRunner};
pub use types::*;
