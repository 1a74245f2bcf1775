//! Typed errors for judge calls.

use thiserror::Error;

use crate::parse::ParseFailure;

#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("could not parse judge response: {failure}")]
    Parse { failure: ParseFailure, raw: String },
    #[error("judge quota exhausted: {0}")]
    QuotaExhausted(String),
    #[error("judge request failed: {0}")]
    Request(String),
}

impl JudgeError {
    /// Classify an unparseable response. Rate-limit text wins over a plain
    /// parse error so callers can ask for a new key.
    pub fn from_parse(failure: ParseFailure, raw: &str) -> Self {
        if mentions_quota(raw) {
            Self::QuotaExhausted(snippet(raw))
        } else {
            Self::Parse {
                failure,
                raw: raw.to_string(),
            }
        }
    }

    /// Classify a transport or SDK failure from the client.
    pub fn from_request(err: anyhow::Error) -> Self {
        let message = format!("{err:#}");
        if mentions_quota(&message) {
            Self::QuotaExhausted(message)
        } else {
            Self::Request(message)
        }
    }

    pub fn is_quota_exhausted(&self) -> bool {
        matches!(self, Self::QuotaExhausted(_))
    }
}

pub type Result<T> = std::result::Result<T, JudgeError>;

fn mentions_quota(text: &str) -> bool {
    text.contains("429") || text.to_lowercase().contains("quota")
}

fn snippet(text: &str) -> String {
    const MAX_CHARS: usize = 200;
    let mut s: String = text.chars().take(MAX_CHARS).collect();
    if text.chars().count() > MAX_CHARS {
        s.push_str("...");
    }
    s
}
