//! Judge response parsing.
//!
//! Models often wrap their JSON in prose or code fences. The response is
//! parsed as-is first; failing that, the first balanced `{...}` object in the
//! text is parsed.

use std::fmt;

use crate::types::AiJudgeResult;

/// Both parse attempts failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Error from parsing the whole response.
    pub direct: String,
    /// Error from parsing the extracted object, or `None` if no balanced
    /// object was found.
    pub extracted: Option<String>,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extracted {
            Some(err) => write!(f, "{}; extracted object: {}", self.direct, err),
            None => write!(f, "{}; no JSON object found", self.direct),
        }
    }
}

impl std::error::Error for ParseFailure {}

pub fn parse_judge_response(raw: &str) -> Result<AiJudgeResult, ParseFailure> {
    let direct = match serde_json::from_str::<AiJudgeResult>(raw.trim()) {
        Ok(result) => return Ok(result),
        Err(e) => e.to_string(),
    };
    let Some(object) = extract_json_object(raw) else {
        return Err(ParseFailure {
            direct,
            extracted: None,
        });
    };
    serde_json::from_str::<AiJudgeResult>(object).map_err(|e| ParseFailure {
        direct,
        extracted: Some(e.to_string()),
    })
}

/// First balanced `{...}` substring, skipping braces inside string literals.
pub fn extract_json_object(text: &str) -> Option<&str> {
    text.char_indices()
        .filter(|&(_, c)| c == '{')
        .find_map(|(start, _)| balanced_end(&text[start..]).map(|end| &text[start..start + end]))
}

/// Byte length of the object opening at the start of `s`, if it closes.
fn balanced_end(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
