//! Text normalization: strip boilerplate titles and call-to-action endings,
//! then reduce to a canonical lower-case comparison string.
//!
//! The output is only ever shingled; it is not meant for display.

use regex::Regex;
use std::sync::LazyLock;

/// Anchored title prefixes, applied once each and in this order. Each removes
/// the boilerplate phrase itself; the rest of a header line goes only when a
/// line break ends it.
const TITLE_PATTERNS: &[&str] = &[
    // All-caps header line.
    r"^\s*[\p{Lu}0-9][\p{Lu}0-9 '’!?.,:&-]{3,}[ \t]*\r?\n",
    r"(?i)^\s*the\s+most\s+powerful\s+prayer\b(?:[^.!?:\n]*[.!?:]*[ \t]*\r?\n|[\s.,!?:;-]*)",
    r"(?i)^\s*dear\s+(?:god|lord|jesus|father)\b[\s.,!?:;-]*",
];

/// Anchored call-to-action suffixes. Several may be stacked at the end of a
/// post, so these are re-applied until nothing more is removed.
///
/// A call to action may carry a short trailing clause ("if you agree", "with a
/// friend who needs it"), which must open with a connective. Anything else
/// after the phrase is content and blocks the match.
const ENDING_PATTERNS: &[&str] = &[
    r#"(?i)[\s.,!;:-]*\b(?:please\s+)?(?:type|say|comment|write)\s+["'“”‘’]?amen\b["'“”‘’]?(?:[\s,]+(?:if|and|for|to|so|below|now|because|who)\b(?:[\s,]+[\w'’]+){0,8})?[^\w\n]*$"#,
    r"(?i)[\s.,!;:-]*\b(?:please\s+)?share\s+(?:(?:this|it)(?:[\s,]+(?:if|and|with|to|so|for|now|on|because|who)\b(?:[\s,]+[\w'’]+){0,8})?|if(?:[\s,]+[\w'’]+){0,8})[^\w\n]*$",
    r"(?i)[\s.,!;:-]*\b(?:don'?t|don’t|do\s+not)\s+forget\s+to\s+share\b(?:\s+(?:this|it))?(?:[\s,]+(?:if|and|with|to|so|for|now|on|because|who)\b(?:[\s,]+[\w'’]+){0,8})?[^\w\n]*$",
    r"(?i)[\s.,!;:-]*\b(?:like|follow)\s+(?:and|&)\s+(?:share|follow)\b(?:\s+(?:this|it|us))?(?:[\s,]+(?:if|and|with|to|so|for|now|on|because|who)\b(?:[\s,]+[\w'’]+){0,8})?[^\w\n]*$",
    r"(?i)[\s.,!;:-]*\btag\s+(?:a\s+friend|someone|a\s+loved\s+one)\b(?:[\s,]+(?:if|and|with|to|so|for|now|who|that)\b(?:[\s,]+[\w'’]+){0,8})?[^\w\n]*$",
    r"(?i)[\s.,!;:-]*\bamen\b[^\w\n]*$",
];

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static pattern compiles"))
        .collect()
}

static TITLES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(TITLE_PATTERNS));
static ENDINGS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(ENDING_PATTERNS));
static RE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").expect("static pattern compiles"));
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static pattern compiles"));

/// Remove leading title boilerplate.
pub fn strip_titles(text: &str) -> String {
    let mut result = text.to_string();
    for re in TITLES.iter() {
        result = re.replace(&result, "").into_owned();
    }
    result
}

/// Remove trailing call-to-action boilerplate until a fixed point is reached.
pub fn strip_endings(text: &str) -> String {
    let mut result = text.trim_end().to_string();
    // Earlier patterns take precedence: restart the scan after every cut.
    'scan: loop {
        for re in ENDINGS.iter() {
            if let Some(m) = re.find(&result) {
                if m.start() < result.len() {
                    result.truncate(m.start());
                    result.truncate(result.trim_end().len());
                    continue 'scan;
                }
            }
        }
        return result;
    }
}

/// Canonical comparison form: boilerplate stripped, lower-cased, punctuation
/// replaced by spaces, whitespace collapsed and trimmed.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let stripped = strip_endings(&strip_titles(text));
    let lowered = stripped.to_lowercase();
    let spaced = RE_NON_WORD.replace_all(&lowered, " ");
    RE_WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}
