//! Character n-gram shingling.

use std::collections::HashSet;

pub const DEFAULT_SHINGLE_SIZE: usize = 3;

/// Set of all contiguous `n`-character substrings of `text`.
///
/// Text shorter than `n` characters yields itself as the only shingle, so the
/// result is only empty when `n` is zero.
pub fn shingles(text: &str, n: usize) -> HashSet<String> {
    if n == 0 {
        return HashSet::new();
    }
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < n {
        let mut s = HashSet::new();
        s.insert(text.to_string());
        return s;
    }
    chars.windows(n).map(|w| w.iter().collect()).collect()
}
