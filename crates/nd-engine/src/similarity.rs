//! Exact and estimated set similarity.

use std::collections::{BTreeSet, HashSet};

use nd_core::{NdError, Result};

/// Jaccard similarity `|A ∩ B| / |A ∪ B|`; 0 when both sets are empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|s| large.contains(*s)).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Fraction of agreeing signature positions. Diagnostic only; the dedup path
/// always decides on exact Jaccard.
pub fn estimate_similarity(a: &[u64], b: &[u64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(NdError::SignatureLengthMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    if a.is_empty() {
        return Ok(0.0);
    }
    let matches = a.iter().zip(b).filter(|(x, y)| x == y).count();
    Ok(matches as f64 / a.len() as f64)
}

/// Recompute exact similarity for every candidate pair and keep those at or
/// above `threshold`, preserving candidate order.
pub fn verify_candidates<'a, F>(
    candidates: &BTreeSet<(usize, usize)>,
    shingles_of: F,
    threshold: f64,
) -> Vec<(usize, usize, f64)>
where
    F: Fn(usize) -> &'a HashSet<String>,
{
    candidates
        .iter()
        .filter_map(|&(i, j)| {
            let sim = jaccard(shingles_of(i), shingles_of(j));
            (sim >= threshold).then_some((i, j, sim))
        })
        .collect()
}
