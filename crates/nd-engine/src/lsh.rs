//! LSH banding over MinHash signatures.
//!
//! Each signature is cut into `bands` slices of `rows_per_band` positions.
//! Items whose slices are identical in at least one band become candidate
//! pairs; exact verification happens afterwards.

use std::collections::{BTreeSet, HashMap};

/// Banded bucket index over signatures addressed by position.
#[derive(Debug)]
pub struct LshIndex {
    rows_per_band: usize,
    tables: Vec<HashMap<String, Vec<usize>>>,
}

impl LshIndex {
    pub fn new(bands: usize, rows_per_band: usize) -> Self {
        Self {
            rows_per_band,
            tables: (0..bands).map(|_| HashMap::new()).collect(),
        }
    }

    pub fn bands(&self) -> usize {
        self.tables.len()
    }

    /// Bucket `idx` under each of its band keys.
    pub fn insert(&mut self, idx: usize, signature: &[u64]) {
        let keys = band_keys(signature, self.tables.len(), self.rows_per_band);
        for (table, key) in self.tables.iter_mut().zip(keys) {
            table.entry(key).or_default().push(idx);
        }
    }

    /// Every pair sharing a bucket in any band, as `(lower, higher)`, ascending.
    pub fn candidate_pairs(&self) -> BTreeSet<(usize, usize)> {
        let mut pairs = BTreeSet::new();
        for table in &self.tables {
            for bucket in table.values().filter(|b| b.len() > 1) {
                for (i, &a) in bucket.iter().enumerate() {
                    for &b in &bucket[i + 1..] {
                        if a != b {
                            pairs.insert((a.min(b), a.max(b)));
                        }
                    }
                }
            }
        }
        pairs
    }
}

/// String keys for each band slice. Bands running past the end of the
/// signature are skipped.
pub fn band_keys(signature: &[u64], bands: usize, rows_per_band: usize) -> Vec<String> {
    if rows_per_band == 0 {
        return Vec::new();
    }
    signature
        .chunks_exact(rows_per_band)
        .take(bands)
        .map(|slice| {
            slice
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect()
}
