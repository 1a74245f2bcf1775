//! MinHash signatures over shingle sets.
//!
//! Two sets with Jaccard similarity `J` agree on any given signature position
//! with probability close to `J`. The hash family is derived from the position
//! index alone, so signatures are reproducible across runs and processes.

use std::collections::HashSet;

use nd_core::{DedupConfig, Signature, TextItem};

use crate::normalize::normalize;
use crate::shingle::shingles;

/// Mersenne prime `2^31 - 1`.
pub const MERSENNE_PRIME: u64 = (1 << 31) - 1;

/// Value of a signature position no shingle has filled. Never produced by a
/// real hash, since all hashes are reduced modulo [`MERSENNE_PRIME`].
pub const EMPTY_SLOT: u64 = u64::MAX;

/// Polynomial string hash (`h * 31 + unit`) over UTF-16 code units with
/// 32-bit wraparound, taken as an absolute value.
pub fn string_hash(s: &str) -> u64 {
    let mut hash: i32 = 0;
    for unit in s.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(unit as i32);
    }
    (hash as i64).unsigned_abs()
}

/// Family of `(a * x + b) mod p` hash functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinHasher {
    params: Vec<(u64, u64)>,
}

impl MinHasher {
    pub fn new(num_hashes: usize) -> Self {
        let params = (0..num_hashes as u64)
            .map(|i| {
                let a = i.wrapping_mul(2_654_435_761).wrapping_add(1) % MERSENNE_PRIME;
                let b = i.wrapping_mul(40_503).wrapping_add(7_919) % MERSENNE_PRIME;
                (a.max(1), b)
            })
            .collect();
        Self { params }
    }

    pub fn num_hashes(&self) -> usize {
        self.params.len()
    }

    /// Signature of a shingle set. An empty set yields all [`EMPTY_SLOT`]s.
    pub fn signature(&self, shingles: &HashSet<String>) -> Vec<u64> {
        let mut mins = vec![EMPTY_SLOT; self.params.len()];
        for shingle in shingles {
            let h = string_hash(shingle);
            for (slot, &(a, b)) in mins.iter_mut().zip(&self.params) {
                let v = (a * h + b) % MERSENNE_PRIME;
                if v < *slot {
                    *slot = v;
                }
            }
        }
        mins
    }
}

/// Normalize, shingle and sign in one step.
#[derive(Debug, Clone)]
pub struct Signer {
    shingle_size: usize,
    hasher: MinHasher,
}

impl Signer {
    pub fn new(config: &DedupConfig) -> Self {
        Self {
            shingle_size: config.shingle_size,
            hasher: MinHasher::new(config.num_hash_functions),
        }
    }

    pub fn shingle_size(&self) -> usize {
        self.shingle_size
    }

    /// Shingle set of raw (un-normalized) text.
    pub fn shingle_text(&self, text: &str) -> HashSet<String> {
        shingles(&normalize(text), self.shingle_size)
    }

    pub fn sign_text(&self, id: impl Into<String>, text: &str) -> Signature {
        let shingles = self.shingle_text(text);
        let signature = self.hasher.signature(&shingles);
        Signature {
            id: id.into(),
            signature,
            shingles,
        }
    }

    pub fn sign(&self, item: &TextItem) -> Signature {
        self.sign_text(item.id.clone(), &item.text)
    }
}
