//! Near-duplicate detection for short copy: MinHash signatures, LSH banding,
//! exact Jaccard verification and union-find clustering, plus matching
//! against a library of previously accepted items.
//!
//! Stages:
//! 1. Normalize: strip boilerplate titles and call-to-action endings
//! 2. Shingle: character n-gram sets
//! 3. MinHash: fixed-length signatures from a deterministic hash family
//! 4. LSH: banded buckets for candidate pairs
//! 5. Verify: exact Jaccard on the shingle sets
//! 6. Cluster: union-find into duplicate groups

pub mod cluster;
pub mod engine;
pub mod library;
pub mod lsh;
pub mod minhash;
pub mod normalize;
pub mod shared;
pub mod shingle;
pub mod similarity;

pub use engine::{DedupEngine, DedupOptions, SearchOptions};
pub use library::Library;
pub use minhash::Signer;
pub use shared::SharedEngine;
