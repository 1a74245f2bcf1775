use serde::{Deserialize, Serialize};

use crate::error::{NdError, Result};

/// Engine configuration. Signatures are only comparable when produced under
/// the same configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DedupConfig {
    /// Signature length.
    pub num_hash_functions: usize,
    /// Character n-gram length.
    pub shingle_size: usize,
    /// LSH bands; must divide `num_hash_functions`.
    pub num_bands: usize,
    /// Minimum exact Jaccard similarity for two items to count as duplicates.
    pub similarity_threshold: f64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            num_hash_functions: 128,
            shingle_size: 3,
            num_bands: 16,
            similarity_threshold: 0.7,
        }
    }
}

impl DedupConfig {
    pub fn with_num_hash_functions(mut self, n: usize) -> Self {
        self.num_hash_functions = n;
        self
    }

    pub fn with_shingle_size(mut self, n: usize) -> Self {
        self.shingle_size = n;
        self
    }

    pub fn with_num_bands(mut self, n: usize) -> Self {
        self.num_bands = n;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Rows per LSH band.
    pub fn rows_per_band(&self) -> usize {
        if self.num_bands == 0 {
            return 0;
        }
        self.num_hash_functions / self.num_bands
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would silently lose precision or divide by zero.
    pub fn validate(&self) -> Result<()> {
        if self.num_hash_functions == 0 {
            return Err(NdError::InvalidConfig("numHashFunctions must be >= 1".into()));
        }
        if self.shingle_size == 0 {
            return Err(NdError::InvalidConfig("shingleSize must be >= 1".into()));
        }
        if self.num_bands == 0 {
            return Err(NdError::InvalidConfig("numBands must be >= 1".into()));
        }
        if self.num_hash_functions % self.num_bands != 0 {
            return Err(NdError::InvalidConfig(format!(
                "numHashFunctions ({}) must be divisible by numBands ({})",
                self.num_hash_functions, self.num_bands
            )));
        }
        validate_threshold(self.similarity_threshold)
    }
}

/// Thresholds are similarities, so they must lie in `[0, 1]`.
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(NdError::InvalidConfig(format!(
            "similarity threshold must be within [0, 1], got {threshold}"
        )));
    }
    Ok(())
}
