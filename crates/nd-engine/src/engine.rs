//! Dedup engine: orchestrates signing, banding, verification, clustering and
//! library matching for one batch.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use nd_core::config::validate_threshold;
use nd_core::{
    DedupConfig, DedupResult, DedupStats, LibraryMatch, LibrarySearchResult, Result, Signature,
    SimilarPair, TextItem,
};
use tracing::{debug, info};

use crate::cluster::cluster;
use crate::library::Library;
use crate::lsh::LshIndex;
use crate::minhash::Signer;
use crate::similarity::verify_candidates;

pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Per-call overrides for [`DedupEngine::dedup`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DedupOptions {
    /// Falls back to the configured threshold.
    pub threshold: Option<f64>,
    pub check_library: bool,
}

impl Default for DedupOptions {
    fn default() -> Self {
        Self {
            threshold: None,
            check_library: true,
        }
    }
}

impl DedupOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_check_library(mut self, check: bool) -> Self {
        self.check_library = check;
        self
    }
}

/// Per-call overrides for [`DedupEngine::search_library`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchOptions {
    pub threshold: Option<f64>,
    pub max_results: Option<usize>,
}

/// Near-duplicate detection over batches and an owned library.
///
/// Mutating the library needs `&mut self`; use [`crate::SharedEngine`] to
/// share one engine between threads.
#[derive(Debug)]
pub struct DedupEngine {
    config: DedupConfig,
    signer: Signer,
    library: Library,
}

impl DedupEngine {
    pub fn new(config: DedupConfig) -> Result<Self> {
        config.validate()?;
        let signer = Signer::new(&config);
        let library = Library::new(signer.clone());
        Ok(Self {
            config,
            signer,
            library,
        })
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    pub fn add_to_library(&mut self, items: &[TextItem]) -> usize {
        self.library.add(items)
    }

    pub fn remove_from_library(&mut self, ids: &[String]) -> usize {
        self.library.remove(ids)
    }

    pub fn clear_library(&mut self) {
        self.library.clear();
    }

    pub fn export_library(&self) -> Vec<TextItem> {
        self.library.export()
    }

    pub fn import_library(&mut self, items: &[TextItem]) -> usize {
        self.library.import(items)
    }

    pub fn export_json(&self) -> Result<String> {
        self.library.to_json()
    }

    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        self.library.import_json(json)
    }

    pub fn library_size(&self) -> usize {
        self.library.len()
    }

    /// Ranked library hits for each query text.
    pub fn search_library(&self, queries: &[String], options: SearchOptions) -> Vec<LibrarySearchResult> {
        let threshold = self.resolve_threshold(options.threshold);
        let max_results = options.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        queries
            .iter()
            .map(|query| LibrarySearchResult {
                query: query.clone(),
                matches: self.library.search(query, threshold, max_results),
            })
            .collect()
    }

    /// Find duplicates within `items` and, optionally, items already in the
    /// library. Never mutates the library.
    pub fn dedup(&self, items: &[TextItem], options: DedupOptions) -> DedupResult {
        let start = Instant::now();
        let threshold = self.resolve_threshold(options.threshold);

        // Ids identify items; a repeated id is the same item.
        let mut seen: HashSet<&str> = HashSet::new();
        let batch: Vec<&TextItem> = items.iter().filter(|i| seen.insert(i.id.as_str())).collect();
        if batch.len() < items.len() {
            debug!(dropped = items.len() - batch.len(), "repeated ids in batch");
        }

        let signatures: Vec<Signature> = batch.iter().map(|item| self.signer.sign(item)).collect();
        let pairs = self.similar_pairs(&batch, &signatures, threshold);

        let by_id: HashMap<&str, &TextItem> = batch.iter().map(|i| (i.id.as_str(), *i)).collect();
        let mut groups = cluster(&pairs, &by_id);
        let claimed: HashSet<String> = groups
            .iter()
            .flat_map(|g| {
                std::iter::once(g.representative.id.clone())
                    .chain(g.duplicates.iter().map(|d| d.item.id.clone()))
            })
            .collect();
        let representatives: HashSet<String> =
            groups.iter().map(|g| g.representative.id.clone()).collect();

        // Only ungrouped items and representatives are checked against the library.
        let mut library_matches = Vec::new();
        let mut known: HashSet<String> = HashSet::new();
        if options.check_library && !self.library.is_empty() {
            for (item, sig) in batch.iter().zip(&signatures) {
                let id = item.id.as_str();
                if claimed.contains(id) && !representatives.contains(id) {
                    continue;
                }
                if let Some(hit) = self.library.best_match(&sig.shingles, threshold) {
                    library_matches.push(LibraryMatch {
                        new_item: (*item).clone(),
                        library_item: hit.item.clone(),
                        similarity: hit.similarity,
                        match_count: hit.match_count,
                    });
                    known.insert(item.id.clone());
                }
            }
        }

        groups.retain(|g| !known.contains(&g.representative.id));
        let kept_reps: HashSet<&str> = groups.iter().map(|g| g.representative.id.as_str()).collect();
        let unique_items: Vec<TextItem> = batch
            .iter()
            .filter(|i| {
                let id = i.id.as_str();
                kept_reps.contains(id) || (!claimed.contains(id) && !known.contains(id))
            })
            .map(|i| (*i).clone())
            .collect();

        let duplicate_count = groups.iter().map(|g| g.duplicates.len()).sum();
        let stats = DedupStats {
            total_input: items.len(),
            unique_count: unique_items.len(),
            duplicate_count,
            library_match_count: library_matches.len(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            total = stats.total_input,
            unique = stats.unique_count,
            duplicates = stats.duplicate_count,
            library_matches = stats.library_match_count,
            elapsed_ms = stats.processing_time_ms,
            "dedup complete"
        );

        DedupResult {
            unique_items,
            duplicate_groups: groups,
            library_matches,
            stats,
        }
    }

    /// Verified pairs within a batch, in ascending input order.
    fn similar_pairs(&self, batch: &[&TextItem], signatures: &[Signature], threshold: f64) -> Vec<SimilarPair> {
        let mut lsh = LshIndex::new(self.config.num_bands, self.config.rows_per_band());
        for (idx, sig) in signatures.iter().enumerate() {
            lsh.insert(idx, &sig.signature);
        }
        let candidates = lsh.candidate_pairs();
        let accepted = verify_candidates(&candidates, |i| &signatures[i].shingles, threshold);
        debug!(
            items = batch.len(),
            candidates = candidates.len(),
            accepted = accepted.len(),
            "batch verification"
        );
        accepted
            .into_iter()
            .map(|(i, j, sim)| SimilarPair::new(batch[i].id.clone(), batch[j].id.clone(), sim))
            .collect()
    }

    /// Per-call threshold, falling back to the configured one when absent or
    /// out of range.
    fn resolve_threshold(&self, threshold: Option<f64>) -> f64 {
        match threshold {
            Some(t) if validate_threshold(t).is_ok() => t,
            _ => self.config.similarity_threshold,
        }
    }
}
