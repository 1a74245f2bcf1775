//! Library of previously accepted items.
//!
//! Signatures are derived state: they are recomputed on every add and never
//! persisted. The JSON form is a plain array of items.

use std::collections::{HashMap, HashSet};

use nd_core::{Result, ScoredItem, Signature, TextItem};
use tracing::{debug, info};

use crate::minhash::Signer;
use crate::similarity::jaccard;

/// Best library hit for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryHit<'a> {
    pub item: &'a TextItem,
    pub similarity: f64,
    /// Library items at or above the threshold.
    pub match_count: usize,
}

#[derive(Debug)]
pub struct Library {
    signer: Signer,
    items: HashMap<String, TextItem>,
    signatures: HashMap<String, Signature>,
    /// Insertion order, for stable export and scan order.
    order: Vec<String>,
}

impl Library {
    pub fn new(signer: Signer) -> Self {
        Self {
            signer,
            items: HashMap::new(),
            signatures: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&TextItem> {
        self.items.get(id)
    }

    pub fn signature(&self, id: &str) -> Option<&Signature> {
        self.signatures.get(id)
    }

    /// Add items, skipping ids already present. Returns how many were added.
    pub fn add(&mut self, items: &[TextItem]) -> usize {
        let mut added = 0;
        for item in items {
            if self.items.contains_key(&item.id) {
                continue;
            }
            self.signatures.insert(item.id.clone(), self.signer.sign(item));
            self.items.insert(item.id.clone(), item.clone());
            self.order.push(item.id.clone());
            added += 1;
        }
        info!(added, skipped = items.len() - added, size = self.len(), "library add");
        added
    }

    /// Remove items by id. Returns how many were present.
    pub fn remove(&mut self, ids: &[String]) -> usize {
        let mut gone: HashSet<&str> = HashSet::new();
        for id in ids {
            if self.items.remove(id).is_some() {
                self.signatures.remove(id);
                gone.insert(id.as_str());
            }
        }
        if !gone.is_empty() {
            self.order.retain(|id| !gone.contains(id.as_str()));
        }
        info!(removed = gone.len(), size = self.len(), "library remove");
        gone.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.signatures.clear();
        self.order.clear();
        info!("library cleared");
    }

    /// Items in insertion order.
    pub fn export(&self) -> Vec<TextItem> {
        self.order
            .iter()
            .filter_map(|id| self.items.get(id).cloned())
            .collect()
    }

    /// Replace the contents with `items`, recomputing every signature.
    pub fn import(&mut self, items: &[TextItem]) -> usize {
        self.clear();
        self.add(items)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.export())?)
    }

    /// Replace the contents from a JSON array of items.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let items: Vec<TextItem> = serde_json::from_str(json)?;
        Ok(self.import(&items))
    }

    /// Exhaustive exact-Jaccard scan. `None` when nothing reaches `threshold`.
    pub fn best_match(&self, shingles: &HashSet<String>, threshold: f64) -> Option<LibraryHit<'_>> {
        let mut best: Option<(&str, f64)> = None;
        let mut match_count = 0;
        for id in &self.order {
            let Some(sig) = self.signatures.get(id) else {
                continue;
            };
            let sim = jaccard(shingles, &sig.shingles);
            if sim < threshold {
                continue;
            }
            match_count += 1;
            if best.map_or(true, |(_, b)| sim > b) {
                best = Some((id.as_str(), sim));
            }
        }
        let (id, similarity) = best?;
        debug!(id, similarity, match_count, "library match");
        Some(LibraryHit {
            item: self.items.get(id)?,
            similarity,
            match_count,
        })
    }

    /// Library items at or above `threshold`, most similar first, at most
    /// `max_results` of them.
    pub fn search(&self, query: &str, threshold: f64, max_results: usize) -> Vec<ScoredItem> {
        let shingles = self.signer.shingle_text(query);
        let mut hits: Vec<ScoredItem> = self
            .order
            .iter()
            .filter_map(|id| {
                let sig = self.signatures.get(id)?;
                let similarity = jaccard(&shingles, &sig.shingles);
                if similarity < threshold {
                    return None;
                }
                Some(ScoredItem {
                    item: self.items.get(id)?.clone(),
                    similarity,
                })
            })
            .collect();
        hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        hits.truncate(max_results);
        hits
    }
}
