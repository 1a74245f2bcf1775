use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A short piece of copy submitted for deduplication. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextItem {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chinese_text: Option<String>,
}

impl TextItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            chinese_text: None,
        }
    }

    pub fn with_chinese_text(mut self, text: impl Into<String>) -> Self {
        self.chinese_text = Some(text.into());
        self
    }
}

/// MinHash signature together with the shingle set it was derived from.
///
/// The shingles are kept so that every decision can be made on exact Jaccard
/// similarity; the signature only drives candidate generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub id: String,
    pub signature: Vec<u64>,
    pub shingles: HashSet<String>,
}

/// Undirected pair of item ids with their verified similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarPair {
    pub id1: String,
    pub id2: String,
    pub similarity: f64,
}

impl SimilarPair {
    pub fn new(id1: impl Into<String>, id2: impl Into<String>, similarity: f64) -> Self {
        Self {
            id1: id1.into(),
            id2: id2.into(),
            similarity,
        }
    }

    /// Order-independent key for the pair.
    pub fn key(&self) -> (String, String) {
        pair_key(&self.id1, &self.id2)
    }
}

/// Canonical map key for an undirected pair of ids.
pub fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// An item annotated with a similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredItem {
    pub item: TextItem,
    pub similarity: f64,
}

/// A representative and the items that duplicate it. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    pub representative: TextItem,
    pub duplicates: Vec<ScoredItem>,
}

impl DuplicateGroup {
    /// Number of items in the group, representative included.
    pub fn size(&self) -> usize {
        self.duplicates.len() + 1
    }

    pub fn contains(&self, id: &str) -> bool {
        self.representative.id == id || self.duplicates.iter().any(|d| d.item.id == id)
    }
}

/// A batch item that is already covered by the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryMatch {
    pub new_item: TextItem,
    /// Highest-similarity library item.
    pub library_item: TextItem,
    pub similarity: f64,
    /// Library items at or above the threshold.
    pub match_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupStats {
    pub total_input: usize,
    pub unique_count: usize,
    pub duplicate_count: usize,
    pub library_match_count: usize,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupResult {
    /// Items to keep: ungrouped items and group representatives, in input order.
    pub unique_items: Vec<TextItem>,
    pub duplicate_groups: Vec<DuplicateGroup>,
    pub library_matches: Vec<LibraryMatch>,
    pub stats: DedupStats,
}

/// Ranked library hits for one ad hoc query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySearchResult {
    pub query: String,
    pub matches: Vec<ScoredItem>,
}
