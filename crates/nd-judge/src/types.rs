use nd_core::TextItem;
use serde::{Deserialize, Serialize};

/// One item as sent to the judge. `index` is the item's position in the whole
/// run, and is how the judge refers to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyItemForJudge {
    pub id: String,
    pub index: usize,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chinese_text: Option<String>,
}

impl CopyItemForJudge {
    pub fn from_items(items: &[TextItem]) -> Vec<Self> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| Self {
                id: item.id.clone(),
                index,
                text: item.text.clone(),
                chinese_text: item.chinese_text.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueVerdict {
    pub index: usize,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateVerdict {
    pub keep_index: usize,
    #[serde(default)]
    pub remove_indices: Vec<usize>,
    #[serde(default)]
    pub reason: String,
}

/// Judge verdict for a batch, or for a whole run once batches are merged.
/// Counts default to zero when the model leaves them out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiJudgeResult {
    pub unique_indices: Vec<usize>,
    pub unique_items: Vec<UniqueVerdict>,
    pub duplicate_groups: Vec<DuplicateVerdict>,
    pub total_processed: usize,
    pub unique_count: usize,
    pub duplicate_count: usize,
}

impl AiJudgeResult {
    /// Every item in `batch` marked unique, used when a batch cannot be judged.
    pub fn all_unique(batch: &[CopyItemForJudge], reason: &str) -> Self {
        let unique_indices: Vec<usize> = batch.iter().map(|i| i.index).collect();
        let unique_items = unique_indices
            .iter()
            .map(|&index| UniqueVerdict {
                index,
                reason: reason.to_string(),
            })
            .collect();
        Self {
            unique_count: unique_indices.len(),
            total_processed: batch.len(),
            unique_indices,
            unique_items,
            duplicate_groups: Vec::new(),
            duplicate_count: 0,
        }
    }

    /// Append another batch's verdicts.
    pub fn merge(&mut self, other: AiJudgeResult) {
        self.unique_indices.extend(other.unique_indices);
        self.unique_items.extend(other.unique_items);
        self.duplicate_groups.extend(other.duplicate_groups);
        self.total_processed += other.total_processed;
        self.recount();
    }

    /// Derive the counts from the verdict lists.
    pub fn recount(&mut self) {
        self.unique_count = self.unique_indices.len();
        self.duplicate_count = self.duplicate_groups.iter().map(|g| g.remove_indices.len()).sum();
    }
}
